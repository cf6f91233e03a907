use chrono::{Local, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::constants::{SERVICE_CLOSED_FROM_HOUR, SERVICE_REOPEN_HOUR};

/// Nightly closure window during which route queries are refused
///
/// Service is closed from `closed_from_hour` (inclusive) until `reopen_hour`
/// (exclusive). A window that wraps past midnight is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceHours {
    pub closed_from_hour: u32,
    pub reopen_hour: u32,
}

impl Default for ServiceHours {
    fn default() -> Self {
        Self {
            closed_from_hour: SERVICE_CLOSED_FROM_HOUR,
            reopen_hour: SERVICE_REOPEN_HOUR,
        }
    }
}

impl ServiceHours {
    #[must_use]
    pub fn is_open(&self, time: NaiveTime) -> bool {
        let hour = time.hour();
        let closed = if self.closed_from_hour <= self.reopen_hour {
            (self.closed_from_hour..self.reopen_hour).contains(&hour)
        } else {
            hour >= self.closed_from_hour || hour < self.reopen_hour
        };
        !closed
    }

    #[must_use]
    pub fn is_open_now(&self) -> bool {
        self.is_open(Local::now().time())
    }
}
