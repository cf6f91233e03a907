use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_RECORD_PATH, DEFAULT_STATION_CAPACITY, TRANSFER_PENALTY};
use crate::error::{NetworkError, Result};
use crate::routing::FareTable;
use crate::service_hours::ServiceHours;

/// Runtime settings, read from JSON; every field is optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub record_path: PathBuf,
    /// Soft limit on the number of stations
    pub station_capacity: usize,
    pub transfer_penalty: f64,
    pub fare: FareTable,
    pub service_hours: ServiceHours,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            record_path: PathBuf::from(DEFAULT_RECORD_PATH),
            station_capacity: DEFAULT_STATION_CAPACITY,
            transfer_penalty: TRANSFER_PENALTY,
            fare: FareTable::default(),
            service_hours: ServiceHours::default(),
        }
    }
}

impl NetworkConfig {
    /// Load settings from `path`, falling back to defaults when the file is absent
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no config at '{}', using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| NetworkError::io(path, e))?;
        let config: Self = serde_json::from_str(&content).map_err(|e| NetworkError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if config.transfer_penalty < 0.0 || !config.transfer_penalty.is_finite() {
            return Err(NetworkError::Config {
                path: path.to_path_buf(),
                reason: format!("transfer_penalty must be non-negative, got {}", config.transfer_penalty),
            });
        }
        Ok(config)
    }
}
