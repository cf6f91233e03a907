use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scalar objective minimised by a path query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostMode {
    /// Edge weight is the travel time in minutes
    Time,
    /// Edge weight is the physical distance in kilometers
    Distance,
    /// Edge weight is the fare at the cumulative distance reached by the edge
    Fare,
}

impl CostMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Distance => "distance",
            Self::Fare => "fare",
        }
    }
}

impl fmt::Display for CostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" | "1" => Ok(Self::Time),
            "distance" | "2" => Ok(Self::Distance),
            "fare" | "3" => Ok(Self::Fare),
            other => Err(format!("unknown cost mode '{other}' (expected time, distance or fare)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_menu_numbers() {
        assert_eq!("time".parse::<CostMode>(), Ok(CostMode::Time));
        assert_eq!(" Distance ".parse::<CostMode>(), Ok(CostMode::Distance));
        assert_eq!("3".parse::<CostMode>(), Ok(CostMode::Fare));
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        let err = "cheapest".parse::<CostMode>().expect_err("Expected error");
        assert!(err.contains("cheapest"));
    }

    #[test]
    fn test_display_matches_as_str() {
        for mode in [CostMode::Time, CostMode::Distance, CostMode::Fare] {
            assert_eq!(mode.to_string(), mode.as_str());
        }
    }
}
