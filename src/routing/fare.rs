use serde::{Deserialize, Serialize};

use crate::constants::{BASE_FARE, BASE_FARE_DISTANCE_KM, FARE_BLOCK_KM, FARE_BLOCK_SURCHARGE};

/// Distance-based fare schedule
///
/// A trip up to `base_distance_km` costs `base_fare`. Every started
/// `block_km` beyond that adds `block_fare`, so any fractional remainder
/// rounds up to the next block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareTable {
    pub base_fare: u32,
    pub base_distance_km: f64,
    pub block_km: f64,
    pub block_fare: u32,
}

impl Default for FareTable {
    fn default() -> Self {
        Self {
            base_fare: BASE_FARE,
            base_distance_km: BASE_FARE_DISTANCE_KM,
            block_km: FARE_BLOCK_KM,
            block_fare: FARE_BLOCK_SURCHARGE,
        }
    }
}

impl FareTable {
    /// Fare for a trip of `distance_km`
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fare(&self, distance_km: f64) -> u32 {
        if distance_km <= self.base_distance_km || self.block_km <= 0.0 {
            return self.base_fare;
        }
        let blocks = ((distance_km - self.base_distance_km) / self.block_km).ceil() as u32;
        self.base_fare.saturating_add(blocks.saturating_mul(self.block_fare))
    }
}

/// Fare for `distance_km` under the default schedule
#[must_use]
pub fn fare(distance_km: f64) -> u32 {
    FareTable::default().fare(distance_km)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_fare_up_to_ten_km() {
        assert_eq!(fare(0.0), 1400);
        assert_eq!(fare(7.5), 1400);
        assert_eq!(fare(10.0), 1400);
    }

    #[test]
    fn test_fractional_block_rounds_up() {
        assert_eq!(fare(10.1), 1500);
        assert_eq!(fare(15.0), 1500);
        assert_eq!(fare(15.1), 1600);
        assert_eq!(fare(20.0), 1600);
        assert_eq!(fare(32.5), 1900);
    }

    #[test]
    fn test_custom_table() {
        let table = FareTable {
            base_fare: 1000,
            base_distance_km: 5.0,
            block_km: 2.0,
            block_fare: 50,
        };
        assert_eq!(table.fare(5.0), 1000);
        assert_eq!(table.fare(6.0), 1050);
        assert_eq!(table.fare(9.5), 1150);
    }
}
