use crate::routing::{CostMode, FareTable};

/// Directed, weighted, line-tagged edge owned by its origin station
///
/// `target` is a positional handle into the network's station registry.
/// It is only valid until the next station removal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub target: usize,
    pub line: u32,
    /// Travel time in minutes
    pub time: f64,
    /// Distance in kilometers
    pub distance: f64,
}

impl Connection {
    #[must_use]
    pub const fn new(target: usize, line: u32, time: f64, distance: f64) -> Self {
        Self {
            target,
            line,
            time,
            distance,
        }
    }

    /// Weight of this edge under `mode` for a rider who has already covered `distance_so_far`
    ///
    /// In fare mode this is the absolute fare at the new cumulative distance,
    /// not the increment over the fare already paid.
    #[must_use]
    pub fn weight(&self, mode: CostMode, distance_so_far: f64, fares: &FareTable) -> f64 {
        match mode {
            CostMode::Time => self.time,
            CostMode::Distance => self.distance,
            CostMode::Fare => f64::from(fares.fare(distance_so_far + self.distance)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_per_mode() {
        let connection = Connection::new(1, 2, 4.0, 3.0);
        let fares = FareTable::default();

        assert_eq!(connection.weight(CostMode::Time, 0.0, &fares), 4.0);
        assert_eq!(connection.weight(CostMode::Distance, 0.0, &fares), 3.0);
        assert_eq!(connection.weight(CostMode::Fare, 0.0, &fares), 1400.0);
    }

    #[test]
    fn test_fare_weight_is_absolute_at_cumulative_distance() {
        let connection = Connection::new(1, 2, 4.0, 3.0);
        let fares = FareTable::default();

        // 9 km already covered, 12 km after this hop
        assert_eq!(connection.weight(CostMode::Fare, 9.0, &fares), 1500.0);
    }
}
