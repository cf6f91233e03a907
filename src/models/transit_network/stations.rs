use super::TransitNetwork;
use crate::error::{NetworkError, Result};
use crate::models::StationNode;

/// Extension trait for the station registry of `TransitNetwork`
///
/// Names are compared exactly (case-sensitive) after trimming surrounding
/// whitespace.
pub trait Stations {
    /// Registry index of the station called `name`
    fn find_index(&self, name: &str) -> Option<usize>;

    /// Append a new station, failing on duplicates or when capacity is reached
    ///
    /// # Errors
    /// `DuplicateName`, `CapacityExceeded`, or `EmptyName` for a blank name
    fn insert_station(&mut self, name: &str) -> Result<usize>;

    /// Index of the station called `name`, appending it first if absent
    ///
    /// # Errors
    /// `CapacityExceeded` or `EmptyName` when a new station cannot be appended
    fn get_or_insert_station(&mut self, name: &str) -> Result<usize>;

    fn station(&self, index: usize) -> Option<&StationNode>;

    fn station_name(&self, index: usize) -> Option<&str>;

    fn station_count(&self) -> usize;
}

impl Stations for TransitNetwork {
    fn find_index(&self, name: &str) -> Option<usize> {
        self.stations.get_index_of(name.trim())
    }

    fn insert_station(&mut self, name: &str) -> Result<usize> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NetworkError::EmptyName);
        }
        if self.stations.contains_key(name) {
            return Err(NetworkError::DuplicateName(name.to_string()));
        }
        if self.stations.len() >= self.capacity {
            return Err(NetworkError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let (index, _) = self
            .stations
            .insert_full(name.to_string(), StationNode::new(name.to_string()));
        Ok(index)
    }

    fn get_or_insert_station(&mut self, name: &str) -> Result<usize> {
        match self.find_index(name) {
            Some(index) => Ok(index),
            None => self.insert_station(name),
        }
    }

    fn station(&self, index: usize) -> Option<&StationNode> {
        self.stations.get_index(index).map(|(_, node)| node)
    }

    fn station_name(&self, index: usize) -> Option<&str> {
        self.stations.get_index(index).map(|(name, _)| name.as_str())
    }

    fn station_count(&self) -> usize {
        self.stations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;

    #[test]
    fn test_insert_and_find() {
        let mut network = TransitNetwork::new();
        let a = network.insert_station("Hongik Univ.").expect("Failed to insert");
        let b = network.insert_station("Sinchon").expect("Failed to insert");

        assert_eq!((a, b), (0, 1));
        assert_eq!(network.find_index("Sinchon"), Some(1));
        assert_eq!(network.station_name(0), Some("Hongik Univ."));
        assert_eq!(network.station_count(), 2);
    }

    #[test]
    fn test_lookup_trims_but_is_case_sensitive() {
        let mut network = TransitNetwork::new();
        network.insert_station("  City Hall\t").expect("Failed to insert");

        assert_eq!(network.find_index("City Hall"), Some(0));
        assert_eq!(network.find_index(" City Hall "), Some(0));
        assert_eq!(network.find_index("city hall"), None);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut network = TransitNetwork::new();
        network.insert_station("Euljiro").expect("Failed to insert");

        let err = network.insert_station(" Euljiro ").expect_err("Expected duplicate");
        assert!(matches!(err, NetworkError::DuplicateName(name) if name == "Euljiro"));
        assert_eq!(network.station_count(), 1);
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut network = TransitNetwork::new();
        assert!(matches!(network.insert_station("   "), Err(NetworkError::EmptyName)));
    }

    #[test]
    fn test_capacity_exceeded() {
        let config = NetworkConfig {
            station_capacity: 2,
            ..NetworkConfig::default()
        };
        let mut network = TransitNetwork::with_config(&config);
        network.insert_station("A").expect("Failed to insert");
        network.insert_station("B").expect("Failed to insert");

        let err = network.insert_station("C").expect_err("Expected capacity error");
        assert!(matches!(err, NetworkError::CapacityExceeded { capacity: 2 }));
        // Existing stations are still resolvable at capacity
        assert_eq!(network.get_or_insert_station("B").expect("Failed to resolve"), 1);
    }
}
