use super::TransitNetwork;
use crate::models::Connection;

/// Extension trait for the adjacency lists of `TransitNetwork`
///
/// Every connection is one direction of a physical link. Callers that model
/// an undirected link add (and remove) both directions themselves.
pub trait Connections {
    /// Prepend a connection to `from`'s list. Out-of-range indices are ignored.
    fn add_connection(&mut self, from: usize, to: usize, time: f64, distance: f64, line: u32);

    /// Outgoing connections of `index`, most recent first
    fn connections(&self, index: usize) -> &[Connection];

    /// Remove every connection on `line` across all stations, returning how many were removed
    fn remove_connections_by_line(&mut self, line: u32) -> usize;

    /// Remove every connection pointing at `target` and shift higher targets down by one
    ///
    /// Returns the number of connections removed.
    fn remove_connections_by_target(&mut self, target: usize) -> usize;

    /// Remove the `from -> to` connections on `line`, returning how many were removed
    fn remove_connection(&mut self, from: usize, to: usize, line: u32) -> usize;

    fn connection_count(&self) -> usize;
}

impl Connections for TransitNetwork {
    fn add_connection(&mut self, from: usize, to: usize, time: f64, distance: f64, line: u32) {
        if to >= self.stations.len() {
            log::warn!("ignoring connection to unknown station index {to}");
            return;
        }
        let Some((_, station)) = self.stations.get_index_mut(from) else {
            log::warn!("ignoring connection from unknown station index {from}");
            return;
        };
        station
            .connections
            .insert(0, Connection::new(to, line, time, distance));
    }

    fn connections(&self, index: usize) -> &[Connection] {
        self.stations
            .get_index(index)
            .map(|(_, station)| station.connections.as_slice())
            .unwrap_or_default()
    }

    fn remove_connections_by_line(&mut self, line: u32) -> usize {
        let mut removed = 0;
        for station in self.stations.values_mut() {
            let before = station.connections.len();
            station.connections.retain(|c| c.line != line);
            removed += before - station.connections.len();
        }
        removed
    }

    fn remove_connections_by_target(&mut self, target: usize) -> usize {
        let mut removed = 0;
        for station in self.stations.values_mut() {
            let before = station.connections.len();
            station.connections.retain(|c| c.target != target);
            removed += before - station.connections.len();

            for connection in &mut station.connections {
                if connection.target > target {
                    connection.target -= 1;
                }
            }
        }
        removed
    }

    fn remove_connection(&mut self, from: usize, to: usize, line: u32) -> usize {
        let Some((_, station)) = self.stations.get_index_mut(from) else {
            return 0;
        };
        let before = station.connections.len();
        station
            .connections
            .retain(|c| c.target != to || c.line != line);
        before - station.connections.len()
    }

    fn connection_count(&self) -> usize {
        self.stations.values().map(|s| s.connections.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stations;

    fn network_with(names: &[&str]) -> TransitNetwork {
        let mut network = TransitNetwork::new();
        for name in names {
            network.insert_station(name).expect("Failed to insert");
        }
        network
    }

    #[test]
    fn test_add_connection_prepends() {
        let mut network = network_with(&["A", "B", "C"]);
        network.add_connection(0, 1, 5.0, 2.0, 1);
        network.add_connection(0, 2, 4.0, 3.0, 2);

        let targets: Vec<_> = network.connections(0).iter().map(|c| c.target).collect();
        assert_eq!(targets, vec![2, 1]);
        assert_eq!(network.connection_count(), 2);
    }

    #[test]
    fn test_add_connection_ignores_unknown_indices() {
        let mut network = network_with(&["A"]);
        network.add_connection(0, 3, 1.0, 1.0, 1);
        network.add_connection(5, 0, 1.0, 1.0, 1);
        assert_eq!(network.connection_count(), 0);
        assert!(network.connections(5).is_empty());
    }

    #[test]
    fn test_remove_by_line_counts_both_directions() {
        let mut network = network_with(&["A", "B", "C"]);
        network.add_connection(0, 1, 5.0, 2.0, 1);
        network.add_connection(1, 0, 5.0, 2.0, 1);
        network.add_connection(1, 2, 4.0, 3.0, 2);
        network.add_connection(2, 1, 4.0, 3.0, 2);

        assert_eq!(network.remove_connections_by_line(1), 2);
        assert_eq!(network.connection_count(), 2);
        assert_eq!(network.remove_connections_by_line(9), 0);
    }

    #[test]
    fn test_remove_by_target_renumbers_all_stations() {
        let mut network = network_with(&["A", "B", "C", "D"]);
        network.add_connection(0, 1, 1.0, 1.0, 1);
        network.add_connection(0, 3, 1.0, 1.0, 1);
        network.add_connection(2, 3, 1.0, 1.0, 2);
        network.add_connection(3, 0, 1.0, 1.0, 2);
        network.add_connection(3, 2, 1.0, 1.0, 2);

        assert_eq!(network.remove_connections_by_target(1), 1);

        let targets = |i: usize| -> Vec<usize> {
            network.connections(i).iter().map(|c| c.target).collect()
        };
        assert_eq!(targets(0), vec![2]);
        assert_eq!(targets(2), vec![2]);
        assert_eq!(targets(3), vec![1, 0]);
    }

    #[test]
    fn test_remove_single_direction() {
        let mut network = network_with(&["A", "B"]);
        network.add_connection(0, 1, 1.0, 1.0, 1);
        network.add_connection(1, 0, 1.0, 1.0, 1);
        network.add_connection(0, 1, 1.0, 1.0, 2);

        assert_eq!(network.remove_connection(0, 1, 1), 1);
        assert_eq!(network.connections(0).len(), 1);
        assert_eq!(network.connections(1).len(), 1);
        assert_eq!(network.remove_connection(4, 1, 1), 0);
    }
}
