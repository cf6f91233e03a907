use super::Connection;

/// A named node of the transit network together with its outgoing connections
///
/// Connections are kept most-recent-first.
#[derive(Debug, Clone, PartialEq)]
pub struct StationNode {
    pub name: String,
    pub connections: Vec<Connection>,
}

impl StationNode {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            connections: Vec::new(),
        }
    }

    /// Distinct stations reachable in one hop, in connection order
    #[must_use]
    pub fn neighbors(&self) -> Vec<usize> {
        let mut seen = Vec::with_capacity(self.connections.len());
        for connection in &self.connections {
            if !seen.contains(&connection.target) {
                seen.push(connection.target);
            }
        }
        seen
    }
}
