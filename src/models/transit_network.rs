mod connections;
mod mutations;
mod routes;
mod stations;

pub use connections::Connections;
pub use mutations::{Bridge, LineRemoval, LoadSummary, Mutations, StationRemoval};
pub use routes::Routes;
pub use stations::Stations;

use indexmap::IndexMap;

use crate::config::NetworkConfig;
use crate::constants::{DEFAULT_STATION_CAPACITY, TRANSFER_PENALTY};
use crate::routing::FareTable;

use super::StationNode;

/// In-memory transit network: an ordered station registry where each
/// station owns its outgoing connections
///
/// A station's position in the registry is its index. Removing a station
/// shifts every later station down by one, and every connection target is
/// renumbered to match, so indices must never be held across a mutation.
///
/// The network is not synchronised. Hosts that share it between threads
/// must hold one exclusive lock around every query or mutation.
#[derive(Debug, Clone)]
pub struct TransitNetwork {
    pub(crate) stations: IndexMap<String, StationNode>,
    pub(crate) capacity: usize,
    pub(crate) transfer_penalty: f64,
    pub(crate) fares: FareTable,
}

impl TransitNetwork {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stations: IndexMap::new(),
            capacity: DEFAULT_STATION_CAPACITY,
            transfer_penalty: TRANSFER_PENALTY,
            fares: FareTable::default(),
        }
    }

    /// Empty network using the capacity, transfer penalty and fare table of `config`
    #[must_use]
    pub fn with_config(config: &NetworkConfig) -> Self {
        Self {
            stations: IndexMap::new(),
            capacity: config.station_capacity,
            transfer_penalty: config.transfer_penalty,
            fares: config.fare,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn transfer_penalty(&self) -> f64 {
        self.transfer_penalty
    }

    /// `(index, name)` for every station in registry order
    pub fn stations(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.stations.keys().map(String::as_str).enumerate()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Drop every station and connection, keeping the configuration
    pub fn clear(&mut self) {
        self.stations.clear();
    }
}

impl Default for TransitNetwork {
    fn default() -> Self {
        Self::new()
    }
}
