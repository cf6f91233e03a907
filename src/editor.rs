use std::collections::HashSet;

use crate::config::NetworkConfig;
use crate::error::Result;
use crate::models::{
    Connections, LineRemoval, LoadSummary, Mutations, Routes, StationRemoval, Stations, TransitNetwork,
};
use crate::routing::{CostMode, Route};
use crate::storage::{RecordStore, StoredRow};

/// Keeps a `TransitNetwork` and its persisted record in step
///
/// Every mutation is applied to the network first and then mirrored to the
/// store. When the store fails the error is returned and the in-memory change
/// is kept; there is no rollback.
#[derive(Debug)]
pub struct NetworkEditor<S> {
    network: TransitNetwork,
    store: S,
}

impl<S: RecordStore> NetworkEditor<S> {
    pub fn new(network: TransitNetwork, store: S) -> Self {
        Self { network, store }
    }

    /// Build a network from `config` and load it from `store`
    ///
    /// # Errors
    /// Returns an error if the record cannot be read
    pub fn open(config: &NetworkConfig, store: S) -> Result<(Self, LoadSummary)> {
        let mut editor = Self::new(TransitNetwork::with_config(config), store);
        let summary = editor.reload()?;
        Ok((editor, summary))
    }

    /// Replace the in-memory network with the contents of the store
    ///
    /// # Errors
    /// Returns an error if the record cannot be read; the network is left untouched
    pub fn reload(&mut self) -> Result<LoadSummary> {
        let set = self.store.read_all()?;
        let malformed = set.malformed_count();

        self.network.clear();
        let mut summary = self.network.load_bulk(set.into_rows());
        summary.skipped += malformed;
        Ok(summary)
    }

    #[must_use]
    pub fn network(&self) -> &TransitNetwork {
        &self.network
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (TransitNetwork, S) {
        (self.network, self.store)
    }

    /// # Errors
    /// See [`Routes::find_path`]
    pub fn find_path(&self, from: &str, to: &str, mode: CostMode) -> Result<Route> {
        self.network.find_path(from, to, mode)
    }

    /// Add an unconnected station and persist a placeholder row for it
    ///
    /// # Errors
    /// Registry errors, or a persistence failure after the station was added
    pub fn add_station(&mut self, name: &str) -> Result<usize> {
        let index = self.network.add_station(name)?;
        self.store.append(&StoredRow::Station(name.trim().to_string()))?;
        Ok(index)
    }

    /// Link two stations in both directions and persist the link
    ///
    /// # Errors
    /// Invalid weights, registry errors, or a persistence failure after linking
    pub fn add_line(&mut self, from: &str, to: &str, distance: f64, time: f64, line: u32) -> Result<()> {
        self.network.add_link(from, to, distance, time, line)?;
        self.store
            .append(&StoredRow::link(line, from.trim(), to.trim(), distance, time))
    }

    /// Remove every connection of `line` and drop its rows from the record
    ///
    /// # Errors
    /// Returns an error if the record cannot be rewritten
    pub fn remove_line(&mut self, line: u32) -> Result<LineRemoval> {
        let removal = self.network.remove_line(line);
        self.store.rewrite_filtered(&|row: &StoredRow| row.line() != Some(line))?;
        self.persist_unrecorded_stations()?;
        Ok(removal)
    }

    /// Remove both directions of one link and drop its rows from the record
    ///
    /// # Errors
    /// `StationNotFound`, or a persistence failure after removal
    pub fn remove_link(&mut self, a: &str, b: &str, line: u32) -> Result<usize> {
        let removed = self.network.remove_link(a, b, line)?;
        let (a, b) = (a.trim(), b.trim());
        self.store.rewrite_filtered(&|row: &StoredRow| !row.is_link(a, b, line))?;
        self.persist_unrecorded_stations()?;
        Ok(removed)
    }

    /// Remove a station, persisting any bridge and dropping every row that names it
    ///
    /// # Errors
    /// `StationNotFound`, or a persistence failure after removal
    pub fn remove_station(&mut self, name: &str) -> Result<StationRemoval> {
        let removal = self.network.remove_station(name)?;
        if let Some(bridge) = &removal.bridge {
            self.store.append(&bridge.to_row())?;
        }
        let removed = removal.name.as_str();
        self.store.rewrite_filtered(&|row: &StoredRow| !row.names_station(removed))?;
        self.persist_unrecorded_stations()?;
        Ok(removal)
    }

    /// Append a placeholder row for every live station no longer named by the record
    ///
    /// Filtering rows out can leave a station that is still in the network
    /// without any row, which would drop it on the next reload.
    fn persist_unrecorded_stations(&mut self) -> Result<()> {
        let set = self.store.read_all()?;
        let mut recorded = HashSet::new();
        for row in set.rows() {
            match row {
                StoredRow::Link(link) => {
                    recorded.insert(link.from.as_str());
                    recorded.insert(link.to.as_str());
                }
                StoredRow::Station(name) => {
                    recorded.insert(name.as_str());
                }
            }
        }

        let missing: Vec<String> = self
            .network
            .stations()
            .filter(|(_, name)| !recorded.contains(name))
            .map(|(_, name)| name.to_string())
            .collect();

        for name in missing {
            log::debug!("recording placeholder for station '{name}'");
            self.store.append(&StoredRow::Station(name))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn station_count(&self) -> usize {
        self.network.station_count()
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.network.connection_count()
    }
}
