use serde::Serialize;

use super::{Connections, Stations, TransitNetwork};
use crate::error::{NetworkError, Result};
use crate::storage::StoredRow;

/// Outcome of a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Stations in the network after loading
    pub stations: usize,
    /// Directed connections added
    pub connections: usize,
    /// Rows that could not be applied
    pub skipped: usize,
}

/// Direct link synthesized around a removed station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bridge {
    pub line: u32,
    pub from: String,
    pub to: String,
    pub time: f64,
    pub distance: f64,
}

impl Bridge {
    #[must_use]
    pub fn to_row(&self) -> StoredRow {
        StoredRow::link(self.line, &self.from, &self.to, self.distance, self.time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRemoval {
    pub name: String,
    /// Registry index the station held before removal
    pub index: usize,
    pub bridge: Option<Bridge>,
    /// Connections from other stations that pointed at the removed one
    pub dropped_connections: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRemoval {
    pub line: u32,
    pub removed: usize,
}

impl LineRemoval {
    /// False when the line had no connections to remove
    #[must_use]
    pub fn existed(&self) -> bool {
        self.removed > 0
    }
}

/// Extension trait for structural changes to `TransitNetwork`
///
/// These only touch memory. `NetworkEditor` pairs each one with the matching
/// change to the persisted record.
pub trait Mutations {
    /// Build stations and connections from persisted rows
    ///
    /// Rows whose endpoints cannot be registered are skipped and counted.
    fn load_bulk<I>(&mut self, rows: I) -> LoadSummary
    where
        I: IntoIterator<Item = StoredRow>;

    /// Register a station with no connections
    ///
    /// # Errors
    /// `DuplicateName`, `CapacityExceeded` or `EmptyName`
    fn add_station(&mut self, name: &str) -> Result<usize>;

    /// Link two stations in both directions on `line`, registering missing endpoints
    ///
    /// Returns the endpoint indices.
    ///
    /// # Errors
    /// `InvalidWeight` for negative or non-finite weights, or a registry error
    fn add_link(&mut self, from: &str, to: &str, distance: f64, time: f64, line: u32)
        -> Result<(usize, usize)>;

    /// Remove both directions of the `a`-`b` link on `line`, returning how many connections went
    ///
    /// # Errors
    /// `StationNotFound` if either station is unknown
    fn remove_link(&mut self, a: &str, b: &str, line: u32) -> Result<usize>;

    /// Remove every connection on `line`
    fn remove_line(&mut self, line: u32) -> LineRemoval;

    /// Bridge that removing the station at `index` would synthesize
    ///
    /// A bridge exists only when the station has exactly two connections,
    /// to two distinct neighbors, on the same line.
    fn find_bridge(&self, index: usize) -> Option<Bridge>;

    /// Remove a station, bridging its neighbors first when possible
    ///
    /// # Errors
    /// `StationNotFound` if no station is called `name`
    fn remove_station(&mut self, name: &str) -> Result<StationRemoval>;
}

impl Mutations for TransitNetwork {
    fn load_bulk<I>(&mut self, rows: I) -> LoadSummary
    where
        I: IntoIterator<Item = StoredRow>,
    {
        let mut summary = LoadSummary::default();

        for row in rows {
            match row {
                StoredRow::Station(name) => {
                    if let Err(e) = self.get_or_insert_station(&name) {
                        log::warn!("skipping station '{name}': {e}");
                        summary.skipped += 1;
                    }
                }
                StoredRow::Link(link) => {
                    let from = self.get_or_insert_station(&link.from);
                    let to = self.get_or_insert_station(&link.to);
                    match (from, to) {
                        (Ok(from), Ok(to)) => {
                            self.add_connection(from, to, link.time, link.distance, link.line);
                            self.add_connection(to, from, link.time, link.distance, link.line);
                            summary.connections += 2;
                        }
                        (Err(e), _) | (_, Err(e)) => {
                            log::warn!("skipping link '{}' - '{}': {e}", link.from, link.to);
                            summary.skipped += 1;
                        }
                    }
                }
            }
        }

        summary.stations = self.station_count();
        log::info!(
            "loaded {} station(s), {} connection(s), skipped {} row(s)",
            summary.stations,
            summary.connections,
            summary.skipped
        );
        summary
    }

    fn add_station(&mut self, name: &str) -> Result<usize> {
        let index = self.insert_station(name)?;
        log::info!("added station '{}' at index {index}", name.trim());
        Ok(index)
    }

    fn add_link(
        &mut self,
        from: &str,
        to: &str,
        distance: f64,
        time: f64,
        line: u32,
    ) -> Result<(usize, usize)> {
        validate_weight("distance", distance)?;
        validate_weight("time", time)?;

        let from_index = self.get_or_insert_station(from)?;
        let to_index = self.get_or_insert_station(to)?;
        self.add_connection(from_index, to_index, time, distance, line);
        self.add_connection(to_index, from_index, time, distance, line);

        log::info!("linked '{}' - '{}' on line {line}", from.trim(), to.trim());
        Ok((from_index, to_index))
    }

    fn remove_link(&mut self, a: &str, b: &str, line: u32) -> Result<usize> {
        let a_index = self
            .find_index(a)
            .ok_or_else(|| NetworkError::StationNotFound(a.trim().to_string()))?;
        let b_index = self
            .find_index(b)
            .ok_or_else(|| NetworkError::StationNotFound(b.trim().to_string()))?;

        let mut removed = self.remove_connection(a_index, b_index, line);
        if a_index != b_index {
            removed += self.remove_connection(b_index, a_index, line);
        }
        Ok(removed)
    }

    fn remove_line(&mut self, line: u32) -> LineRemoval {
        let removed = self.remove_connections_by_line(line);
        if removed > 0 {
            log::info!("removed {removed} connection(s) of line {line}");
        } else {
            log::info!("line {line} has no connections");
        }
        LineRemoval { line, removed }
    }

    fn find_bridge(&self, index: usize) -> Option<Bridge> {
        let station = self.station(index)?;
        let [newer, older] = station.connections.as_slice() else {
            return None;
        };
        if newer.line != older.line
            || station.neighbors().len() != 2
            || newer.target == index
            || older.target == index
        {
            return None;
        }

        // Oldest connection first so the bridge reads in insertion order
        Some(Bridge {
            line: older.line,
            from: self.station_name(older.target)?.to_string(),
            to: self.station_name(newer.target)?.to_string(),
            time: older.time + newer.time,
            distance: older.distance + newer.distance,
        })
    }

    fn remove_station(&mut self, name: &str) -> Result<StationRemoval> {
        let name = name.trim();
        let index = self
            .find_index(name)
            .ok_or_else(|| NetworkError::StationNotFound(name.to_string()))?;

        // Neighbors are resolved before any renumbering takes place
        let bridge = self.find_bridge(index);
        if let Some(bridge) = &bridge {
            let endpoints = self.find_index(&bridge.from).zip(self.find_index(&bridge.to));
            if let Some((from, to)) = endpoints {
                self.add_connection(from, to, bridge.time, bridge.distance, bridge.line);
                self.add_connection(to, from, bridge.time, bridge.distance, bridge.line);
                log::info!(
                    "bridged '{}' - '{}' on line {} around '{name}'",
                    bridge.from,
                    bridge.to,
                    bridge.line
                );
            }
        }

        self.stations.shift_remove_index(index);
        let dropped_connections = self.remove_connections_by_target(index);
        log::info!("removed station '{name}' (index {index})");

        Ok(StationRemoval {
            name: name.to_string(),
            index,
            bridge,
            dropped_connections,
        })
    }
}

fn validate_weight(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(NetworkError::InvalidWeight { field, value })
    }
}
