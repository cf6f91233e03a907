//! Flat-file persistence of the network
//!
//! The record is row oriented: a header followed by one row per physical
//! link (`line,from,to,distance,time`). A row with an empty line field and no
//! destination is a station placeholder that keeps an unconnected station
//! alive across restarts.

mod file;
mod memory;
mod row;

pub use file::CsvRecordStore;
pub use memory::MemoryRecordStore;
pub use row::{LinkRecord, StoredRow};

use crate::error::{NetworkError, Result};

/// A row that could not be parsed, kept as raw bytes so rewrites do not lose it
///
/// Names in records written by other tools need not be UTF-8.
#[derive(Debug)]
pub struct MalformedRow {
    pub fields: csv::ByteRecord,
    pub error: NetworkError,
}

#[derive(Debug)]
pub enum RecordEntry {
    Row(StoredRow),
    Malformed(MalformedRow),
}

/// Every data row of a record, in file order
#[derive(Debug, Default)]
pub struct RecordSet {
    pub entries: Vec<RecordEntry>,
}

impl RecordSet {
    pub fn rows(&self) -> impl Iterator<Item = &StoredRow> {
        self.entries.iter().filter_map(|entry| match entry {
            RecordEntry::Row(row) => Some(row),
            RecordEntry::Malformed(_) => None,
        })
    }

    pub fn malformed(&self) -> impl Iterator<Item = &MalformedRow> {
        self.entries.iter().filter_map(|entry| match entry {
            RecordEntry::Malformed(row) => Some(row),
            RecordEntry::Row(_) => None,
        })
    }

    #[must_use]
    pub fn malformed_count(&self) -> usize {
        self.malformed().count()
    }

    /// Parsed rows only, in file order
    #[must_use]
    pub fn into_rows(self) -> Vec<StoredRow> {
        self.entries
            .into_iter()
            .filter_map(|entry| match entry {
                RecordEntry::Row(row) => Some(row),
                RecordEntry::Malformed(_) => None,
            })
            .collect()
    }
}

/// Durable mirror of the network
///
/// Implementations never interpret rows beyond what `StoredRow` exposes; the
/// editor decides which rows to append and which to filter out.
pub trait RecordStore {
    /// Read every data row, skipping the header
    ///
    /// # Errors
    /// Returns an error if the record exists but cannot be read
    fn read_all(&self) -> Result<RecordSet>;

    /// Append one row
    ///
    /// # Errors
    /// Returns an error if the row cannot be written
    fn append(&mut self, row: &StoredRow) -> Result<()>;

    /// Rewrite the record keeping only rows for which `keep` returns true
    ///
    /// Malformed rows are always kept. Returns the number of rows dropped.
    ///
    /// # Errors
    /// Returns an error if the record cannot be read or replaced
    fn rewrite_filtered(&mut self, keep: &dyn Fn(&StoredRow) -> bool) -> Result<usize>;
}
