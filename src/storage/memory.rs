use super::{RecordEntry, RecordSet, RecordStore, StoredRow};
use crate::error::Result;

/// Record kept in memory, for embedding without a file and for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    rows: Vec<StoredRow>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rows(rows: Vec<StoredRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[StoredRow] {
        &self.rows
    }
}

impl RecordStore for MemoryRecordStore {
    fn read_all(&self) -> Result<RecordSet> {
        Ok(RecordSet {
            entries: self.rows.iter().cloned().map(RecordEntry::Row).collect(),
        })
    }

    fn append(&mut self, row: &StoredRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn rewrite_filtered(&mut self, keep: &dyn Fn(&StoredRow) -> bool) -> Result<usize> {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        Ok(before - self.rows.len())
    }
}
