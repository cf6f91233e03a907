use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::StringRecord;

use super::{MalformedRow, RecordEntry, RecordSet, RecordStore, StoredRow};
use crate::constants::RECORD_HEADER;
use crate::error::{NetworkError, Result};

/// Comma-separated record on disk
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    path: PathBuf,
}

impl CsvRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path used while rewriting, swapped in by rename
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn is_empty_or_missing(&self) -> bool {
        fs::metadata(&self.path).map_or(true, |meta| meta.len() == 0)
    }

    /// True when the last row was written without a terminating newline
    fn lacks_final_newline(&self) -> Result<bool> {
        if self.is_empty_or_missing() {
            return Ok(false);
        }
        let mut file = File::open(&self.path).map_err(|e| NetworkError::io(&self.path, e))?;
        let mut last = [0_u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .map_err(|e| NetworkError::io(&self.path, e))?;
        Ok(last[0] != b'\n')
    }
}

impl RecordStore for CsvRecordStore {
    fn read_all(&self) -> Result<RecordSet> {
        if !self.path.exists() {
            log::warn!("record '{}' does not exist, starting empty", self.path.display());
            return Ok(RecordSet::default());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut set = RecordSet::default();
        for result in reader.byte_records() {
            let raw = result?;
            let line = raw.position().map_or(0, csv::Position::line);

            let parsed = StringRecord::from_byte_record(raw.clone())
                .map_err(|e| NetworkError::MalformedRecordRow {
                    line,
                    reason: e.to_string(),
                })
                .and_then(|record| StoredRow::parse(&record, line));
            match parsed {
                Ok(row) => set.entries.push(RecordEntry::Row(row)),
                Err(error) => {
                    log::warn!("skipping {error}");
                    set.entries.push(RecordEntry::Malformed(MalformedRow { fields: raw, error }));
                }
            }
        }

        Ok(set)
    }

    fn append(&mut self, row: &StoredRow) -> Result<()> {
        let write_header = self.is_empty_or_missing();
        let terminate_last = self.lacks_final_newline()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| NetworkError::io(&self.path, e))?;
        if terminate_last {
            file.write_all(b"\n").map_err(|e| NetworkError::io(&self.path, e))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if write_header {
            writer.write_record(RECORD_HEADER)?;
        }
        writer.write_record(row.to_fields())?;
        writer.flush().map_err(|e| NetworkError::io(&self.path, e))
    }

    fn rewrite_filtered(&mut self, keep: &dyn Fn(&StoredRow) -> bool) -> Result<usize> {
        let set = self.read_all()?;
        let temp_path = self.temp_path();

        let mut dropped = 0;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(&temp_path)?;
            writer.write_record(RECORD_HEADER)?;

            for entry in &set.entries {
                match entry {
                    RecordEntry::Row(row) if keep(row) => writer.write_record(row.to_fields())?,
                    RecordEntry::Row(_) => dropped += 1,
                    RecordEntry::Malformed(row) => writer.write_byte_record(&row.fields)?,
                }
            }

            let mut file = writer
                .into_inner()
                .map_err(|e| NetworkError::io(&temp_path, e.into_error()))?;
            file.flush().map_err(|e| NetworkError::io(&temp_path, e))?;
            file.sync_all().map_err(|e| NetworkError::io(&temp_path, e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| NetworkError::io(&self.path, e))?;
        log::debug!(
            "rewrote '{}', dropped {dropped} row(s)",
            self.path.display()
        );
        Ok(dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(content: &str) -> (tempfile::TempDir, CsvRecordStore) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("subway_line.csv");
        fs::write(&path, content).expect("Failed to write record");
        (dir, CsvRecordStore::new(path))
    }

    #[test]
    fn test_read_skips_header_and_malformed_rows() {
        let (_dir, store) = store_with(
            "line,from,to,distance,time\n1,A,B,2,5\n1,A\n2, B , C ,3,4\n",
        );
        let set = store.read_all().expect("Failed to read");

        assert_eq!(set.malformed_count(), 1);
        let rows: Vec<_> = set.rows().cloned().collect();
        assert_eq!(
            rows,
            vec![
                StoredRow::link(1, "A", "B", 2.0, 5.0),
                StoredRow::link(2, "B", "C", 3.0, 4.0),
            ]
        );
    }

    #[test]
    fn test_missing_record_reads_empty() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = CsvRecordStore::new(dir.path().join("absent.csv"));
        let set = store.read_all().expect("Failed to read");
        assert!(set.entries.is_empty());
    }

    #[test]
    fn test_append_creates_header_once() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("record.csv");
        let mut store = CsvRecordStore::new(&path);

        store
            .append(&StoredRow::link(1, "A", "B", 2.0, 5.0))
            .expect("Failed to append");
        store
            .append(&StoredRow::Station("C".to_string()))
            .expect("Failed to append");

        let content = fs::read_to_string(&path).expect("Failed to read back");
        assert_eq!(content, "line,from,to,distance,time\n1,A,B,2,5\n,C,,,\n");
    }

    #[test]
    fn test_rewrite_filtered_keeps_header_and_malformed_rows() {
        let (_dir, mut store) = store_with(
            "line,from,to,distance,time\n1,A,B,2,5\nbroken,row\n2,B,C,3,4\n",
        );

        let dropped = store
            .rewrite_filtered(&|row: &StoredRow| row.line() != Some(1))
            .expect("Failed to rewrite");
        assert_eq!(dropped, 1);

        let content = fs::read_to_string(store.path()).expect("Failed to read back");
        assert_eq!(content, "line,from,to,distance,time\nbroken,row\n2,B,C,3,4\n");
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_rewrite_filtered_keeps_undecodable_rows() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("subway_line.csv");
        // "Gangnam" in cp949 is not valid UTF-8
        let mut content = b"line,from,to,distance,time\n1,A,B,1,1\n2,".to_vec();
        content.extend_from_slice(&[0xB0, 0xAD, 0xB3, 0xB2]);
        content.extend_from_slice(b",C,1,1\n");
        fs::write(&path, &content).expect("Failed to write record");
        let mut store = CsvRecordStore::new(&path);

        let set = store.read_all().expect("Failed to read");
        assert_eq!(set.malformed_count(), 1);
        assert_eq!(set.rows().count(), 1);

        store
            .rewrite_filtered(&|row: &StoredRow| row.line() != Some(1))
            .expect("Failed to rewrite");

        let mut expected = b"line,from,to,distance,time\n2,".to_vec();
        expected.extend_from_slice(&[0xB0, 0xAD, 0xB3, 0xB2]);
        expected.extend_from_slice(b",C,1,1\n");
        assert_eq!(fs::read(&path).expect("Failed to read back"), expected);
    }

    #[test]
    fn test_append_terminates_unfinished_last_row() {
        let (_dir, mut store) = store_with("line,from,to,distance,time\n1,A,B,1,1");

        store
            .append(&StoredRow::link(2, "B", "C", 1.0, 1.0))
            .expect("Failed to append");

        let content = fs::read_to_string(store.path()).expect("Failed to read back");
        assert_eq!(content, "line,from,to,distance,time\n1,A,B,1,1\n2,B,C,1,1\n");

        let set = store.read_all().expect("Failed to read");
        assert_eq!(set.malformed_count(), 0);
        assert_eq!(
            set.into_rows(),
            vec![
                StoredRow::link(1, "A", "B", 1.0, 1.0),
                StoredRow::link(2, "B", "C", 1.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_glued_rows_read_as_malformed() {
        let (_dir, store) = store_with("line,from,to,distance,time\n1,A,B,1,12,B,C,1,1\n");
        let set = store.read_all().expect("Failed to read");
        assert_eq!(set.rows().count(), 0);
        assert_eq!(set.malformed_count(), 1);
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut store = CsvRecordStore::new(dir.path().join("record.csv"));
        let row = StoredRow::link(3, "Seoul Nat'l Univ., Gate", "Nakseongdae", 1.25, 2.0);

        store.append(&row).expect("Failed to append");
        let rows = store.read_all().expect("Failed to read").into_rows();
        assert_eq!(rows, vec![row]);
    }
}
