use csv::StringRecord;
use serde::Serialize;

use crate::constants::RECORD_HEADER;
use crate::error::{NetworkError, Result};

/// One physical link: both directions share line and weights
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkRecord {
    pub line: u32,
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StoredRow {
    Link(LinkRecord),
    /// Placeholder for a station added without connections
    Station(String),
}

impl StoredRow {
    #[must_use]
    pub fn link(line: u32, from: &str, to: &str, distance: f64, time: f64) -> Self {
        Self::Link(LinkRecord {
            line,
            from: from.to_string(),
            to: to.to_string(),
            distance,
            time,
        })
    }

    /// Line of a link row; placeholders have none
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Link(link) => Some(link.line),
            Self::Station(_) => None,
        }
    }

    /// True if `name` is an endpoint of this row
    #[must_use]
    pub fn names_station(&self, name: &str) -> bool {
        match self {
            Self::Link(link) => link.from == name || link.to == name,
            Self::Station(station) => station == name,
        }
    }

    /// True if this is a link between `a` and `b` (in either orientation) on `line`
    #[must_use]
    pub fn is_link(&self, a: &str, b: &str, line: u32) -> bool {
        match self {
            Self::Link(link) => {
                link.line == line
                    && ((link.from == a && link.to == b) || (link.from == b && link.to == a))
            }
            Self::Station(_) => false,
        }
    }

    /// Parse a data row; `line_number` is the 1-based position in the record
    ///
    /// # Errors
    /// `MalformedRecordRow` when fields are missing or do not parse
    pub fn parse(record: &StringRecord, line_number: u64) -> Result<Self> {
        let malformed = |reason: String| NetworkError::MalformedRecordRow {
            line: line_number,
            reason,
        };

        if record.len() != RECORD_HEADER.len() {
            return Err(malformed(format!(
                "expected {} fields, found {}",
                RECORD_HEADER.len(),
                record.len()
            )));
        }

        let field = |i: usize| record.get(i).map_or("", str::trim);
        let (line, from, to) = (field(0), field(1), field(2));

        if from.is_empty() {
            return Err(malformed("missing origin station".to_string()));
        }
        if line.is_empty() && to.is_empty() {
            return Ok(Self::Station(from.to_string()));
        }
        if to.is_empty() {
            return Err(malformed("missing destination station".to_string()));
        }

        let line = line
            .parse::<u32>()
            .map_err(|_| malformed(format!("invalid line '{line}'")))?;
        let distance = parse_weight(field(3), "distance").map_err(malformed)?;
        let time = parse_weight(field(4), "time").map_err(malformed)?;

        Ok(Self::Link(LinkRecord {
            line,
            from: from.to_string(),
            to: to.to_string(),
            distance,
            time,
        }))
    }

    /// Fields in record column order
    #[must_use]
    pub fn to_fields(&self) -> [String; 5] {
        match self {
            Self::Link(link) => [
                link.line.to_string(),
                link.from.clone(),
                link.to.clone(),
                link.distance.to_string(),
                link.time.to_string(),
            ],
            Self::Station(name) => [
                String::new(),
                name.clone(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }
}

fn parse_weight(value: &str, field: &str) -> std::result::Result<f64, String> {
    match value.parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight >= 0.0 => Ok(weight),
        _ => Err(format!("invalid {field} '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_link_row_trims_names() {
        let row = StoredRow::parse(&record(&["2", " Sindorim ", "Mullae", "1.5", "3"]), 2)
            .expect("Failed to parse");
        assert_eq!(row, StoredRow::link(2, "Sindorim", "Mullae", 1.5, 3.0));
    }

    #[test]
    fn test_parse_station_placeholder() {
        let row = StoredRow::parse(&record(&["", "Isolated", "", "", ""]), 3)
            .expect("Failed to parse");
        assert_eq!(row, StoredRow::Station("Isolated".to_string()));
        assert_eq!(row.line(), None);
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let err = StoredRow::parse(&record(&["1", "A", "B"]), 4).expect_err("Expected error");
        assert!(matches!(err, NetworkError::MalformedRecordRow { line: 4, .. }));
    }

    #[test]
    fn test_parse_rejects_extra_fields() {
        let glued = record(&["1", "A", "B", "1", "12", "B", "C", "1", "1"]);
        let err = StoredRow::parse(&glued, 5).expect_err("Expected error");
        match err {
            NetworkError::MalformedRecordRow { line, reason } => {
                assert_eq!(line, 5);
                assert_eq!(reason, "expected 5 fields, found 9");
            }
            other => panic!("Unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        assert!(StoredRow::parse(&record(&["x", "A", "B", "1", "1"]), 2).is_err());
        assert!(StoredRow::parse(&record(&["1", "A", "B", "far", "1"]), 2).is_err());
        assert!(StoredRow::parse(&record(&["1", "A", "B", "1", "-2"]), 2).is_err());
        assert!(StoredRow::parse(&record(&["1", "A", "", "1", "1"]), 2).is_err());
    }

    #[test]
    fn test_fields_round_trip() {
        let row = StoredRow::link(7, "Gimpo Airport", "Magongnaru", 2.25, 3.5);
        let fields = row.to_fields();
        let parsed = StoredRow::parse(&StringRecord::from(fields.to_vec()), 2)
            .expect("Failed to parse");
        assert_eq!(parsed, row);
    }

    #[test]
    fn test_link_matching() {
        let row = StoredRow::link(1, "A", "B", 1.0, 1.0);
        assert!(row.is_link("B", "A", 1));
        assert!(!row.is_link("A", "B", 2));
        assert!(row.names_station("B"));
        assert!(!row.names_station("C"));
        assert!(!StoredRow::Station("A".into()).is_link("A", "A", 1));
    }
}
