use std::path::PathBuf;

/// Failures surfaced by the network store, the path engine and persistence.
#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("station '{0}' does not exist")]
    StationNotFound(String),
    #[error("no path from '{from}' to '{to}'")]
    NoPathFound { from: String, to: String },
    #[error("station '{0}' already exists")]
    DuplicateName(String),
    #[error("station name must not be empty")]
    EmptyName,
    #[error("station capacity of {capacity} reached")]
    CapacityExceeded { capacity: usize },
    #[error("malformed record row {line}: {reason}")]
    MalformedRecordRow { line: u64, reason: String },
    #[error("invalid {field} value {value}: must be a finite, non-negative number")]
    InvalidWeight { field: &'static str, value: f64 },
    #[error("failed accessing '{}': {source}", .path.display())]
    PersistenceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("failed reading config '{}': {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, NetworkError>;

impl NetworkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PersistenceIo {
            path: path.into(),
            source,
        }
    }
}
