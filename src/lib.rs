#![allow(clippy::implicit_hasher)]
#![allow(unknown_lints)]

pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod logging;
pub mod models;
pub mod routing;
pub mod service_hours;
pub mod storage;

pub use config::NetworkConfig;
pub use editor::NetworkEditor;
pub use error::{NetworkError, Result};
pub use models::{Connections, Mutations, Routes, Stations, TransitNetwork};
pub use routing::{CostMode, Route};
