mod connection;
mod station;
mod transit_network;

pub use connection::Connection;
pub use station::StationNode;
pub use transit_network::{
    Bridge, Connections, LineRemoval, LoadSummary, Mutations, Routes, StationRemoval, Stations,
    TransitNetwork,
};
