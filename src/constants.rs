/// Additive cost charged when consecutive hops change line
pub const TRANSFER_PENALTY: f64 = 3.0;

/// Default soft limit on the number of stations in a network
pub const DEFAULT_STATION_CAPACITY: usize = 1000;

/// Fare charged for any trip up to `BASE_FARE_DISTANCE_KM`
pub const BASE_FARE: u32 = 1400;

/// Distance covered by the base fare
pub const BASE_FARE_DISTANCE_KM: f64 = 10.0;

/// Length of each surcharge block beyond the base distance
pub const FARE_BLOCK_KM: f64 = 5.0;

/// Surcharge per started block
pub const FARE_BLOCK_SURCHARGE: u32 = 100;

/// Default location of the persisted network record
pub const DEFAULT_RECORD_PATH: &str = "subway_line.csv";

/// Header row of the persisted network record
pub const RECORD_HEADER: [&str; 5] = ["line", "from", "to", "distance", "time"];

/// Hour at which service stops for the night (01:00)
pub const SERVICE_CLOSED_FROM_HOUR: u32 = 1;

/// Hour at which service resumes (05:00)
pub const SERVICE_REOPEN_HOUR: u32 = 5;

