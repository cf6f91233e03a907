mod cost_mode;
mod fare;
mod route;

pub use cost_mode::CostMode;
pub use fare::{fare, FareTable};
pub use route::Route;
