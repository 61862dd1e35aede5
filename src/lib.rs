pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod hazard;
pub mod location;
pub mod map;
pub mod report;
pub mod search;
pub mod sensor;
pub mod stats;
pub mod visibility;

pub use error::*;
pub use location::*;
