//! Church relationship management core: visit rating engine, rating workflow, and
//! the configuration, telemetry, and error plumbing shared with the API service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod visits;
