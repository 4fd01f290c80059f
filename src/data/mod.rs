//! Observation data: the validated `DataSet` container and synthetic samples.

pub mod dataset;
pub mod sample;

pub use dataset::*;
pub use sample::*;
