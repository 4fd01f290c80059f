//! Mathematical utilities.

pub mod regression;

pub use regression::*;
