//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - model and verbosity enums (`ModelKind`, `Verbosity`)
//! - fit outputs (`FitStatus`, `FitReport`)
//! - the CLI run configuration (`FitConfig`)

pub mod types;

pub use types::*;
