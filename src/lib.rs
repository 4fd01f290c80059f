//! `lm-curves` library crate.
//!
//! Evaluates a hyperbolic model `1 / (p0 + p1 t)` and an exponential-saturation
//! model `1 / (p0 + p1 (1 - exp(-t / p2)))`, and fits either to `(t, y)` data
//! with Levenberg-Marquardt.
//!
//! The binary (`lmc`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fit drivers are reusable from other crates

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod models;
pub mod report;

pub use data::DataSet;
pub use domain::{FitReport, FitStatus, ModelKind, Verbosity};
pub use error::FitError;
pub use fit::{FitOptions, fit_auto, fit_exp, fit_hyper, fit_model};
pub use models::{exponential, hyperbolic, predict};
