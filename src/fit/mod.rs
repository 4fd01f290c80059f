//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - translate `FitOptions` into a configured Levenberg-Marquardt solver
//! - adapt a model + data set to the solver's least-squares problem trait
//! - run one fit and classify how it terminated
//! - estimate starting points when the caller has none

pub mod fitter;
pub mod guess;
pub mod options;
pub mod problem;

pub use fitter::*;
pub use guess::*;
pub use options::*;
pub use problem::*;
