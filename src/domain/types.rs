//! Shared domain types.
//!
//! These types are kept lightweight and serializable so a fit result can be:
//!
//! - inspected in-memory by library callers
//! - printed as JSON by the CLI

use clap::ValueEnum;
use serde::Serialize;

/// Which closed-form model to evaluate or fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
pub enum ModelKind {
    /// `y = 1 / (p0 + p1 t)`
    #[serde(rename = "hyper")]
    #[value(name = "hyper", alias = "hyperbolic")]
    Hyperbolic,
    /// `y = 1 / (p0 + p1 (1 - exp(-t / p2)))`
    #[serde(rename = "exp")]
    #[value(name = "exp", alias = "exponential")]
    Exponential,
}

impl ModelKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Hyperbolic => "hyperbolic",
            ModelKind::Exponential => "exponential",
        }
    }

    /// Number of parameters the model takes.
    pub fn param_count(self) -> usize {
        match self {
            ModelKind::Hyperbolic => 2,
            ModelKind::Exponential => 3,
        }
    }

    pub fn formula(self) -> &'static str {
        match self {
            ModelKind::Hyperbolic => "1 / (p0 + p1*t)",
            ModelKind::Exponential => "1 / (p0 + p1*(1 - exp(-t/p2)))",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How much the fit drivers log while running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Verbosity {
    /// No diagnostic output.
    #[default]
    Quiet,
    /// One line when the fit starts and one when it terminates.
    Summary,
    /// Additionally log every residual evaluation (trial parameters + SSE).
    Trace,
}

/// How a fit terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStatus {
    /// The solver met one of its convergence tests.
    Converged,
    /// The evaluation budget (`patience`) ran out first.
    MaxIterationsReached,
    /// Residuals or the step became non-finite; the result is not usable.
    NumericalFailure,
}

impl FitStatus {
    pub fn is_converged(self) -> bool {
        self == FitStatus::Converged
    }

    pub fn label(self) -> &'static str {
        match self {
            FitStatus::Converged => "converged",
            FitStatus::MaxIterationsReached => "max iterations reached",
            FitStatus::NumericalFailure => "numerical failure",
        }
    }
}

/// Outcome of a single fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub model: ModelKind,
    pub status: FitStatus,
    /// Parameters the solver terminated with.
    pub params: Vec<f64>,
    /// Sum of squared residuals at `params`.
    pub sse: f64,
    /// Euclidean norm of the residual vector (`sqrt(sse)`).
    pub residual_norm: f64,
    pub rmse: f64,
    /// Number of residual evaluations the solver performed.
    pub evaluations: usize,
    pub n_points: usize,
    /// Solver's own description of why it stopped.
    pub termination: String,
}

/// A full CLI run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub model: ModelKind,
    /// Parameters used to generate the synthetic sample.
    pub truth: Vec<f64>,
    /// Starting guess; estimated from the data when absent.
    pub guess: Option<Vec<f64>>,

    pub points: usize,
    pub t_min: f64,
    pub t_max: f64,
    pub noise: f64,
    pub seed: u64,

    /// Optional fit window `[start, end)` over `t`.
    pub window_start: Option<f64>,
    pub window_end: Option<f64>,

    pub ftol: f64,
    pub xtol: f64,
    pub gtol: f64,
    pub stepbound: f64,
    pub patience: usize,
    pub verbosity: Verbosity,

    pub json: bool,
    pub show_residuals: bool,
}
