//! Command-line parsing for the `lmc` curve fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! modeling/math code.

use clap::{Args, Parser, Subcommand};

use crate::domain::{ModelKind, Verbosity};
use crate::fit::{DEFAULT_PATIENCE, DEFAULT_STEPBOUND, DEFAULT_TOL};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lmc", version, about = "Hyperbolic / exponential-saturation curve fitter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a synthetic sample from known parameters and fit it back.
    Fit(FitArgs),
    /// Evaluate a model at the given t values.
    Eval(EvalArgs),
}

/// Options for `lmc fit`.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Model to fit (hyper, exp).
    #[arg(short, long, value_enum)]
    pub model: ModelKind,

    /// Parameters used to generate the sample, comma separated.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub truth: Vec<f64>,

    /// Starting guess, comma separated. Estimated from the data when omitted.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub guess: Option<Vec<f64>>,

    /// Number of equally spaced samples.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub points: usize,

    /// First sample position.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub t_min: f64,

    /// Last sample position.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub t_max: f64,

    /// Standard deviation of additive Gaussian noise on y.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Only fit points with t >= this value.
    #[arg(long, allow_negative_numbers = true)]
    pub window_start: Option<f64>,

    /// Only fit points with t < this value.
    #[arg(long, allow_negative_numbers = true)]
    pub window_end: Option<f64>,

    #[command(flatten)]
    pub solver: SolverArgs,

    /// Print the fit report as JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Also print the per-point residual table.
    #[arg(long)]
    pub residuals: bool,
}

/// Levenberg-Marquardt settings.
#[derive(Debug, Args, Clone)]
pub struct SolverArgs {
    /// Relative error desired in the sum of squares.
    #[arg(long, default_value_t = DEFAULT_TOL)]
    pub ftol: f64,

    /// Relative error desired in the parameters.
    #[arg(long, default_value_t = DEFAULT_TOL)]
    pub xtol: f64,

    /// Orthogonality desired between residuals and Jacobian columns.
    #[arg(long, default_value_t = DEFAULT_TOL)]
    pub gtol: f64,

    /// Factor for the initial step bound.
    #[arg(long, default_value_t = DEFAULT_STEPBOUND)]
    pub stepbound: f64,

    /// Evaluation budget: patience * (parameters + 1) residual evaluations.
    #[arg(long, default_value_t = DEFAULT_PATIENCE)]
    pub patience: usize,

    /// Solver diagnostics written to stderr.
    #[arg(short, long, value_enum, default_value_t = Verbosity::Quiet)]
    pub verbosity: Verbosity,
}

/// Options for `lmc eval`.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Model to evaluate (hyper, exp).
    #[arg(short, long, value_enum)]
    pub model: ModelKind,

    /// Model parameters, comma separated.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub params: Vec<f64>,

    /// Positions to evaluate at, comma separated.
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub t: Vec<f64>,
}
