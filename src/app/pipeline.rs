//! Shared "fit pipeline" logic behind `lmc fit`.
//!
//! sample generation -> windowing -> starting point -> fit -> residuals
//!
//! The command handler can then focus on presentation.

use crate::data::{DataSet, SampleConfig, generate_sample};
use crate::domain::{FitConfig, FitReport, FitStatus};
use crate::error::AppError;
use crate::fit::{FitOptions, fit_model, initial_guess};
use crate::report::{PointResidual, compute_residuals};

/// All computed outputs of a single `lmc fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Points the model was fitted to (after windowing).
    pub data: DataSet,
    pub start: Vec<f64>,
    pub report: FitReport,
    /// Empty when the fit ended in a numerical failure.
    pub residuals: Vec<PointResidual>,
}

pub fn fit_options(config: &FitConfig) -> FitOptions {
    FitOptions {
        ftol: config.ftol,
        xtol: config.xtol,
        gtol: config.gtol,
        stepbound: config.stepbound,
        patience: config.patience,
        scale_diag: true,
        verbosity: config.verbosity,
    }
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    // 1) Generate the synthetic sample.
    let sample = generate_sample(&SampleConfig::from(config))?;

    // 2) Restrict to the fit window, if any.
    let data = match (config.window_start, config.window_end) {
        (None, None) => sample,
        (start, end) => sample.window(
            start.unwrap_or(f64::NEG_INFINITY),
            end.unwrap_or(f64::INFINITY),
        )?,
    };

    // 3) Starting point: explicit guess or estimated from the data.
    let opts = fit_options(config);
    let start = match &config.guess {
        Some(guess) => guess.clone(),
        None => initial_guess(config.model, &data, &opts)?,
    };

    // 4) Fit.
    let mut params = start.clone();
    let report = fit_model(config.model, &mut params, &data, &opts)?;

    // 5) Residuals at the fitted parameters.
    let residuals = if report.status == FitStatus::NumericalFailure {
        Vec::new()
    } else {
        compute_residuals(&data, config.model, &params)?
    };

    Ok(RunOutput {
        data,
        start,
        report,
        residuals,
    })
}
