//! Solver configuration for a single fit.

use levenberg_marquardt::LevenbergMarquardt;

use crate::domain::Verbosity;
use crate::error::FitError;

/// Default tolerance for `ftol`, `xtol` and `gtol` (the classic MINPACK
/// double-precision user tolerance).
pub const DEFAULT_TOL: f64 = 30.0 * f64::EPSILON;
pub const DEFAULT_STEPBOUND: f64 = 100.0;
/// The solver gives up after `patience * (n + 1)` residual evaluations.
pub const DEFAULT_PATIENCE: usize = 100;

/// Options that affect how a model is fitted.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    /// Relative error desired in the sum of squares.
    pub ftol: f64,
    /// Relative error between two consecutive parameter iterates.
    pub xtol: f64,
    /// Orthogonality desired between the residuals and the Jacobian columns.
    pub gtol: f64,
    /// Factor for the initial step bound.
    pub stepbound: f64,
    pub patience: usize,
    /// Rescale parameters internally by the Jacobian column norms.
    pub scale_diag: bool,
    pub verbosity: Verbosity,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            ftol: DEFAULT_TOL,
            xtol: DEFAULT_TOL,
            gtol: DEFAULT_TOL,
            stepbound: DEFAULT_STEPBOUND,
            patience: DEFAULT_PATIENCE,
            scale_diag: true,
            verbosity: Verbosity::Quiet,
        }
    }
}

impl FitOptions {
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Set `ftol`, `xtol` and `gtol` at once.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.ftol = tol;
        self.xtol = tol;
        self.gtol = tol;
        self
    }

    pub fn validate(&self) -> Result<(), FitError> {
        for (name, value) in [("ftol", self.ftol), ("xtol", self.xtol), ("gtol", self.gtol)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FitError::InvalidOptions(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        if !(self.stepbound.is_finite() && self.stepbound > 0.0) {
            return Err(FitError::InvalidOptions(format!(
                "stepbound must be finite and > 0, got {}",
                self.stepbound
            )));
        }
        if self.patience == 0 {
            return Err(FitError::InvalidOptions("patience must be > 0".to_string()));
        }
        Ok(())
    }

    /// Build the solver. The `with_*` setters of the solver panic on
    /// out-of-range values, so validation runs first.
    pub(crate) fn solver(&self) -> Result<LevenbergMarquardt<f64>, FitError> {
        self.validate()?;
        Ok(LevenbergMarquardt::new()
            .with_ftol(self.ftol)
            .with_xtol(self.xtol)
            .with_gtol(self.gtol)
            .with_stepbound(self.stepbound)
            .with_patience(self.patience)
            .with_scale_diag(self.scale_diag))
    }
}
