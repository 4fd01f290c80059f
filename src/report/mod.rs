//! Reporting utilities: residuals and formatted terminal output.

pub mod format;

pub use format::*;

use serde::Serialize;

use crate::data::DataSet;
use crate::domain::ModelKind;
use crate::error::FitError;
use crate::models::{check_param_count, predict_unchecked};

/// A per-point fitted result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointResidual {
    pub t: f64,
    pub y_obs: f64,
    pub y_fit: f64,
    /// `y_obs - y_fit`
    pub residual: f64,
}

/// Compute fitted values and residuals for each point.
pub fn compute_residuals(
    data: &DataSet,
    model: ModelKind,
    params: &[f64],
) -> Result<Vec<PointResidual>, FitError> {
    check_param_count(model, params)?;
    let mut out = Vec::with_capacity(data.len());
    for (index, (t, y_obs)) in data.iter().enumerate() {
        let y_fit = predict_unchecked(model, t, params);
        if !y_fit.is_finite() {
            return Err(FitError::SingularModel { index, t });
        }
        out.push(PointResidual {
            t,
            y_obs,
            y_fit,
            residual: y_obs - y_fit,
        });
    }
    Ok(out)
}
