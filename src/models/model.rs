//! Model evaluation for the hyperbolic and exponential-saturation models.
//!
//! The fitter relies on two primitive operations:
//! - predict `y(t)` given a parameter vector (for residuals and reports)
//! - fill the Jacobian row `∂y/∂p` for a given `t` (for the solver)
//!
//! Both are implemented here for each model kind. The typed evaluators take
//! fixed-size arrays; the slice-based dispatchers check the length and return
//! `FitError::InvalidParameterCount` instead of reading out of bounds.
//!
//! Zero denominators are not guarded: they produce `inf`/`NaN`, and the callers
//! (fit drivers, sample generation, reports) decide what to do with them.

use crate::domain::ModelKind;
use crate::error::FitError;

/// `1 / (p0 + p1 t)`
pub fn hyperbolic(t: f64, p: &[f64; 2]) -> f64 {
    1.0 / (p[0] + p[1] * t)
}

/// `1 / (p0 + p1 (1 - exp(-t / p2)))`
pub fn exponential(t: f64, p: &[f64; 3]) -> f64 {
    1.0 / (p[0] + p[1] * (1.0 - (-t / p[2]).exp()))
}

/// Check that `params` has the arity of `model`.
pub fn check_param_count(model: ModelKind, params: &[f64]) -> Result<(), FitError> {
    let expected = model.param_count();
    if params.len() != expected {
        return Err(FitError::InvalidParameterCount {
            model,
            expected,
            actual: params.len(),
        });
    }
    Ok(())
}

/// Predict `y(t)` for the given model kind.
pub fn predict(model: ModelKind, t: f64, params: &[f64]) -> Result<f64, FitError> {
    check_param_count(model, params)?;
    Ok(predict_unchecked(model, t, params))
}

/// Same as [`predict`] for callers that validated `params` once up front.
///
/// # Panics
/// Panics if `params` is shorter than `model.param_count()`.
pub(crate) fn predict_unchecked(model: ModelKind, t: f64, params: &[f64]) -> f64 {
    match model {
        ModelKind::Hyperbolic => hyperbolic(t, &[params[0], params[1]]),
        ModelKind::Exponential => exponential(t, &[params[0], params[1], params[2]]),
    }
}

/// Fill the Jacobian row `∂y/∂p_k` at `t` for the given model kind.
///
/// With `D` the model's denominator, every partial is `-(∂D/∂p_k) / D²`.
/// Both `params` and `out` must have the model's arity.
pub fn fill_jacobian_row(model: ModelKind, t: f64, params: &[f64], out: &mut [f64]) -> Result<(), FitError> {
    check_param_count(model, params)?;
    if out.len() != params.len() {
        return Err(FitError::input(format!(
            "Jacobian row for the {model} model needs {} slots, got {}",
            params.len(),
            out.len()
        )));
    }
    match model {
        ModelKind::Hyperbolic => {
            let d = params[0] + params[1] * t;
            let inv_d2 = 1.0 / (d * d);
            out[0] = -inv_d2;
            out[1] = -t * inv_d2;
        }
        ModelKind::Exponential => {
            let (p1, p2) = (params[1], params[2]);
            let decay = (-t / p2).exp();
            let rise = 1.0 - decay;
            let d = params[0] + p1 * rise;
            let inv_d2 = 1.0 / (d * d);
            out[0] = -inv_d2;
            out[1] = -rise * inv_d2;
            // ∂D/∂p2 = -p1 t exp(-t/p2) / p2²
            out[2] = p1 * t * decay / (p2 * p2) * inv_d2;
        }
    }
    Ok(())
}
