//! Starting points estimated from the data.
//!
//! - Hyperbolic: `1/y = p0 + p1 t`, so a straight-line fit of `1/y` on `t`
//!   over the first few points gives `[p0, p1]` directly.
//! - Exponential: for `t ≪ p2`, `1 - exp(-t/p2) ≈ t/p2`, so the early points
//!   look hyperbolic with slope `p1/p2`. We fit the hyperbolic model on the
//!   first few points and place `p2` far out at a fixed time scale.

use crate::data::DataSet;
use crate::domain::{FitStatus, ModelKind};
use crate::error::FitError;
use crate::fit::fitter::fit_model;
use crate::fit::options::FitOptions;
use crate::math::fit_line;

/// Points used for the linearized hyperbolic estimate.
const HYPER_GUESS_POINTS: usize = 10;
/// Points used for the hyperbolic sub-fit that seeds the exponential model.
const EXP_GUESS_POINTS: usize = 6;
/// Initial `p2`; `p1` is scaled by the same factor to keep `p1/p2` fixed.
const EXP_TIME_SCALE: f64 = 100.0;

/// Starting point for `model`, as a parameter vector of the model's arity.
pub fn initial_guess(model: ModelKind, data: &DataSet, opts: &FitOptions) -> Result<Vec<f64>, FitError> {
    match model {
        ModelKind::Hyperbolic => guess_hyperbolic(data).map(|p| p.to_vec()),
        ModelKind::Exponential => guess_exponential(data, opts).map(|p| p.to_vec()),
    }
}

/// Regress `1/y` on `t` over the first points. Samples with `y = 0` are skipped.
pub fn guess_hyperbolic(data: &DataSet) -> Result<[f64; 2], FitError> {
    let head = data.head(HYPER_GUESS_POINTS);
    let (t, inv_y): (Vec<f64>, Vec<f64>) = head
        .iter()
        .map(|(t, y)| (t, 1.0 / y))
        .filter(|(_, z)| z.is_finite())
        .unzip();

    let (intercept, slope) = fit_line(&t, &inv_y).ok_or_else(|| {
        FitError::input(format!(
            "cannot estimate a starting point: need two distinct t with non-zero y among the first {HYPER_GUESS_POINTS} points"
        ))
    })?;
    Ok([intercept, slope])
}

/// Hyperbolic fit on the first points, lifted to `[b0, 100 b1, 100]`.
///
/// Falls back to the linearized hyperbolic estimate when the sub-fit breaks
/// down numerically or its start is singular.
pub fn guess_exponential(data: &DataSet, opts: &FitOptions) -> Result<[f64; 3], FitError> {
    let head = data.head(EXP_GUESS_POINTS);
    let linear = guess_hyperbolic(&head)?;

    let mut refined = linear;
    let [b0, b1] = match fit_model(ModelKind::Hyperbolic, &mut refined, &head, opts) {
        Ok(report) if report.status != FitStatus::NumericalFailure => refined,
        Ok(_) | Err(FitError::SingularModel { .. }) => linear,
        Err(e) => return Err(e),
    };

    Ok([b0, b1 * EXP_TIME_SCALE, EXP_TIME_SCALE])
}
