//! Ordinary least-squares line fit.
//!
//! Used to seed the nonlinear fits: for the hyperbolic model `1/y` is linear in
//! `t`, so a straight-line regression on the transformed data gives a starting
//! point that is exact for noise-free samples.
//!
//! The normal equations are avoided; the design matrix `[1, x]` is solved via
//! SVD, which also copes with tall systems and reports rank deficiency.

use nalgebra::{DMatrix, DVector};

/// Singular values below this (relative to the problem) are treated as zero.
const SVD_EPS: f64 = 1e-12;

/// Fit `y ≈ intercept + slope * x`.
///
/// Returns `None` with fewer than two points, mismatched lengths, all `x`
/// identical, or a non-finite solution.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let x_min = x.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if x_max <= x_min {
        return None;
    }

    let design = DMatrix::from_fn(x.len(), 2, |i, j| if j == 0 { 1.0 } else { x[i] });
    let rhs = DVector::from_column_slice(y);

    let beta = design.svd(true, true).solve(&rhs, SVD_EPS).ok()?;
    if beta.iter().all(|v| v.is_finite()) {
        Some((beta[0], beta[1]))
    } else {
        None
    }
}
