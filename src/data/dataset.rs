//! Validated `(t, y)` observation sets.
//!
//! A `DataSet` holds two parallel sequences of equal, non-zero length with only
//! finite values. All checks happen at construction so fitting code can index
//! freely.

use crate::error::FitError;

#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    t: Vec<f64>,
    y: Vec<f64>,
}

impl DataSet {
    pub fn new(t: Vec<f64>, y: Vec<f64>) -> Result<Self, FitError> {
        if t.len() != y.len() {
            return Err(FitError::input(format!(
                "t and y must have the same length (t={}, y={})",
                t.len(),
                y.len()
            )));
        }
        if t.is_empty() {
            return Err(FitError::input("no data points"));
        }
        if let Some(i) = t.iter().position(|v| !v.is_finite()) {
            return Err(FitError::input(format!("t[{i}] is not finite ({})", t[i])));
        }
        if let Some(i) = y.iter().position(|v| !v.is_finite()) {
            return Err(FitError::input(format!("y[{i}] is not finite ({})", y[i])));
        }
        Ok(Self { t, y })
    }

    pub fn from_slices(t: &[f64], y: &[f64]) -> Result<Self, FitError> {
        Self::new(t.to_vec(), y.to_vec())
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn t(&self) -> &[f64] {
        &self.t
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.t.iter().copied().zip(self.y.iter().copied())
    }

    /// Keep the points with `start <= t < end`, in their original order.
    pub fn window(&self, start: f64, end: f64) -> Result<Self, FitError> {
        if start.is_nan() || end.is_nan() || end <= start {
            return Err(FitError::input(format!(
                "invalid fit window [{start}, {end})"
            )));
        }
        let (t, y): (Vec<f64>, Vec<f64>) = self.iter().filter(|&(t, _)| t >= start && t < end).unzip();
        if t.is_empty() {
            return Err(FitError::input(format!(
                "fit window [{start}, {end}) contains no data points"
            )));
        }
        Ok(Self { t, y })
    }

    /// The first `k` points, clamped to `1..=len`.
    pub fn head(&self, k: usize) -> Self {
        let k = k.clamp(1, self.len());
        Self {
            t: self.t[..k].to_vec(),
            y: self.y[..k].to_vec(),
        }
    }
}
