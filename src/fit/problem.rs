//! Least-squares problem adapter for the Levenberg-Marquardt solver.
//!
//! The solver owns a `CurveProblem` during minimization: it sets trial
//! parameters, asks for residuals `r_i = model(t_i, p) - y_i` and for the
//! Jacobian `∂r_i/∂p_k`, which is the model's analytic derivative.
//!
//! Non-finite residuals or Jacobian entries are reported to the solver as a
//! failed evaluation, which makes it terminate instead of iterating on
//! `inf`/`NaN`.

use levenberg_marquardt::LeastSquaresProblem;
use log::debug;
use nalgebra::storage::Owned;
use nalgebra::{DMatrix, DVector, Dyn};

use crate::data::DataSet;
use crate::domain::{ModelKind, Verbosity};
use crate::models::{fill_jacobian_row, predict_unchecked};

#[derive(Debug, Clone)]
pub struct CurveProblem<'a> {
    model: ModelKind,
    data: &'a DataSet,
    params: DVector<f64>,
    verbosity: Verbosity,
}

impl<'a> CurveProblem<'a> {
    /// `params` must already have the model's arity.
    pub fn new(model: ModelKind, data: &'a DataSet, params: &[f64], verbosity: Verbosity) -> Self {
        Self {
            model,
            data,
            params: DVector::from_column_slice(params),
            verbosity,
        }
    }

    pub fn current_params(&self) -> &[f64] {
        self.params.as_slice()
    }

    /// Residual vector at the current parameters, without finiteness checks.
    pub fn residual_vector(&self) -> DVector<f64> {
        let p = self.params.as_slice();
        DVector::from_iterator(
            self.data.len(),
            self.data
                .iter()
                .map(|(t, y)| predict_unchecked(self.model, t, p) - y),
        )
    }

    pub fn sum_of_squares(&self) -> f64 {
        self.residual_vector().norm_squared()
    }
}

impl LeastSquaresProblem<f64, Dyn, Dyn> for CurveProblem<'_> {
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, Dyn>;
    type ParameterStorage = Owned<f64, Dyn>;

    fn set_params(&mut self, x: &DVector<f64>) {
        self.params.copy_from(x);
    }

    fn params(&self) -> DVector<f64> {
        self.params.clone()
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let r = self.residual_vector();
        let finite = r.iter().all(|v| v.is_finite());
        if self.verbosity >= Verbosity::Trace {
            debug!(
                "{} eval: params={:?} sse={:e}{}",
                self.model,
                self.params.as_slice(),
                r.norm_squared(),
                if finite { "" } else { " (non-finite residuals)" }
            );
        }
        finite.then_some(r)
    }

    fn jacobian(&self) -> Option<DMatrix<f64>> {
        let n = self.model.param_count();
        let p = self.params.as_slice();
        let mut jac = DMatrix::<f64>::zeros(self.data.len(), n);
        let mut row = vec![0.0; n];

        for (i, &t) in self.data.t().iter().enumerate() {
            fill_jacobian_row(self.model, t, p, &mut row).ok()?;
            for (j, &v) in row.iter().enumerate() {
                jac[(i, j)] = v;
            }
        }

        jac.iter().all(|v| v.is_finite()).then_some(jac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataSet {
        DataSet::from_slices(&[0.0, 1.0, 2.0], &[0.5, 0.4, 0.3]).unwrap()
    }

    #[test]
    fn residuals_are_prediction_minus_observation() {
        let data = sample();
        let problem = CurveProblem::new(ModelKind::Hyperbolic, &data, &[2.0, 0.5], Verbosity::Quiet);
        let r = problem.residuals().unwrap();
        assert_eq!(r.len(), 3);
        assert!((r[0] - 0.0).abs() < 1e-15);
        assert!((r[1] - (1.0 / 2.5 - 0.4)).abs() < 1e-15);
        assert!((r[2] - (1.0 / 3.0 - 0.3)).abs() < 1e-15);
    }

    #[test]
    fn singular_parameters_fail_the_evaluation() {
        let data = sample();
        // 1 - t = 0 at t = 1.
        let problem = CurveProblem::new(ModelKind::Hyperbolic, &data, &[1.0, -1.0], Verbosity::Quiet);
        assert!(problem.residuals().is_none());
        assert!(problem.jacobian().is_none());
        assert!(problem.sum_of_squares().is_infinite());
    }

    #[test]
    fn set_params_replaces_the_state() {
        let data = sample();
        let mut problem =
            CurveProblem::new(ModelKind::Exponential, &data, &[1.0, 2.0, 3.0], Verbosity::Quiet);
        problem.set_params(&DVector::from_column_slice(&[0.5, 1.0, 1.0]));
        assert_eq!(problem.current_params(), &[0.5, 1.0, 1.0]);
        assert_eq!(problem.params().len(), 3);

        let jac = problem.jacobian().unwrap();
        assert_eq!(jac.shape(), (3, 3));
        // At t = 0 only p0 moves the prediction.
        assert!((jac[(0, 0)] + 1.0 / 0.25).abs() < 1e-12);
        assert_eq!(jac[(0, 1)], 0.0);
        assert_eq!(jac[(0, 2)], 0.0);
    }
}
