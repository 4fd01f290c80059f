//! Fit drivers.
//!
//! Given:
//! - a model kind
//! - a starting parameter vector (overwritten with the result)
//! - observations `(t_i, y_i)`
//! - solver options
//!
//! we validate the inputs, run Levenberg-Marquardt on
//! `Σ (model(t_i, p) - y_i)²`, and return a `FitReport` describing how the
//! solver terminated. The caller's parameter vector receives the solver's
//! estimate unless the run ended in a numerical failure, in which case it keeps
//! the starting guess.

use levenberg_marquardt::TerminationReason;
use log::info;

use crate::data::DataSet;
use crate::domain::{FitReport, FitStatus, ModelKind, Verbosity};
use crate::error::FitError;
use crate::fit::guess::initial_guess;
use crate::fit::options::FitOptions;
use crate::fit::problem::CurveProblem;
use crate::models::{check_param_count, predict_unchecked};

/// Fit the hyperbolic model `1 / (p0 + p1 t)`.
///
/// `par` must hold 2 values and `t` / `y` must have the same length `m >= 2`.
pub fn fit_hyper(par: &mut [f64], t: &[f64], y: &[f64], opts: &FitOptions) -> Result<FitReport, FitError> {
    let data = DataSet::from_slices(t, y)?;
    fit_model(ModelKind::Hyperbolic, par, &data, opts)
}

/// Fit the exponential-saturation model `1 / (p0 + p1 (1 - exp(-t / p2)))`.
///
/// `par` must hold 3 values and `t` / `y` must have the same length `m >= 3`.
pub fn fit_exp(par: &mut [f64], t: &[f64], y: &[f64], opts: &FitOptions) -> Result<FitReport, FitError> {
    let data = DataSet::from_slices(t, y)?;
    fit_model(ModelKind::Exponential, par, &data, opts)
}

/// Fit `model` to `data`, starting from and writing back to `par`.
pub fn fit_model(
    model: ModelKind,
    par: &mut [f64],
    data: &DataSet,
    opts: &FitOptions,
) -> Result<FitReport, FitError> {
    check_param_count(model, par)?;
    if let Some(k) = par.iter().position(|v| !v.is_finite()) {
        return Err(FitError::input(format!("initial p{k} is not finite ({})", par[k])));
    }
    let n = par.len();
    let m = data.len();
    if m < n {
        return Err(FitError::input(format!(
            "{model} fit needs at least {n} data points, got {m}"
        )));
    }
    let solver = opts.solver()?;
    check_start(model, par, data)?;

    if opts.verbosity >= Verbosity::Summary {
        info!("fitting {model} model: n={n} m={m} start={par:?}");
    }

    let problem = CurveProblem::new(model, data, par, opts.verbosity);
    let (problem, solver_report) = solver.minimize(problem);

    let status = classify(&solver_report.termination)?;
    let params = problem.current_params().to_vec();
    let sse = problem.sum_of_squares();

    if status != FitStatus::NumericalFailure {
        par.copy_from_slice(&params);
    }

    let report = FitReport {
        model,
        status,
        params,
        sse,
        residual_norm: sse.sqrt(),
        rmse: (sse / m as f64).sqrt(),
        evaluations: solver_report.number_of_evaluations,
        n_points: m,
        termination: describe(&solver_report.termination, opts.patience, n),
    };

    if opts.verbosity >= Verbosity::Summary {
        info!(
            "{model} fit {}: params={:?} sse={:e} evaluations={} ({})",
            report.status.label(),
            report.params,
            report.sse,
            report.evaluations,
            report.termination
        );
    }

    Ok(report)
}

/// Estimate a starting point from the data, then fit.
pub fn fit_auto(model: ModelKind, data: &DataSet, opts: &FitOptions) -> Result<FitReport, FitError> {
    let mut par = initial_guess(model, data, opts)?;
    fit_model(model, &mut par, data, opts)
}

/// Reject a starting guess whose prediction is not finite at some sample.
///
/// The solver cannot recover from a non-finite first evaluation, so this is
/// reported up front with the offending sample.
fn check_start(model: ModelKind, par: &[f64], data: &DataSet) -> Result<(), FitError> {
    for (index, &t) in data.t().iter().enumerate() {
        if !predict_unchecked(model, t, par).is_finite() {
            return Err(FitError::SingularModel { index, t });
        }
    }
    Ok(())
}

fn classify(reason: &TerminationReason) -> Result<FitStatus, FitError> {
    match reason {
        TerminationReason::Converged { .. }
        | TerminationReason::ResidualsZero
        | TerminationReason::Orthogonal
        | TerminationReason::NoImprovementPossible(_) => Ok(FitStatus::Converged),
        TerminationReason::LostPatience => Ok(FitStatus::MaxIterationsReached),
        TerminationReason::NoParameters
        | TerminationReason::NoResiduals
        | TerminationReason::WrongDimensions(_) => {
            Err(FitError::input(format!("solver rejected the problem: {reason:?}")))
        }
        _ => Ok(FitStatus::NumericalFailure),
    }
}

fn describe(reason: &TerminationReason, patience: usize, n: usize) -> String {
    match reason {
        TerminationReason::Converged { ftol: true, xtol: true } => {
            "relative change in sum of squares and in parameters is at most tol".to_string()
        }
        TerminationReason::Converged { ftol: true, .. } => {
            "relative change in sum of squares is at most ftol".to_string()
        }
        TerminationReason::Converged { .. } => {
            "relative change in parameters is at most xtol".to_string()
        }
        TerminationReason::ResidualsZero => "sum of squares below underflow limit".to_string(),
        TerminationReason::Orthogonal => {
            "residuals orthogonal to the Jacobian to machine precision (gtol)".to_string()
        }
        TerminationReason::NoImprovementPossible(what) => {
            format!("{what} is too small, no further improvement possible")
        }
        TerminationReason::LostPatience => format!(
            "gave up after {} residual evaluations",
            patience.saturating_mul(n + 1)
        ),
        TerminationReason::User(what) => format!("non-finite {what} during iteration"),
        TerminationReason::Numerical(what) => format!("numerical breakdown in {what}"),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SampleConfig, generate_sample};
    use crate::models::{exponential, hyperbolic};

    #[test]
    fn hyperbolic_recovers_true_parameters() {
        let truth = [2.0, 0.5];
        let t: Vec<f64> = (0..10u32).map(f64::from).collect();
        let y: Vec<f64> = t.iter().map(|&ti| hyperbolic(ti, &truth)).collect();

        let mut par = [1.0, 1.0];
        let report = fit_hyper(&mut par, &t, &y, &FitOptions::default()).unwrap();

        assert_eq!(report.status, FitStatus::Converged, "{}", report.termination);
        for (got, want) in par.iter().zip(truth.iter()) {
            assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
        }
        assert_eq!(report.params, par.to_vec());
        assert_eq!(report.n_points, 10);
        assert!(report.sse < 1e-16);
        assert!(report.evaluations > 0);
    }

    #[test]
    fn exponential_recovers_true_parameters() {
        let truth = [1.0, 2.0, 3.0];
        let t: Vec<f64> = (0..20u32).map(|i| 10.0 * f64::from(i) / 19.0).collect();
        let y: Vec<f64> = t.iter().map(|&ti| exponential(ti, &truth)).collect();

        let mut par = [0.5, 1.0, 1.0];
        let report = fit_exp(&mut par, &t, &y, &FitOptions::default()).unwrap();

        assert_eq!(report.status, FitStatus::Converged, "{}", report.termination);
        for (got, want) in par.iter().zip(truth.iter()) {
            assert!((got - want).abs() < 1e-4, "got {got}, want {want}");
        }
        assert!((report.residual_norm - report.sse.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn fewer_points_than_parameters_is_invalid_input() {
        let mut par = [1.0, 2.0, 3.0];
        let err = fit_exp(&mut par, &[0.0, 1.0], &[1.0, 0.5], &FitOptions::default()).unwrap_err();
        assert!(matches!(err, FitError::InvalidInput(_)), "{err}");
        assert_eq!(par, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn wrong_arity_and_mismatched_data_are_rejected() {
        let opts = FitOptions::default();
        let mut three = [1.0, 2.0, 3.0];
        let err = fit_hyper(&mut three, &[0.0, 1.0, 2.0], &[1.0, 0.5, 0.3], &opts).unwrap_err();
        assert!(matches!(err, FitError::InvalidParameterCount { expected: 2, actual: 3, .. }));

        let mut two = [1.0, 1.0];
        let err = fit_hyper(&mut two, &[0.0, 1.0, 2.0], &[1.0, 0.5], &opts).unwrap_err();
        assert!(matches!(err, FitError::InvalidInput(_)));
    }

    #[test]
    fn singular_starting_guess_is_reported() {
        // 1 - t = 0 at t = 1.
        let mut par = [1.0, -1.0];
        let err = fit_hyper(&mut par, &[0.0, 1.0, 2.0], &[1.0, 0.5, 0.3], &FitOptions::default())
            .unwrap_err();
        assert_eq!(err, FitError::SingularModel { index: 1, t: 1.0 });
    }

    #[test]
    fn exhausted_budget_is_not_reported_as_converged() {
        let t: Vec<f64> = (0..10u32).map(f64::from).collect();
        let y: Vec<f64> = t.iter().map(|&ti| hyperbolic(ti, &[2.0, 0.5])).collect();

        let mut par = [1.0, 1.0];
        let opts = FitOptions::default().with_patience(1);
        let report = fit_hyper(&mut par, &t, &y, &opts).unwrap();

        assert_eq!(report.status, FitStatus::MaxIterationsReached);
        assert!(report.evaluations > 0);
        // Best effort so far is still written back.
        assert_eq!(report.params, par.to_vec());
    }

    #[test]
    fn invalid_options_are_rejected_before_solving() {
        let mut par = [1.0, 1.0];
        let opts = FitOptions::default().with_patience(0);
        let err = fit_hyper(&mut par, &[0.0, 1.0], &[1.0, 0.5], &opts).unwrap_err();
        assert!(matches!(err, FitError::InvalidOptions(_)));
    }

    #[test]
    fn solver_failures_map_to_statuses() {
        assert_eq!(
            classify(&TerminationReason::Numerical("jacobian")).unwrap(),
            FitStatus::NumericalFailure
        );
        assert_eq!(
            classify(&TerminationReason::User("residuals")).unwrap(),
            FitStatus::NumericalFailure
        );
        assert_eq!(classify(&TerminationReason::Orthogonal).unwrap(), FitStatus::Converged);
        assert_eq!(
            classify(&TerminationReason::NoImprovementPossible("xtol")).unwrap(),
            FitStatus::Converged
        );
        assert!(classify(&TerminationReason::NoResiduals).is_err());
    }

    #[test]
    fn auto_fit_of_exact_hyperbolic_data_starts_at_the_answer() {
        let data = generate_sample(&SampleConfig::exact(ModelKind::Hyperbolic, &[2.0, 0.5], 25, 0.0, 12.0))
            .unwrap();
        let opts = FitOptions::default().with_verbosity(Verbosity::Trace);
        let report = fit_auto(ModelKind::Hyperbolic, &data, &opts).unwrap();
        assert_eq!(report.status, FitStatus::Converged);
        assert!((report.params[0] - 2.0).abs() < 1e-9);
        assert!((report.params[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn noisy_fit_reduces_the_sum_of_squares() {
        let mut config = SampleConfig::exact(ModelKind::Hyperbolic, &[2.0, 0.5], 40, 0.0, 20.0);
        config.noise = 0.002;
        config.seed = 11;
        let data = generate_sample(&config).unwrap();

        let start = [1.5, 0.8];
        let start_sse = CurveProblem::new(ModelKind::Hyperbolic, &data, &start, Verbosity::Quiet)
            .sum_of_squares();

        let mut par = start;
        let report = fit_model(ModelKind::Hyperbolic, &mut par, &data, &FitOptions::default()).unwrap();
        assert!(report.status != FitStatus::NumericalFailure);
        assert!(report.sse < start_sse);
        assert!((par[0] - 2.0).abs() < 0.1, "p0 = {}", par[0]);
        assert!((par[1] - 0.5).abs() < 0.05, "p1 = {}", par[1]);
    }

    #[test]
    fn zero_tolerance_still_writes_back_the_optimum() {
        let truth = [2.0, 0.5];
        let t: Vec<f64> = (0..10u32).map(f64::from).collect();
        let y: Vec<f64> = t
            .iter()
            .map(|&ti| hyperbolic(ti, &truth) + 1e-3 * ti.sin())
            .collect();

        let mut par = [1.0, 1.0];
        let opts = FitOptions::default().with_tol(0.0);
        let report = fit_hyper(&mut par, &t, &y, &opts).unwrap();

        assert_eq!(report.status, FitStatus::Converged, "{}", report.termination);
        assert_eq!(report.params, par.to_vec());
        assert!((par[0] - 2.0).abs() < 0.05, "p0 = {}", par[0]);
        assert!((par[1] - 0.5).abs() < 0.05, "p1 = {}", par[1]);
        assert!(!report.termination.contains("NoImprovementPossible"));
    }

    #[test]
    fn numerical_failure_keeps_the_starting_guess() {
        let t: Vec<f64> = (0..6u32).map(f64::from).collect();
        let y: Vec<f64> = t.iter().map(|&ti| exponential(ti, &[1.0, 2.0, 3.0])).collect();

        // Predictions are finite, but p2² underflows to zero so ∂y/∂p2 is 0/0.
        let start = [1.0, 2.0, 1e-200];
        let mut par = start;
        let report = fit_exp(&mut par, &t, &y, &FitOptions::default()).unwrap();

        assert_eq!(report.status, FitStatus::NumericalFailure, "{}", report.termination);
        assert_eq!(par, start);
        assert_eq!(report.params.len(), 3);
        assert!(report.sse.is_finite());
    }
}
