//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - runs the fit pipeline or a model evaluation
//! - prints reports

use clap::Parser;

use crate::cli::{Command, EvalArgs, FitArgs};
use crate::domain::{FitConfig, Verbosity};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `lmc` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Eval(args) => handle_eval(args),
    }
}

/// Install the stderr logger. `RUST_LOG` overrides the verbosity-derived level.
fn init_logging(verbosity: Verbosity) {
    let default_filter = match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Summary => "info",
        Verbosity::Trace => "debug",
    };
    // Only fails if a logger is already installed.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init()
        .ok();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    init_logging(config.verbosity);

    let run = pipeline::run_fit(&config)?;

    if config.json {
        let doc = serde_json::json!({
            "start": run.start,
            "report": run.report,
            "residuals": run.residuals,
        });
        let text = serde_json::to_string_pretty(&doc)
            .map_err(|e| AppError::new(2, format!("Failed to serialize fit report: {e}")))?;
        println!("{text}");
    } else {
        println!(
            "{}",
            crate::report::format_fit_summary(&config, &run.data, &run.start, &run.report)
        );
        if config.show_residuals && !run.residuals.is_empty() {
            println!("{}", crate::report::format_residual_table(&run.residuals));
        }
    }

    if !run.report.status.is_converged() {
        return Err(AppError::new(
            4,
            format!(
                "Fit did not converge ({}): {}",
                run.report.status.label(),
                run.report.termination
            ),
        ));
    }
    Ok(())
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let y = args
        .t
        .iter()
        .map(|&t| crate::models::predict(args.model, t, &args.params))
        .collect::<Result<Vec<f64>, _>>()?;

    print!("{}", crate::report::format_evaluations(&args.t, &y));
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        model: args.model,
        truth: args.truth.clone(),
        guess: args.guess.clone(),
        points: args.points,
        t_min: args.t_min,
        t_max: args.t_max,
        noise: args.noise,
        seed: args.seed,
        window_start: args.window_start,
        window_end: args.window_end,
        ftol: args.solver.ftol,
        xtol: args.solver.xtol,
        gtol: args.solver.gtol,
        stepbound: args.solver.stepbound,
        patience: args.solver.patience,
        verbosity: args.solver.verbosity,
        json: args.json,
        show_residuals: args.residuals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::domain::{FitStatus, ModelKind};

    fn config_for(argv: &[&str]) -> FitConfig {
        let cli = Cli::try_parse_from(argv).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        fit_config_from_args(&args)
    }

    #[test]
    fn pipeline_fits_exact_hyperbolic_sample() {
        let config = config_for(&[
            "lmc", "fit", "-m", "hyper", "--truth", "2,0.5", "--guess", "1,1", "-n", "10", "--t-max", "9",
        ]);
        let run = pipeline::run_fit(&config).unwrap();
        assert_eq!(run.report.status, FitStatus::Converged);
        assert_eq!(run.start, vec![1.0, 1.0]);
        assert!((run.report.params[0] - 2.0).abs() < 1e-6);
        assert!((run.report.params[1] - 0.5).abs() < 1e-6);
        assert_eq!(run.residuals.len(), 10);
    }

    #[test]
    fn pipeline_applies_the_window() {
        let config = config_for(&[
            "lmc", "fit", "-m", "hyper", "--truth", "2,0.5", "-n", "11", "--t-max", "10",
            "--window-start", "2", "--window-end", "8",
        ]);
        let run = pipeline::run_fit(&config).unwrap();
        assert_eq!(run.data.t(), &[2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(run.report.n_points, 6);
        assert_eq!(run.report.model, ModelKind::Hyperbolic);
    }

    #[test]
    fn pipeline_reports_wrong_guess_length() {
        let config = config_for(&["lmc", "fit", "-m", "exp", "--truth", "1,2,3", "--guess", "1,2"]);
        let err = pipeline::run_fit(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
