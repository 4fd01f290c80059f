//! Formatted terminal output for fits and model evaluations.
//!
//! Formatting lives in one place so the fitting code stays free of
//! presentation concerns.

use crate::data::DataSet;
use crate::domain::{FitConfig, FitReport};
use crate::report::PointResidual;

/// Format the run summary (data set + solver outcome + parameters).
pub fn format_fit_summary(config: &FitConfig, data: &DataSet, start: &[f64], report: &FitReport) -> String {
    let mut out = String::new();

    out.push_str("=== lmc - Levenberg-Marquardt curve fit ===\n");
    out.push_str(&format!(
        "Model: {} (y = {})\n",
        report.model,
        report.model.formula()
    ));
    out.push_str(&format!(
        "Sample: n={} | t=[{:.3}, {:.3}] | noise={} | seed={}\n",
        config.points, config.t_min, config.t_max, config.noise, config.seed
    ));
    if config.window_start.is_some() || config.window_end.is_some() {
        out.push_str(&format!(
            "Window: [{}, {})\n",
            config.window_start.map_or("-inf".to_string(), |v| format!("{v}")),
            config.window_end.map_or("inf".to_string(), |v| format!("{v}")),
        ));
    }
    let (t_lo, t_hi) = t_range(data);
    out.push_str(&format!("Points: m={} | t=[{t_lo:.3}, {t_hi:.3}]\n", data.len()));

    out.push_str("\nSolver:\n");
    out.push_str(&format!("- status     : {}\n", report.status.label()));
    out.push_str(&format!("- termination: {}\n", report.termination));
    out.push_str(&format!("- evaluations: {}\n", report.evaluations));
    out.push_str(&format!(
        "- SSE={:.6e} | norm={:.6e} | RMSE={:.6e}\n",
        report.sse, report.residual_norm, report.rmse
    ));

    out.push_str("\nParameters:\n");
    out.push_str(&format!("- start: {}\n", fmt_vec(start)));
    out.push_str(&format!("- fit  : {}\n", fmt_vec(&report.params)));
    if config.truth.len() == report.params.len() {
        out.push_str(&format!("- truth: {}\n", fmt_vec(&config.truth)));
    }

    out
}

/// Format a per-point residual table.
pub fn format_residual_table(rows: &[PointResidual]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>12} {:>14} {:>14} {:>14}\n",
            "t", "y_obs", "y_fit", "residual"
        )
        .trim_start(),
    );
    out.push_str(&format!("{:-<12} {:-<14} {:-<14} {:-<14}\n", "", "", "", ""));
    for r in rows {
        out.push_str(&format!(
            "{:>12.4} {:>14.6e} {:>14.6e} {:>14.6e}\n",
            r.t, r.y_obs, r.y_fit, r.residual
        ));
    }
    out
}

/// Format `(t, y)` pairs from a model evaluation.
pub fn format_evaluations(t: &[f64], y: &[f64]) -> String {
    let mut out = String::new();
    for (ti, yi) in t.iter().zip(y.iter()) {
        out.push_str(&format!("{ti}\t{yi}\n"));
    }
    out
}

fn t_range(data: &DataSet) -> (f64, f64) {
    data.t()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| (lo.min(t), hi.max(t)))
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}
