//! Synthetic sample generation from a known parameter vector.
//!
//! Samples are equally spaced over `[t_min, t_max]`. Optional Gaussian noise is
//! drawn from a seeded RNG so a given configuration always yields the same data.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::data::DataSet;
use crate::domain::{FitConfig, ModelKind};
use crate::error::FitError;
use crate::models::{check_param_count, predict_unchecked};

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub model: ModelKind,
    pub params: Vec<f64>,
    pub points: usize,
    pub t_min: f64,
    pub t_max: f64,
    /// Standard deviation of additive noise on `y` (0 for exact samples).
    pub noise: f64,
    pub seed: u64,
}

impl SampleConfig {
    /// Noise-free samples of `model` at `params`.
    pub fn exact(model: ModelKind, params: &[f64], points: usize, t_min: f64, t_max: f64) -> Self {
        Self {
            model,
            params: params.to_vec(),
            points,
            t_min,
            t_max,
            noise: 0.0,
            seed: 0,
        }
    }
}

impl From<&FitConfig> for SampleConfig {
    fn from(config: &FitConfig) -> Self {
        Self {
            model: config.model,
            params: config.truth.clone(),
            points: config.points,
            t_min: config.t_min,
            t_max: config.t_max,
            noise: config.noise,
            seed: config.seed,
        }
    }
}

pub fn generate_sample(config: &SampleConfig) -> Result<DataSet, FitError> {
    check_param_count(config.model, &config.params)?;
    if config.points == 0 {
        return Err(FitError::input("sample point count must be > 0"));
    }
    let single = config.points == 1;
    if !(config.t_min.is_finite() && config.t_max.is_finite())
        || (!single && config.t_max <= config.t_min)
    {
        return Err(FitError::input(format!(
            "invalid sample range [{}, {}]",
            config.t_min, config.t_max
        )));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(FitError::input(format!(
            "noise must be finite and >= 0, got {}",
            config.noise
        )));
    }

    let mut noise = if config.noise > 0.0 {
        let normal = Normal::new(0.0, config.noise)
            .map_err(|e| FitError::input(format!("noise distribution error: {e}")))?;
        Some((StdRng::seed_from_u64(config.seed), normal))
    } else {
        None
    };

    let span = config.t_max - config.t_min;
    let denom = (config.points.max(2) - 1) as f64;
    let mut t = Vec::with_capacity(config.points);
    let mut y = Vec::with_capacity(config.points);

    for i in 0..config.points {
        let ti = config.t_min + span * i as f64 / denom;
        let mut yi = predict_unchecked(config.model, ti, &config.params);
        if !yi.is_finite() {
            return Err(FitError::SingularModel { index: i, t: ti });
        }
        if let Some((rng, normal)) = noise.as_mut() {
            yi += normal.sample(rng);
        }
        t.push(ti);
        y.push(yi);
    }

    DataSet::new(t, y)
}
