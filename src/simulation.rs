//! Risk-neutral Monte Carlo simulation of terminal prices.
//!
//! Samples are drawn exactly (one step, no discretization error):
//!
//! ```text
//! S_T = S · exp((r − σ²/2)·T + σ·√T·Z),   Z ~ N(0, 1)
//! ```
//!
//! With a seed the sequence is reproducible bit for bit for a given `rand`
//! release. Without one, the generator is seeded from OS entropy.
//!
//! ```
//! use bsengine::simulation::{SimulationConfig, simulate_terminal_prices};
//!
//! let config = SimulationConfig::default().seed(42);
//! let a = simulate_terminal_prices(100.0, 0.05, 0.2, 1.0, &config)?;
//! let b = simulate_terminal_prices(100.0, 0.05, 0.2, 1.0, &config)?;
//! assert_eq!(a.samples(), b.samples());
//! assert_eq!(a.len(), 1000);
//! # Ok::<(), bsengine::EngineError>(())
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::{EngineError, Result};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Sample count used when none is configured.
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Settings for [`simulate_terminal_prices`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of terminal prices to draw.
    pub sample_count: usize,
    /// Fixed seed for a reproducible draw; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Set the number of samples.
    pub fn sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Fix the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Terminal prices in draw order.
///
/// Deserialization rejects a non-positive spot, an empty sample list, and
/// any sample that is not positive and finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SimulationResultRaw", into = "SimulationResultRaw")]
pub struct SimulationResult {
    spot: f64,
    samples: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct SimulationResultRaw {
    spot: f64,
    samples: Vec<f64>,
}

impl TryFrom<SimulationResultRaw> for SimulationResult {
    type Error = EngineError;
    fn try_from(raw: SimulationResultRaw) -> Result<Self> {
        validate_positive(raw.spot, "spot")?;
        if raw.samples.is_empty() {
            return Err(EngineError::invalid("samples must not be empty"));
        }
        for &s in &raw.samples {
            validate_positive(s, "terminal price sample")?;
        }
        Ok(Self {
            spot: raw.spot,
            samples: raw.samples,
        })
    }
}

impl From<SimulationResult> for SimulationResultRaw {
    fn from(r: SimulationResult) -> Self {
        Self {
            spot: r.spot,
            samples: r.samples,
        }
    }
}

/// Equal-width histogram of simulated prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `bins + 1` bin edges, ascending.
    pub edges: Vec<f64>,
    /// Sample count per bin.
    pub counts: Vec<usize>,
}

impl SimulationResult {
    /// The samples, in the order they were drawn.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Consume the result, returning the samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: construction and deserialization require a sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample mean of `S_T`.
    pub fn mean(&self) -> f64 {
        self.samples.iter().mean()
    }

    /// Unbiased sample standard deviation of `S_T`; zero for a single sample.
    pub fn std_dev(&self) -> f64 {
        if self.samples.len() < 2 {
            return 0.0;
        }
        self.samples.iter().std_dev()
    }

    /// Unbiased sample standard deviation of `ln(S_T / S)`; approximates `σ·√T`.
    pub fn log_return_std(&self) -> f64 {
        if self.samples.len() < 2 {
            return 0.0;
        }
        let spot = self.spot;
        self.samples.iter().map(|&s| (s / spot).ln()).std_dev()
    }

    /// Bucket the samples into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] if `bins` is zero.
    pub fn histogram(&self, bins: usize) -> Result<Histogram> {
        if bins == 0 {
            return Err(EngineError::invalid("histogram bins must be at least 1"));
        }
        let min = Statistics::min(self.samples.iter());
        let max = Statistics::max(self.samples.iter());
        let width = (max - min) / bins as f64;

        let edges = (0..=bins).map(|i| min + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for &s in &self.samples {
            let idx = if width > 0.0 {
                (((s - min) / width) as usize).min(bins - 1)
            } else {
                0
            };
            counts[idx] += 1;
        }
        Ok(Histogram { edges, counts })
    }
}

/// Draw terminal prices of the underlying under the risk-neutral measure.
///
/// `vol == 0` or `expiry == 0` is legal and yields the deterministic forward
/// `S·e^(rT)` for every sample.
///
/// # Errors
/// Returns [`EngineError::InvalidInput`] if `spot` is not positive, `vol` or
/// `expiry` is negative, any input is non-finite, or `sample_count` is zero.
pub fn simulate_terminal_prices(
    spot: f64,
    rate: f64,
    vol: f64,
    expiry: f64,
    config: &SimulationConfig,
) -> Result<SimulationResult> {
    validate_positive(spot, "spot")?;
    validate_finite(rate, "rate")?;
    validate_non_negative(vol, "vol")?;
    validate_non_negative(expiry, "expiry")?;
    if config.sample_count == 0 {
        return Err(EngineError::invalid("sample_count must be at least 1"));
    }

    #[cfg(feature = "logging")]
    tracing::debug!(
        spot,
        rate,
        vol,
        expiry,
        sample_count = config.sample_count,
        seeded = config.seed.is_some(),
        "terminal price simulation started"
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let drift = (rate - 0.5 * vol * vol) * expiry;
    let diffusion = vol * expiry.sqrt();
    let samples = (0..config.sample_count)
        .map(|_| {
            let z: f64 = StandardNormal.sample(&mut rng);
            spot * (drift + diffusion * z).exp()
        })
        .collect();

    Ok(SimulationResult { spot, samples })
}
