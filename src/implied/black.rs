//! Black-Scholes implied volatility via bounded derivative-free search.
//!
//! The objective `|price(σ) − market|` is minimized over a fixed interval,
//! `[0.01, 2.0]` by default. Because the price is strictly increasing in σ
//! the objective is unimodal, so a bracketing minimizer needs no vega.
//! A market price outside the range the model can reach on the interval
//! leaves a residual, and the estimate is flagged as not converged rather
//! than snapped to a bound. A zero quote, or one the model prices at zero
//! over a whole band of σ, never counts as converged.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::optim::{BoundedConfig, minimize_bounded};
use crate::pricing::black_scholes_price;
use crate::types::{ImpliedVolEstimate, OptionType, Vol};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Lower end of the default implied-vol search interval (1% annualized).
pub const VOL_LOWER_BOUND: f64 = 0.01;
/// Upper end of the default implied-vol search interval (200% annualized).
pub const VOL_UPPER_BOUND: f64 = 2.0;

/// Settings for [`BlackScholesImpliedVol`].
///
/// # Examples
/// ```
/// use bsengine::implied::SolverConfig;
///
/// let config = SolverConfig::default().max_iter(100).price_tolerance(1e-5);
/// assert_eq!(config.lower, 0.01);
/// assert_eq!(config.max_iter, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Lower bound of the σ search interval.
    pub lower: f64,
    /// Upper bound of the σ search interval.
    pub upper: f64,
    /// Absolute tolerance on σ.
    pub xatol: f64,
    /// Cap on pricer evaluations per strike.
    pub max_iter: usize,
    /// Relative repricing tolerance, applied as
    /// `price_tolerance · max(market_price, 1)` to the residual and as a
    /// relative slack on the prices reachable at the interval ends.
    pub price_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lower: VOL_LOWER_BOUND,
            upper: VOL_UPPER_BOUND,
            xatol: 1e-8,
            max_iter: 500,
            price_tolerance: 1e-6,
        }
    }
}

impl SolverConfig {
    /// Set the σ search interval.
    pub fn bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Set the absolute tolerance on σ.
    pub fn xatol(mut self, xatol: f64) -> Self {
        self.xatol = xatol;
        self
    }

    /// Set the evaluation cap per strike.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the relative repricing tolerance.
    pub fn price_tolerance(mut self, price_tolerance: f64) -> Self {
        self.price_tolerance = price_tolerance;
        self
    }

    /// Check the interval and tolerances.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] if the interval is empty or not
    /// strictly positive, a tolerance is not positive, or `max_iter` is zero.
    pub fn validate(&self) -> Result<()> {
        validate_positive(self.lower, "solver lower bound")?;
        validate_positive(self.upper, "solver upper bound")?;
        if self.lower >= self.upper {
            return Err(EngineError::invalid(format!(
                "solver lower bound must be below upper bound, got [{}, {}]",
                self.lower, self.upper
            )));
        }
        validate_positive(self.xatol, "solver xatol")?;
        validate_positive(self.price_tolerance, "solver price_tolerance")?;
        if self.max_iter == 0 {
            return Err(EngineError::invalid("solver max_iter must be at least 1"));
        }
        Ok(())
    }
}

/// Black-Scholes implied volatility calculator.
///
/// Stateless apart from its configuration; `Send + Sync`, so one instance
/// can serve a whole chain across threads.
///
/// # Examples
/// ```
/// use bsengine::implied::BlackScholesImpliedVol;
/// use bsengine::OptionType;
///
/// let solver = BlackScholesImpliedVol::default();
/// let est = solver.compute(10.450583572185565, 100.0, 100.0, 1.0, 0.05, OptionType::Call)?;
/// assert!(est.converged);
/// assert!((est.volatility.0 - 0.2).abs() < 1e-6);
/// # Ok::<(), bsengine::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlackScholesImpliedVol {
    config: SolverConfig,
}

impl BlackScholesImpliedVol {
    /// Create a solver with a custom configuration.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] if the configuration is invalid.
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Recover the volatility implied by `option_price`.
    ///
    /// # Arguments
    /// * `option_price` — Market (mid) price, must be ≥ 0
    /// * `spot` — Spot price (must be > 0)
    /// * `strike` — Strike price (must be > 0)
    /// * `expiry` — Time to expiry in years (must be > 0)
    /// * `rate` — Flat continuously-compounded rate
    /// * `option_type` — Call or Put
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] for invalid inputs and
    /// [`EngineError::NumericalError`] if the model price is not finite.
    /// Failing to reprice the market is *not* an error; it is reported by
    /// `converged == false` on the estimate.
    pub fn compute(
        &self,
        option_price: f64,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        option_type: OptionType,
    ) -> Result<ImpliedVolEstimate> {
        validate_non_negative(option_price, "market price")?;
        validate_positive(spot, "spot")?;
        validate_positive(strike, "strike")?;
        validate_positive(expiry, "expiry")?;
        validate_finite(rate, "rate")?;

        let objective = |vol: f64| {
            (black_scholes_price(spot, strike, expiry, rate, vol, option_type) - option_price).abs()
        };
        let bounded = BoundedConfig {
            max_iter: self.config.max_iter,
            xatol: self.config.xatol,
        };
        let result = minimize_bounded(objective, self.config.lower, self.config.upper, &bounded);

        let model_price = black_scholes_price(spot, strike, expiry, rate, result.x, option_type);
        if !model_price.is_finite() {
            return Err(EngineError::NumericalError {
                message: format!("model price is not finite at strike {strike}, vol {}", result.x),
            });
        }

        let tolerance = self.config.price_tolerance * option_price.max(1.0);
        let converged = result.converged
            && result.fval <= tolerance
            && self.identifies_vol(option_price, model_price, |vol| {
                black_scholes_price(spot, strike, expiry, rate, vol, option_type)
            });

        #[cfg(feature = "logging")]
        if !converged {
            tracing::debug!(
                strike,
                option_price,
                vol = result.x,
                residual = result.fval,
                iterations = result.iterations,
                "implied vol did not converge"
            );
        }

        Ok(ImpliedVolEstimate {
            strike,
            market_price: option_price,
            volatility: Vol(result.x),
            model_price,
            iterations: result.iterations,
            converged,
        })
    }

    /// True when `option_price` pins a single σ in the search interval.
    ///
    /// The quote must be strictly positive, matched by a strictly positive
    /// model price, and lie within the prices reachable at the interval
    /// ends up to a relative `price_tolerance`. A zero mid or a price below
    /// the value at `lower` has an implied vol outside the interval, and a
    /// zero model price sits on a flat region where every σ fits.
    fn identifies_vol<P>(&self, option_price: f64, model_price: f64, price_at: P) -> bool
    where
        P: Fn(f64) -> f64,
    {
        if option_price <= 0.0 || model_price <= 0.0 {
            return false;
        }
        let slack = self.config.price_tolerance * option_price;
        let floor = price_at(self.config.lower);
        let ceiling = price_at(self.config.upper);
        option_price >= floor - slack && option_price <= ceiling + slack
    }
}
