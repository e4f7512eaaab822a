//! Closed-form Black-Scholes valuation of European calls and puts.
//!
//! # Formula
//! ```text
//! d1 = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
//! d2 = d1 − σ·√T
//! C  = S·Φ(d1) − K·e^(−rT)·Φ(d2)
//! P  = K·e^(−rT)·Φ(−d2) − S·Φ(−d1)
//! ```
//!
//! # Boundary policy
//! When `T ≤ 0` or `σ ≤ 0` the diffusion term vanishes and the formula is not
//! evaluated (it would be `0/0`). The price is the deterministic limit
//! `max(S − K·e^(−rT), 0)` for a call and `max(K·e^(−rT) − S, 0)` for a put.
//! At `T = 0` this is exactly the payoff. The same policy drives the all-zero
//! branch in [`greeks`](crate::greeks::greeks).

use statrs::function::erf::erfc;

use crate::conventions::discount_factor;
use crate::types::{OptionSpec, OptionType};

/// Standard normal cumulative distribution Φ(x).
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Standard normal density φ(x).
pub fn norm_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// The `(d1, d2)` pair. Callers must ensure `expiry > 0` and `vol > 0`.
pub(crate) fn d1_d2(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64) -> (f64, f64) {
    let vol_sqrt_t = vol * expiry.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * expiry) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Unchecked price for already-validated inputs. Used by the solver's
/// objective, which varies `vol` on every evaluation.
pub(crate) fn black_scholes_price(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> f64 {
    let df = discount_factor(rate, expiry.max(0.0));
    if expiry <= 0.0 || vol <= 0.0 {
        return option_type.intrinsic(spot, strike * df);
    }
    let (d1, d2) = d1_d2(spot, strike, expiry, rate, vol);
    let value = match option_type {
        OptionType::Call => spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
        OptionType::Put => strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1),
    };
    // Cancellation in deep out-of-the-money wings can leave a tiny negative.
    value.max(0.0)
}

/// Theoretical premium of a European option.
///
/// Never negative. Equals the payoff when `spec.expiry() == 0`.
///
/// # Examples
/// ```
/// use bsengine::{OptionSpec, OptionType, pricing::price};
///
/// let spec = OptionSpec::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call)?;
/// assert!((price(&spec) - 10.4506).abs() < 1e-4);
/// # Ok::<(), bsengine::EngineError>(())
/// ```
pub fn price(spec: &OptionSpec) -> f64 {
    black_scholes_price(
        spec.spot(),
        spec.strike(),
        spec.expiry(),
        spec.rate(),
        spec.vol(),
        spec.option_type(),
    )
}
