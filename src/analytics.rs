//! Position-level analytics derived from prices and Greeks.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::conventions::TRADING_DAYS_PER_YEAR;
use crate::error::{EngineError, Result};
use crate::types::{Greeks, OptionType};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Annualized historical volatility of a close-price series.
///
/// Population standard deviation of daily log returns, scaled by `√252`.
///
/// ```
/// use bsengine::analytics::historical_volatility;
/// let flat = historical_volatility(&[100.0, 100.0, 100.0])?;
/// assert_eq!(flat, 0.0);
/// # Ok::<(), bsengine::EngineError>(())
/// ```
///
/// # Errors
/// Returns [`EngineError::InvalidInput`] for fewer than two prices or any
/// non-positive price.
pub fn historical_volatility(closes: &[f64]) -> Result<f64> {
    if closes.len() < 2 {
        return Err(EngineError::invalid(format!(
            "historical volatility needs at least 2 prices, got {}",
            closes.len()
        )));
    }
    for &c in closes {
        validate_positive(c, "close price")?;
    }

    let daily = closes
        .windows(2)
        .map(|w| (w[1] / w[0]).ln())
        .population_std_dev();
    Ok(daily * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Underlying price at expiry where a long position recovers its premium.
///
/// `K + premium` for a call, `K − premium` for a put.
///
/// # Errors
/// Returns [`EngineError::InvalidInput`] if `strike` is not positive or
/// `premium` is negative.
pub fn breakeven(strike: f64, premium: f64, option_type: OptionType) -> Result<f64> {
    validate_positive(strike, "strike")?;
    validate_non_negative(premium, "premium")?;
    Ok(strike + option_type.sign() * premium)
}

/// Where spot sits relative to the strike for a given side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Moneyness {
    /// Positive intrinsic value.
    InTheMoney,
    /// Spot equals strike.
    AtTheMoney,
    /// No intrinsic value.
    OutOfTheMoney,
}

/// Classify an option as in, at, or out of the money.
pub fn moneyness_state(spot: f64, strike: f64, option_type: OptionType) -> Moneyness {
    if spot == strike {
        Moneyness::AtTheMoney
    } else if option_type.intrinsic(spot, strike) > 0.0 {
        Moneyness::InTheMoney
    } else {
        Moneyness::OutOfTheMoney
    }
}

/// A joint move in spot and implied vol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioShift {
    /// Change in the underlying, in price units.
    pub spot_change: f64,
    /// Change in implied vol, in percentage points (5.0 = +5 vol points).
    pub vol_change_points: f64,
}

/// First-order estimate of the option value change under `shift`:
/// `Δ·dS + Vega·dσ`, with vega already per vol point.
///
/// # Errors
/// Returns [`EngineError::InvalidInput`] if either shift is non-finite.
pub fn scenario_change(greeks: &Greeks, shift: &ScenarioShift) -> Result<f64> {
    validate_finite(shift.spot_change, "spot change")?;
    validate_finite(shift.vol_change_points, "vol change")?;
    Ok(greeks.delta * shift.spot_change + greeks.vega * shift.vol_change_points)
}
