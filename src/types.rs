//! Core domain types for option pricing and risk.
//!
//! # Newtype Strategy
//!
//! **Implied vol outputs use a newtype**: [`Vol`] wraps solver results so a
//! volatility is never confused with a price in a returned tuple or record.
//!
//! **Inputs are validated once**: [`OptionSpec`] checks its fields in
//! [`OptionSpec::new`] and on deserialization, so the pricing functions that
//! consume it are infallible.
//!
//! # Why no `Eq` or `Ord`?
//! These types wrap `f64`, which does not implement `Eq` or `Ord` because `NaN`
//! breaks total ordering. We derive `PartialEq` and `PartialOrd` only.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

/// Annualized volatility `σ`, e.g. 0.20 for 20%.
///
/// # Examples
/// ```
/// use bsengine::types::Vol;
/// let vol = Vol(0.20);
/// assert_eq!(vol.0, 0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vol(pub f64);

/// Option type: call or put.
///
/// The set is closed. Free-form side strings coming from a market-data feed
/// go through [`FromStr`], which rejects anything it does not recognise.
///
/// ```
/// use bsengine::OptionType;
/// assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);
/// assert!("straddle".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy at strike price.
    Call,
    /// Right to sell at strike price.
    Put,
}

impl OptionType {
    /// Payoff at expiry: `max(S − K, 0)` for a call, `max(K − S, 0)` for a put.
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// +1 for calls, −1 for puts.
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl FromStr for OptionType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(EngineError::invalid(format!(
                "option side must be 'call' or 'put', got '{other}'"
            ))),
        }
    }
}

/// Immutable input bundle for every pricing and Greeks call.
///
/// Invariants, checked by [`OptionSpec::new`] and on deserialization:
/// - `spot > 0`, `strike > 0`
/// - `expiry ≥ 0` (years), `vol ≥ 0`
/// - `rate` finite
///
/// `expiry == 0` and `vol == 0` are legal; they select the deterministic
/// boundary branch of the pricer and Greeks.
///
/// # Examples
/// ```
/// use bsengine::{OptionSpec, OptionType};
///
/// let spec = OptionSpec::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call)?;
/// assert_eq!(spec.strike(), 100.0);
/// assert!(OptionSpec::new(-1.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).is_err());
/// # Ok::<(), bsengine::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OptionSpecRaw", into = "OptionSpecRaw")]
pub struct OptionSpec {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
}

#[derive(Serialize, Deserialize)]
struct OptionSpecRaw {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
}

impl TryFrom<OptionSpecRaw> for OptionSpec {
    type Error = EngineError;
    fn try_from(raw: OptionSpecRaw) -> Result<Self> {
        Self::new(
            raw.spot,
            raw.strike,
            raw.expiry,
            raw.rate,
            raw.vol,
            raw.option_type,
        )
    }
}

impl From<OptionSpec> for OptionSpecRaw {
    fn from(s: OptionSpec) -> Self {
        Self {
            spot: s.spot,
            strike: s.strike,
            expiry: s.expiry,
            rate: s.rate,
            vol: s.vol,
            option_type: s.option_type,
        }
    }
}

impl OptionSpec {
    /// Create a validated option specification.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] naming the first field that
    /// violates its rule.
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        vol: f64,
        option_type: OptionType,
    ) -> Result<Self> {
        validate_positive(spot, "spot")?;
        validate_positive(strike, "strike")?;
        validate_non_negative(expiry, "expiry")?;
        validate_finite(rate, "rate")?;
        validate_non_negative(vol, "vol")?;
        Ok(Self {
            spot,
            strike,
            expiry,
            rate,
            vol,
            option_type,
        })
    }

    /// Underlying spot price `S`.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price `K`.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to expiry `T` in years.
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Continuously-compounded flat risk-free rate `r`.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Annualized volatility `σ`.
    pub fn vol(&self) -> f64 {
        self.vol
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Copy of this spec with a different spot.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] if `spot` is not positive and finite.
    pub fn with_spot(&self, spot: f64) -> Result<Self> {
        validate_positive(spot, "spot")?;
        Ok(Self { spot, ..*self })
    }

    /// Copy of this spec with a different expiry.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] if `expiry` is negative or not finite.
    pub fn with_expiry(&self, expiry: f64) -> Result<Self> {
        validate_non_negative(expiry, "expiry")?;
        Ok(Self { expiry, ..*self })
    }

    /// Copy of this spec with a different volatility.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] if `vol` is negative or not finite.
    pub fn with_vol(&self, vol: f64) -> Result<Self> {
        validate_non_negative(vol, "vol")?;
        Ok(Self { vol, ..*self })
    }

    /// Copy of this spec with a different strike.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] if `strike` is not positive and finite.
    pub fn with_strike(&self, strike: f64) -> Result<Self> {
        validate_positive(strike, "strike")?;
        Ok(Self { strike, ..*self })
    }

    /// True when the deterministic boundary branch applies (`T ≤ 0` or `σ ≤ 0`).
    pub fn is_degenerate(&self) -> bool {
        self.expiry <= 0.0 || self.vol <= 0.0
    }
}

/// Option sensitivities.
///
/// Scalings are fixed: `vega` is per one volatility point (0.01 of σ),
/// `theta` is per calendar day, `rho` is per one rate point. Callers must
/// not re-scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S.
    pub delta: f64,
    /// ∂²V/∂S². Identical for calls and puts.
    pub gamma: f64,
    /// ∂V/∂σ per vol point. Identical for calls and puts.
    pub vega: f64,
    /// ∂V/∂t per calendar day.
    pub theta: f64,
    /// ∂V/∂r per rate point.
    pub rho: f64,
}

impl Greeks {
    /// All sensitivities zero; the value returned at or past expiry and at zero vol.
    pub const ZERO: Greeks = Greeks {
        delta: 0.0,
        gamma: 0.0,
        vega: 0.0,
        theta: 0.0,
        rho: 0.0,
    };
}

/// Implied volatility recovered for one strike of a chain.
///
/// `volatility` always lies in the solver's search interval, but it is only
/// meaningful when `converged` is true. Use [`usable_vol`](Self::usable_vol)
/// to read it safely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVolEstimate {
    /// Strike of the quote.
    pub strike: f64,
    /// Market mid price the solver was asked to match.
    pub market_price: f64,
    /// Best volatility found in the search interval.
    pub volatility: Vol,
    /// Model price at `volatility`.
    pub model_price: f64,
    /// Minimizer iterations used.
    pub iterations: usize,
    /// True when the model price reprices the market within tolerance.
    pub converged: bool,
}

impl ImpliedVolEstimate {
    /// The implied vol if the solve converged, `None` otherwise.
    pub fn usable_vol(&self) -> Option<Vol> {
        self.converged.then_some(self.volatility)
    }

    /// Absolute repricing error `|model − market|`.
    pub fn residual(&self) -> f64 {
        (self.model_price - self.market_price).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_type_parses_case_insensitively() {
        assert_eq!(" PUT ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("c".parse::<OptionType>().unwrap(), OptionType::Call);
        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert!(err.to_string().contains("straddle"));
    }

    #[test]
    fn intrinsic_matches_payoff() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    }

    #[test]
    fn spec_rejects_each_invalid_field() {
        let call = OptionType::Call;
        assert!(OptionSpec::new(0.0, 100.0, 1.0, 0.05, 0.2, call).is_err());
        assert!(OptionSpec::new(100.0, -1.0, 1.0, 0.05, 0.2, call).is_err());
        assert!(OptionSpec::new(100.0, 100.0, -0.1, 0.05, 0.2, call).is_err());
        assert!(OptionSpec::new(100.0, 100.0, 1.0, f64::NAN, 0.2, call).is_err());
        assert!(OptionSpec::new(100.0, 100.0, 1.0, 0.05, -0.2, call).is_err());
    }

    #[test]
    fn spec_allows_degenerate_expiry_and_vol() {
        let s = OptionSpec::new(100.0, 100.0, 0.0, 0.05, 0.0, OptionType::Put).unwrap();
        assert!(s.is_degenerate());
    }

    #[test]
    fn with_setters_revalidate() {
        let s = OptionSpec::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
        assert_eq!(s.with_spot(120.0).unwrap().spot(), 120.0);
        assert!(s.with_spot(0.0).is_err());
        assert!(s.with_vol(-0.1).is_err());
        assert_eq!(s.with_expiry(0.5).unwrap().expiry(), 0.5);
        assert_eq!(s.with_strike(90.0).unwrap().strike(), 90.0);
    }

    #[test]
    fn serde_round_trip() {
        let s = OptionSpec::new(100.0, 95.0, 0.5, 0.03, 0.25, OptionType::Put).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"option_type\":\"put\""));
        let s2: OptionSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(s, s2);
    }

    #[test]
    fn serde_rejects_negative_spot() {
        let json = r#"{"spot":-100.0,"strike":100.0,"expiry":1.0,"rate":0.05,"vol":0.2,"option_type":"call"}"#;
        assert!(serde_json::from_str::<OptionSpec>(json).is_err());
    }

    #[test]
    fn serde_rejects_unknown_side() {
        let json = r#"{"spot":100.0,"strike":100.0,"expiry":1.0,"rate":0.05,"vol":0.2,"option_type":"straddle"}"#;
        assert!(serde_json::from_str::<OptionSpec>(json).is_err());
    }

    #[test]
    fn usable_vol_hidden_when_not_converged() {
        let mut est = ImpliedVolEstimate {
            strike: 100.0,
            market_price: 10.0,
            volatility: Vol(0.2),
            model_price: 10.0,
            iterations: 12,
            converged: true,
        };
        assert_eq!(est.usable_vol(), Some(Vol(0.2)));
        est.converged = false;
        assert_eq!(est.usable_vol(), None);
        assert_eq!(est.residual(), 0.0);
    }
}
