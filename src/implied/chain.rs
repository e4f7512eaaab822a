//! Batch implied-volatility solving over an option chain.
//!
//! A chain is a list of `(strike, mid)` quotes for one expiry and one side.
//! [`solve_chain`] maps it to one outcome per quote, in input order. Rows are
//! independent: a bad quote yields an `Err` in its own slot and the other
//! rows are unaffected. With the `parallel` feature the rows are solved on
//! the rayon pool.
//!
//! ```
//! use bsengine::implied::{BlackScholesImpliedVol, ChainQuote, solve_chain};
//! use bsengine::OptionType;
//!
//! let quotes = vec![
//!     ChainQuote::from_bid_ask(95.0, 8.10, 8.30)?,
//!     ChainQuote::from_bid_ask(100.0, 5.20, 5.40)?,
//!     ChainQuote::new(105.0, 3.05),
//! ];
//! let solver = BlackScholesImpliedVol::default();
//! let chain = solve_chain(&solver, 100.0, 0.25, 0.05, OptionType::Call, &quotes)?;
//!
//! assert_eq!(chain.len(), 3);
//! let atm = chain.at_the_money().expect("ATM row converged");
//! assert_eq!(atm.strike, 100.0);
//! # Ok::<(), bsengine::EngineError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::greeks::greeks;
use crate::implied::black::BlackScholesImpliedVol;
use crate::types::{Greeks, ImpliedVolEstimate, OptionSpec, OptionType, Vol};
use crate::validate::{validate_finite, validate_non_negative, validate_positive};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default relative half-width used by [`ChainSolution::nearby_greeks`].
pub const DEFAULT_NEARBY_BAND: f64 = 0.10;

/// One quote of an option chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainQuote {
    /// Strike price.
    pub strike: f64,
    /// Mid price used as the market price.
    pub mid: f64,
}

impl ChainQuote {
    /// A quote from an already-computed mid. Validated when solved.
    pub fn new(strike: f64, mid: f64) -> Self {
        Self { strike, mid }
    }

    /// A quote from bid and ask: `mid = (bid + ask) / 2`.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] if either side is negative or
    /// non-finite (a missing quote), or if `ask < bid`.
    pub fn from_bid_ask(strike: f64, bid: f64, ask: f64) -> Result<Self> {
        validate_non_negative(bid, "bid")?;
        validate_non_negative(ask, "ask")?;
        if ask < bid {
            return Err(EngineError::invalid(format!(
                "ask must not be below bid at strike {strike}, got bid {bid} ask {ask}"
            )));
        }
        Ok(Self {
            strike,
            mid: 0.5 * (bid + ask),
        })
    }
}

/// Greeks at one strike, evaluated at that strike's own implied vol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeGreeks {
    /// Strike price.
    pub strike: f64,
    /// Implied vol used for the evaluation.
    pub vol: Vol,
    /// Sensitivities at that vol.
    pub greeks: Greeks,
}

/// Per-row outcomes of a chain solve plus the market context they share.
#[derive(Debug, Clone)]
pub struct ChainSolution {
    spot: f64,
    expiry: f64,
    rate: f64,
    option_type: OptionType,
    rows: Vec<Result<ImpliedVolEstimate>>,
}

impl ChainSolution {
    /// Spot price the chain was solved against.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Time to expiry in years.
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Flat rate used for discounting.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Side of every quote in the chain.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Number of rows, successful or not.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the chain had no quotes.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every row outcome, in quote order.
    pub fn rows(&self) -> &[Result<ImpliedVolEstimate>] {
        &self.rows
    }

    /// Rows that produced an estimate, converged or not.
    pub fn estimates(&self) -> impl Iterator<Item = &ImpliedVolEstimate> {
        self.rows.iter().filter_map(|r| r.as_ref().ok())
    }

    /// Rows whose estimate converged. Only these carry a usable vol.
    pub fn converged(&self) -> impl Iterator<Item = &ImpliedVolEstimate> {
        self.estimates().filter(|e| e.converged)
    }

    /// Rows that were rejected, with their index in the input.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &EngineError)> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().err().map(|e| (i, e)))
    }

    /// `(strike, vol)` points of the converged rows, sorted by strike.
    pub fn smile(&self) -> Vec<(f64, Vol)> {
        let mut points: Vec<(f64, Vol)> = self
            .converged()
            .map(|e| (e.strike, e.volatility))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points
    }

    /// The converged row whose strike is closest to spot.
    ///
    /// Ties go to the lower strike. Returns `None` when no row converged.
    pub fn at_the_money(&self) -> Option<&ImpliedVolEstimate> {
        let spot = self.spot;
        self.converged().min_by(|a, b| {
            let da = (a.strike - spot).abs();
            let db = (b.strike - spot).abs();
            da.total_cmp(&db).then(a.strike.total_cmp(&b.strike))
        })
    }

    /// Greeks for converged rows with strike in
    /// `[center · (1 − band), center · (1 + band)]`, sorted by strike.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInput`] if `center_strike` is not
    /// positive or `band` is negative.
    pub fn nearby_greeks(&self, center_strike: f64, band: f64) -> Result<Vec<StrikeGreeks>> {
        validate_positive(center_strike, "center strike")?;
        validate_non_negative(band, "band")?;
        let lo = center_strike * (1.0 - band);
        let hi = center_strike * (1.0 + band);

        let mut out = self
            .converged()
            .filter(|e| e.strike >= lo && e.strike <= hi)
            .map(|e| {
                let spec = OptionSpec::new(
                    self.spot,
                    e.strike,
                    self.expiry,
                    self.rate,
                    e.volatility.0,
                    self.option_type,
                )?;
                Ok(StrikeGreeks {
                    strike: e.strike,
                    vol: e.volatility,
                    greeks: greeks(&spec),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        out.sort_by(|a, b| a.strike.total_cmp(&b.strike));
        Ok(out)
    }
}

/// Solve implied vol for every quote of a single-expiry, single-side chain.
///
/// # Errors
/// Returns [`EngineError::InvalidInput`] only when the shared context
/// (`spot`, `expiry`, `rate`) is invalid, since then no row can be solved.
/// Per-quote problems are reported in the corresponding row.
pub fn solve_chain(
    solver: &BlackScholesImpliedVol,
    spot: f64,
    expiry: f64,
    rate: f64,
    option_type: OptionType,
    quotes: &[ChainQuote],
) -> Result<ChainSolution> {
    validate_positive(spot, "spot")?;
    validate_positive(expiry, "expiry")?;
    validate_finite(rate, "rate")?;

    #[cfg(feature = "logging")]
    tracing::debug!(
        n_quotes = quotes.len(),
        spot,
        expiry,
        side = ?option_type,
        "chain implied vol solve started"
    );

    let solve_row =
        |q: &ChainQuote| solver.compute(q.mid, spot, q.strike, expiry, rate, option_type);

    #[cfg(feature = "parallel")]
    let rows: Vec<Result<ImpliedVolEstimate>> = quotes.par_iter().map(solve_row).collect();
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Result<ImpliedVolEstimate>> = quotes.iter().map(solve_row).collect();

    let solution = ChainSolution {
        spot,
        expiry,
        rate,
        option_type,
        rows,
    };

    #[cfg(feature = "logging")]
    tracing::debug!(
        n_rows = solution.len(),
        n_converged = solution.converged().count(),
        n_failed = solution.failures().count(),
        "chain implied vol solve complete"
    );

    Ok(solution)
}
