//! Implied volatility extraction from option prices.
//!
//! - [`BlackScholesImpliedVol`] — single-strike solver over a bounded σ interval
//! - [`solve_chain`] — independent per-row solve over a chain of quotes,
//!   with at-the-money selection and nearby-strike Greeks on the result

pub mod black;
pub mod chain;

pub use black::{BlackScholesImpliedVol, SolverConfig, VOL_LOWER_BOUND, VOL_UPPER_BOUND};
pub use chain::{ChainQuote, ChainSolution, DEFAULT_NEARBY_BAND, StrikeGreeks, solve_chain};
