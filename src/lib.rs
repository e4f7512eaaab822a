//! # bsengine
//!
//! European option pricing and risk engine under Black-Scholes assumptions.
//!
//! Market data goes in as plain numbers: spot, strike, time to expiry,
//! a flat rate, and a quoted price. Prices, Greeks, implied vols and
//! simulated distributions come out as plain numeric records.
//!
//! ## Architecture
//!
//! - **`pricing`** — Closed-form call/put valuation
//! - **`greeks`** — Delta, gamma, vega, theta, rho in trading units
//! - **`implied`** — Bounded implied-vol solver and per-row chain solving
//! - **`simulation`** — Risk-neutral terminal-price Monte Carlo
//! - **`sweep`** — Price and Greeks curves along spot or expiry
//! - **`analytics`** — Historical vol, break-even, scenario estimates
//!
//! ## Design
//!
//! - **Validated inputs, infallible math.** [`OptionSpec`] rejects bad inputs
//!   at construction; [`pricing::price`] and [`greeks::greeks`] then cannot fail.
//! - **One boundary policy.** Zero expiry or zero vol yields the deterministic
//!   price and all-zero Greeks everywhere, with no hidden floors.
//! - **No panics.** Every fallible operation returns [`Result`]. Library code
//!   never calls `unwrap()` or `expect()`.
//! - **Non-convergence is data.** An implied-vol solve that cannot reprice the
//!   market returns an estimate with `converged == false`, not an error.
//! - **No global state.** Every function is pure; the rate is a parameter.
//!   All public types are `Send + Sync`.
//!
//! ## Features
//!
//! - `parallel` (default) — solve chain rows on the rayon pool
//! - `logging` — emit `tracing` debug events from the solver and simulator

pub mod analytics;
pub mod conventions;
pub mod error;
pub mod greeks;
pub mod implied;
mod optim;
pub mod pricing;
pub mod simulation;
pub mod sweep;
pub mod types;
mod validate;

#[doc(inline)]
pub use error::{EngineError, Result};
#[doc(inline)]
pub use implied::{BlackScholesImpliedVol, ChainQuote, SolverConfig, solve_chain};
#[doc(inline)]
pub use simulation::{SimulationConfig, SimulationResult, simulate_terminal_prices};
#[doc(inline)]
pub use types::{Greeks, ImpliedVolEstimate, OptionSpec, OptionType, Vol};
