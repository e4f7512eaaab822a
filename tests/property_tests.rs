//! Property-based tests using proptest.
//!
//! These tests verify invariant properties across random inputs rather than
//! testing fixed examples: parity, monotonicity, finite-difference Greeks,
//! solver round-trips, and simulation reproducibility.

use proptest::prelude::*;
use bsengine::greeks::greeks;
use bsengine::implied::BlackScholesImpliedVol;
use bsengine::pricing::price;
use bsengine::simulation::{SimulationConfig, simulate_terminal_prices};
use bsengine::{OptionSpec, OptionType};

fn side() -> impl Strategy<Value = OptionType> {
    prop_oneof![Just(OptionType::Call), Just(OptionType::Put)]
}

// --- Property Test 1: put-call parity ---

proptest! {
    /// C − P = S − K·e^(−rT) for every valid input set.
    #[test]
    fn put_call_parity(
        spot in 10.0_f64..500.0,
        moneyness in 0.5_f64..2.0,
        expiry in 0.01_f64..3.0,
        rate in -0.02_f64..0.10,
        vol in 0.01_f64..1.5,
    ) {
        let strike = spot * moneyness;
        let c = price(&OptionSpec::new(spot, strike, expiry, rate, vol, OptionType::Call).unwrap());
        let p = price(&OptionSpec::new(spot, strike, expiry, rate, vol, OptionType::Put).unwrap());
        let parity = spot - strike * (-rate * expiry).exp();
        prop_assert!(
            (c - p - parity).abs() < 1e-6 * spot.max(1.0),
            "C - P = {}, S - K·df = {}",
            c - p,
            parity
        );
    }
}

// --- Property Test 2: prices are non-negative and increasing in vol ---

proptest! {
    /// Raising σ never lowers the price, and strictly raises it wherever
    /// the option has meaningful vega.
    #[test]
    fn price_increases_with_vol(
        moneyness in 0.7_f64..1.4,
        expiry in 0.05_f64..2.0,
        rate in 0.0_f64..0.08,
        vol in 0.05_f64..1.0,
        bump in 0.01_f64..0.5,
        ot in side(),
    ) {
        let spot = 100.0;
        let base = OptionSpec::new(spot, spot * moneyness, expiry, rate, vol, ot).unwrap();
        let bumped = base.with_vol(vol + bump).unwrap();
        let (p0, p1) = (price(&base), price(&bumped));
        prop_assert!(p0 >= 0.0);
        prop_assert!(p1 >= p0);
        if greeks(&base).vega > 1e-3 {
            prop_assert!(p1 > p0, "p0 = {}, p1 = {}", p0, p1);
        }
    }
}

// --- Property Test 3: Greeks agree with finite differences ---

proptest! {
    /// Central differences of the price in S approximate delta and gamma.
    #[test]
    fn delta_and_gamma_match_finite_differences(
        moneyness in 0.8_f64..1.25,
        expiry in 0.1_f64..2.0,
        rate in 0.0_f64..0.08,
        vol in 0.1_f64..0.8,
        ot in side(),
    ) {
        let spot = 100.0;
        let h = 0.01;
        let base = OptionSpec::new(spot, spot * moneyness, expiry, rate, vol, ot).unwrap();
        let up = price(&base.with_spot(spot + h).unwrap());
        let mid = price(&base);
        let dn = price(&base.with_spot(spot - h).unwrap());

        let g = greeks(&base);
        let fd_delta = (up - dn) / (2.0 * h);
        let fd_gamma = (up - 2.0 * mid + dn) / (h * h);
        prop_assert!((g.delta - fd_delta).abs() < 1e-6, "delta {} vs {}", g.delta, fd_delta);
        prop_assert!((g.gamma - fd_gamma).abs() < 1e-4, "gamma {} vs {}", g.gamma, fd_gamma);
    }
}

// --- Property Test 4: implied vol round-trip ---

proptest! {
    /// Pricing at σ and solving back recovers σ wherever the price is
    /// sensitive to σ.
    #[test]
    fn implied_vol_round_trip(
        moneyness in 0.8_f64..1.25,
        expiry in 0.05_f64..2.0,
        rate in 0.0_f64..0.08,
        vol in 0.05_f64..1.5,
        ot in side(),
    ) {
        let spot = 100.0;
        let strike = spot * moneyness;
        let spec = OptionSpec::new(spot, strike, expiry, rate, vol, ot).unwrap();
        prop_assume!(greeks(&spec).vega > 1e-3);

        let est = BlackScholesImpliedVol::default()
            .compute(price(&spec), spot, strike, expiry, rate, ot)
            .unwrap();
        prop_assert!(est.converged, "{:?}", est);
        prop_assert!((est.volatility.0 - vol).abs() < 1e-4, "{} vs {}", est.volatility.0, vol);
    }
}

// --- Property Test 5: simulation reproducibility ---

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A fixed seed reproduces the draw exactly; every sample is positive.
    #[test]
    fn seeded_simulation_is_reproducible(
        seed in any::<u64>(),
        vol in 0.0_f64..2.0,
        expiry in 0.0_f64..3.0,
    ) {
        let cfg = SimulationConfig::default().seed(seed).sample_count(256);
        let a = simulate_terminal_prices(100.0, 0.03, vol, expiry, &cfg).unwrap();
        let b = simulate_terminal_prices(100.0, 0.03, vol, expiry, &cfg).unwrap();
        prop_assert_eq!(a.samples(), b.samples());
        prop_assert!(a.samples().iter().all(|&s| s > 0.0));
    }
}
