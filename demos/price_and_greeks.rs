//! Price a European option and read its Greeks.
//!
//! Shows how to:
//!   - Build a validated `OptionSpec` from calendar days
//!   - Read per-point vega/rho and per-day theta
//!   - Estimate a spot/vol scenario from the Greeks
//!   - Produce price and theta curves for plotting
//!
//! Run with: `cargo run --example price_and_greeks`

use bsengine::analytics::{ScenarioShift, breakeven, moneyness_state, scenario_change};
use bsengine::conventions::year_fraction;
use bsengine::greeks::greeks;
use bsengine::pricing::price;
use bsengine::sweep::{delta_vs_spot, expiry_range, price_vs_spot, spot_range, theta_vs_expiry};
use bsengine::{OptionSpec, OptionType};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spot = 187.3;
    let strike = 190.0;
    let expiry = year_fraction(45.0);
    let rate = 0.05;
    let vol = 0.28;

    // ---------------------------------------------------------------
    // 1. Price and Greeks for both sides
    // ---------------------------------------------------------------

    println!("Spot {spot}, strike {strike}, {expiry:.4}y, r = {rate}, σ = {vol}\n");
    println!(
        "{:>5} {:>10} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10} {:>8}",
        "Side", "Price", "Delta", "Gamma", "Vega", "Theta", "Rho", "Breakeven", "State"
    );
    println!("{}", "-".repeat(86));

    for ot in [OptionType::Call, OptionType::Put] {
        let spec = OptionSpec::new(spot, strike, expiry, rate, vol, ot)?;
        let p = price(&spec);
        let g = greeks(&spec);
        let be = breakeven(strike, p, ot)?;
        let state = moneyness_state(spot, strike, ot);
        println!(
            "{:>5} {p:>10.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {be:>10.2} {state:?}",
            format!("{ot:?}"),
            g.delta,
            g.gamma,
            g.vega,
            g.theta,
            g.rho,
        );
    }

    // ---------------------------------------------------------------
    // 2. Scenario: spot +5, vol +2 points
    // ---------------------------------------------------------------

    let call = OptionSpec::new(spot, strike, expiry, rate, vol, OptionType::Call)?;
    let shift = ScenarioShift {
        spot_change: 5.0,
        vol_change_points: 2.0,
    };
    let estimate = scenario_change(&greeks(&call), &shift)?;
    let repriced = price(&call.with_spot(spot + 5.0)?.with_vol(vol + 0.02)?) - price(&call);
    println!("\nScenario spot +5, vol +2pt");
    println!("  Greeks estimate: {estimate:+.4}");
    println!("  Full repricing:  {repriced:+.4}");

    // ---------------------------------------------------------------
    // 3. Curves
    // ---------------------------------------------------------------

    let spots = spot_range(spot, 11)?;
    let prices = price_vs_spot(&call, &spots)?;
    let deltas = delta_vs_spot(&call, &spots)?;
    println!("\n{:>10} {:>10} {:>8}", "Spot", "Price", "Delta");
    for ((s, p), (_, d)) in prices.iter().zip(&deltas) {
        println!("{s:>10.2} {p:>10.4} {d:>8.4}");
    }

    let thetas = theta_vs_expiry(&call, &expiry_range(expiry, 6)?)?;
    println!("\n{:>10} {:>10}", "Expiry", "Theta/day");
    for (t, th) in &thetas {
        println!("{t:>10.4} {th:>10.4}");
    }

    Ok(())
}
