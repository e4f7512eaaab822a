//! Simulate terminal prices under risk-neutral GBM.
//!
//! Shows how to:
//!   - Draw a reproducible sample with a fixed seed
//!   - Compare sample moments with the closed form
//!   - Bucket the sample into a histogram
//!
//! Run with: `cargo run --example monte_carlo`

use bsengine::analytics::historical_volatility;
use bsengine::conventions::forward_price;
use bsengine::{SimulationConfig, simulate_terminal_prices};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spot = 100.0;
    let rate = 0.05;
    let vol = 0.20;
    let expiry = 1.0;

    let cfg = SimulationConfig::default().sample_count(50_000).seed(7);
    let sim = simulate_terminal_prices(spot, rate, vol, expiry, &cfg)?;

    println!("{} terminal prices, seed 7\n", sim.len());
    println!("  Sample mean:        {:.4}", sim.mean());
    println!("  Forward S·e^(rT):   {:.4}", forward_price(spot, rate, expiry));
    println!("  Sample std:         {:.4}", sim.std_dev());
    println!("  Log-return std:     {:.4}", sim.log_return_std());
    println!("  σ·√T:               {:.4}", vol * expiry.sqrt());

    let hist = sim.histogram(12)?;
    let peak = hist.counts.iter().copied().max().unwrap_or(1).max(1);
    println!("\n{:>18} {:>7}", "Bin", "Count");
    for (i, &count) in hist.counts.iter().enumerate() {
        let bar = "#".repeat(count * 40 / peak);
        println!(
            "{:>8.2}-{:<8.2} {count:>7} {bar}",
            hist.edges[i],
            hist.edges[i + 1]
        );
    }

    // Historical vol of a short synthetic close series
    let closes = [100.0, 101.2, 100.4, 102.0, 101.1, 103.5, 102.8];
    println!("\nHistorical vol of {closes:?}: {:.4}", historical_volatility(&closes)?);

    Ok(())
}
