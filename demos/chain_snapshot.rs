//! Solve implied vols across a quoted option chain.
//!
//! Shows how to:
//!   - Turn bid/ask quotes into chain rows
//!   - Solve every row and keep per-row failures
//!   - Pick the at-the-money strike and the Greeks around it
//!
//! Run with: `cargo run --example chain_snapshot`

use bsengine::conventions::year_fraction;
use bsengine::implied::DEFAULT_NEARBY_BAND;
use bsengine::pricing::price;
use bsengine::{BlackScholesImpliedVol, ChainQuote, OptionSpec, OptionType, solve_chain};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spot = 187.3;
    let rate = 0.05;
    let expiry = year_fraction(30.0);

    // Synthetic quotes off a downward skew, plus one stale print.
    let mut quotes = Vec::new();
    for i in 0..13 {
        let k = 160.0 + 5.0 * i as f64;
        let vol = 0.26 - 0.30 * (k / spot).ln();
        let mid = price(&OptionSpec::new(spot, k, expiry, rate, vol, OptionType::Call)?);
        quotes.push(ChainQuote::from_bid_ask(k, 0.98 * mid, 1.02 * mid)?);
    }
    quotes.push(ChainQuote::new(240.0, 25.0));

    let solver = BlackScholesImpliedVol::default();
    let chain = solve_chain(&solver, spot, expiry, rate, OptionType::Call, &quotes)?;

    println!("Call chain, spot {spot}, {:.4}y\n", chain.expiry());
    println!("{:>8} {:>10} {:>10} {:>6} {:>10}", "Strike", "Mid", "IV", "Iter", "Converged");
    println!("{}", "-".repeat(48));
    for row in chain.rows() {
        match row {
            Ok(est) => println!(
                "{:>8.1} {:>10.4} {:>9.2}% {:>6} {:>10}",
                est.strike,
                est.market_price,
                est.volatility.0 * 100.0,
                est.iterations,
                est.converged
            ),
            Err(e) => println!("error: {e}"),
        }
    }

    println!(
        "\n{} of {} rows converged",
        chain.converged().count(),
        chain.len()
    );

    if let Some(atm) = chain.at_the_money() {
        println!("\nATM strike {} at {:.2}%", atm.strike, atm.volatility.0 * 100.0);
        println!("{:>8} {:>8} {:>8} {:>8} {:>8}", "Strike", "IV", "Delta", "Gamma", "Vega");
        for row in chain.nearby_greeks(atm.strike, DEFAULT_NEARBY_BAND)? {
            println!(
                "{:>8.1} {:>7.2}% {:>8.4} {:>8.4} {:>8.4}",
                row.strike,
                row.vol.0 * 100.0,
                row.greeks.delta,
                row.greeks.gamma,
                row.greeks.vega
            );
        }
    }

    Ok(())
}
