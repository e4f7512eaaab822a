//! Extract implied volatility from option prices.
//!
//! Shows how to:
//!   - Price an option with Black-Scholes
//!   - Recover implied vol with the bounded solver
//!   - Detect a quote the model cannot reproduce
//!
//! Run with: `cargo run --example implied_vol`

use bsengine::pricing::price;
use bsengine::{BlackScholesImpliedVol, OptionSpec, OptionType, SolverConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spot = 100.0;
    let strike = 105.0;
    let expiry = 0.5; // 6 months
    let rate = 0.05;
    let vol = 0.25; // 25% implied vol

    // ---------------------------------------------------------------
    // 1. Price a call and a put
    // ---------------------------------------------------------------

    let call = OptionSpec::new(spot, strike, expiry, rate, vol, OptionType::Call)?;
    let put = OptionSpec::new(spot, strike, expiry, rate, vol, OptionType::Put)?;
    let call_price = price(&call);
    let put_price = price(&put);

    println!("Black-Scholes pricing");
    println!("  Spot:    {spot}");
    println!("  Strike:  {strike}");
    println!("  Expiry:  {expiry}y");
    println!("  Rate:    {:.0}%", rate * 100.0);
    println!("  Vol:     {:.0}%", vol * 100.0);
    println!();
    println!("  Call price: {call_price:.6}");
    println!("  Put price:  {put_price:.6}");
    println!(
        "  Put-call parity check: C - P = {:.6}, S - K·e^(-rT) = {:.6}",
        call_price - put_price,
        spot - strike * (-rate * expiry).exp()
    );

    // ---------------------------------------------------------------
    // 2. Recover the vol from the prices
    // ---------------------------------------------------------------

    let solver = BlackScholesImpliedVol::default();
    let iv_call = solver.compute(call_price, spot, strike, expiry, rate, OptionType::Call)?;
    let iv_put = solver.compute(put_price, spot, strike, expiry, rate, OptionType::Put)?;

    println!("\nImplied vol extraction (bounded Brent on [1%, 200%])");
    println!("  From call: {:.10} ({} iterations)", iv_call.volatility.0, iv_call.iterations);
    println!("  From put:  {:.10} ({} iterations)", iv_put.volatility.0, iv_put.iterations);
    println!("  Input vol: {vol:.10}");
    println!("  Call residual: {:.2e}", iv_call.residual());

    // ---------------------------------------------------------------
    // 3. Scan across strikes
    // ---------------------------------------------------------------

    println!("\n--- IV extraction across strikes ---\n");
    println!("{:>8} {:>12} {:>12} {:>12}", "Strike", "Call Price", "IV", "Residual");
    println!("{}", "-".repeat(48));

    for k in [80.0, 90.0, 95.0, 100.0, 105.0, 110.0, 120.0] {
        let p = price(&call.with_strike(k)?);
        let est = solver.compute(p, spot, k, expiry, rate, OptionType::Call)?;
        println!(
            "{k:>8.0} {p:>12.6} {:>11.6}% {:>12.2e}",
            est.volatility.0 * 100.0,
            est.residual()
        );
    }

    // ---------------------------------------------------------------
    // 4. A quote no vol in the search interval can reach
    // ---------------------------------------------------------------

    let stale = 120.0; // above the spot, impossible for a call
    let est = solver.compute(stale, spot, strike, expiry, rate, OptionType::Call)?;
    println!("\nStale quote {stale}");
    println!("  converged: {}", est.converged);
    println!("  usable vol: {:?}", est.usable_vol());
    println!("  best vol {:.4} reprices to {:.4}", est.volatility.0, est.model_price);

    // Tighter budgets are configured up front
    let strict = BlackScholesImpliedVol::new(SolverConfig::default().max_iter(10))?;
    let est = strict.compute(call_price, spot, strike, expiry, rate, OptionType::Call)?;
    println!("\nWith max_iter = 10: converged = {}, vol = {:.6}", est.converged, est.volatility.0);

    Ok(())
}
