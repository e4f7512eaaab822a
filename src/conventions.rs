//! Market conventions shared by the pricer, solver and analytics.
//!
//! Time is measured in years on an ACT/365 basis and rates are continuously
//! compounded, matching how chain expiries are converted before they reach
//! the engine.

/// Calendar days per year used for expiry fractions and per-day theta.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Trading days per year used to annualize daily historical volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Convert a number of calendar days to a year fraction: `T = days / 365`.
pub fn year_fraction(days: f64) -> f64 {
    days / DAYS_PER_YEAR
}

/// Discount factor `e^(−r·T)`.
pub fn discount_factor(rate: f64, expiry: f64) -> f64 {
    (-rate * expiry).exp()
}

/// Compute forward price from spot: F = S · exp(r · T).
pub fn forward_price(spot: f64, rate: f64, expiry: f64) -> f64 {
    spot * (rate * expiry).exp()
}

/// Simple moneyness: m = K / S.
pub fn moneyness(strike: f64, spot: f64) -> f64 {
    strike / spot
}

/// Convert a strike to log-moneyness against the forward: k = ln(K / F).
pub fn log_moneyness(strike: f64, forward: f64) -> f64 {
    (strike / forward).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn thirty_days_is_fraction_of_year() {
        assert_abs_diff_eq!(year_fraction(36.5), 0.1, epsilon = 1e-15);
    }

    #[test]
    fn discount_and_forward_are_reciprocal() {
        let df = discount_factor(0.05, 2.0);
        let fwd = forward_price(100.0, 0.05, 2.0);
        assert_abs_diff_eq!(fwd * df, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn log_moneyness_at_the_forward_is_zero() {
        assert_abs_diff_eq!(log_moneyness(105.0, 105.0), 0.0);
        assert_abs_diff_eq!(moneyness(110.0, 100.0), 1.1, epsilon = 1e-15);
    }
}
