//! Closed-form Black-Scholes sensitivities.
//!
//! Shares `d1`/`d2` with [`pricing`](crate::pricing). Units are part of the
//! contract: vega and rho per one percentage point, theta per calendar day.

use crate::conventions::{DAYS_PER_YEAR, discount_factor};
use crate::pricing::{d1_d2, norm_cdf, norm_pdf};
use crate::types::{Greeks, OptionSpec, OptionType};

/// Percentage-point scaling applied to vega and rho.
const PER_POINT: f64 = 100.0;

/// Delta, gamma, vega, theta and rho of a European option.
///
/// Returns [`Greeks::ZERO`] when `T ≤ 0` or `σ ≤ 0`: sensitivities vanish at
/// or past expiry and without diffusion.
///
/// # Examples
/// ```
/// use bsengine::{OptionSpec, OptionType, greeks::greeks};
///
/// let spec = OptionSpec::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call)?;
/// let g = greeks(&spec);
/// assert!((g.delta - 0.6368).abs() < 1e-4);
/// assert!((g.theta - (-0.0176)).abs() < 1e-4);
/// # Ok::<(), bsengine::EngineError>(())
/// ```
pub fn greeks(spec: &OptionSpec) -> Greeks {
    if spec.is_degenerate() {
        return Greeks::ZERO;
    }

    let (s, k, t, r, vol) = (
        spec.spot(),
        spec.strike(),
        spec.expiry(),
        spec.rate(),
        spec.vol(),
    );
    let (d1, d2) = d1_d2(s, k, t, r, vol);
    let sqrt_t = t.sqrt();
    let pdf_d1 = norm_pdf(d1);
    let df = discount_factor(r, t);

    let gamma = pdf_d1 / (s * vol * sqrt_t);
    let vega = s * pdf_d1 * sqrt_t / PER_POINT;
    let decay = -(s * pdf_d1 * vol) / (2.0 * sqrt_t);

    let (delta, theta, rho) = match spec.option_type() {
        OptionType::Call => (
            norm_cdf(d1),
            decay - r * k * df * norm_cdf(d2),
            k * t * df * norm_cdf(d2),
        ),
        OptionType::Put => (
            -norm_cdf(-d1),
            decay + r * k * df * norm_cdf(-d2),
            -k * t * df * norm_cdf(-d2),
        ),
    };

    Greeks {
        delta,
        gamma,
        vega,
        theta: theta / DAYS_PER_YEAR,
        rho: rho / PER_POINT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price;
    use approx::assert_abs_diff_eq;

    fn spec(spot: f64, strike: f64, t: f64, r: f64, vol: f64, ot: OptionType) -> OptionSpec {
        OptionSpec::new(spot, strike, t, r, vol, ot).unwrap()
    }

    #[test]
    fn reference_call_greeks() {
        let g = greeks(&spec(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call));
        assert_abs_diff_eq!(g.delta, 0.6368, epsilon = 1e-4);
        assert_abs_diff_eq!(g.gamma, 0.0188, epsilon = 1e-4);
        assert_abs_diff_eq!(g.vega, 0.3752, epsilon = 1e-4);
        assert_abs_diff_eq!(g.theta, -0.0176, epsilon = 1e-4);
        assert_abs_diff_eq!(g.rho, 0.5323, epsilon = 1e-4);
    }

    #[test]
    fn reference_put_greeks() {
        let g = greeks(&spec(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put));
        assert_abs_diff_eq!(g.delta, -0.3632, epsilon = 1e-4);
        assert_abs_diff_eq!(g.theta, -0.0045, epsilon = 1e-4);
        assert_abs_diff_eq!(g.rho, -0.4189, epsilon = 1e-4);
    }

    #[test]
    fn gamma_and_vega_are_side_independent() {
        let c = greeks(&spec(100.0, 110.0, 0.4, 0.02, 0.3, OptionType::Call));
        let p = greeks(&spec(100.0, 110.0, 0.4, 0.02, 0.3, OptionType::Put));
        assert_abs_diff_eq!(c.gamma, p.gamma, epsilon = 1e-15);
        assert_abs_diff_eq!(c.vega, p.vega, epsilon = 1e-15);
        assert_abs_diff_eq!(c.delta - p.delta, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_inputs_give_zero_greeks() {
        assert_eq!(
            greeks(&spec(100.0, 90.0, 0.0, 0.05, 0.2, OptionType::Call)),
            Greeks::ZERO
        );
        assert_eq!(
            greeks(&spec(100.0, 90.0, 1.0, 0.05, 0.0, OptionType::Put)),
            Greeks::ZERO
        );
    }

    #[test]
    fn vega_matches_one_point_bump() {
        let base = spec(100.0, 95.0, 0.5, 0.04, 0.25, OptionType::Call);
        let h = 1e-4;
        let up = price(&base.with_vol(0.25 + h).unwrap());
        let dn = price(&base.with_vol(0.25 - h).unwrap());
        let fd_per_point = (up - dn) / (2.0 * h) / 100.0;
        assert_abs_diff_eq!(greeks(&base).vega, fd_per_point, epsilon = 1e-6);
    }

    #[test]
    fn rho_matches_one_point_bump() {
        let h = 1e-5;
        let up = spec(100.0, 95.0, 0.5, 0.04 + h, 0.25, OptionType::Put);
        let dn = spec(100.0, 95.0, 0.5, 0.04 - h, 0.25, OptionType::Put);
        let fd = (price(&up) - price(&dn)) / (2.0 * h) / 100.0;
        let g = greeks(&spec(100.0, 95.0, 0.5, 0.04, 0.25, OptionType::Put));
        assert_abs_diff_eq!(g.rho, fd, epsilon = 1e-6);
    }

    #[test]
    fn theta_matches_one_day_decay() {
        let base = spec(100.0, 105.0, 0.5, 0.03, 0.3, OptionType::Call);
        let h = 1e-5;
        let later = price(&base.with_expiry(0.5 - h).unwrap());
        let earlier = price(&base.with_expiry(0.5 + h).unwrap());
        let fd_per_day = (later - earlier) / (2.0 * h) / 365.0;
        assert_abs_diff_eq!(greeks(&base).theta, fd_per_day, epsilon = 1e-7);
    }
}
