//! Curves of price and Greeks along one varying input.
//!
//! Each sweep returns `(x, y)` pairs ready for a plotting collaborator. Points
//! are evaluated through [`price`] and [`greeks`], so the boundary policy of
//! those functions applies unchanged: a point at zero expiry gets the payoff
//! and zero Greeks, with no volatility or time floor substituted.

use crate::error::Result;
use crate::greeks::greeks;
use crate::pricing::price;
use crate::types::OptionSpec;
use crate::validate::{validate_non_negative, validate_positive};

/// Number of points in the default sweep ranges.
pub const DEFAULT_SWEEP_POINTS: usize = 100;

/// Shortest expiry in the default theta-decay range (years).
pub const MIN_SWEEP_EXPIRY: f64 = 0.01;

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// ```
/// use bsengine::sweep::linspace;
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Spot grid from 50% to 150% of `spot`.
///
/// # Errors
/// Returns [`EngineError::InvalidInput`](crate::EngineError::InvalidInput)
/// if `spot` is not positive.
pub fn spot_range(spot: f64, n: usize) -> Result<Vec<f64>> {
    validate_positive(spot, "spot")?;
    Ok(linspace(0.5 * spot, 1.5 * spot, n))
}

/// Expiry grid from [`MIN_SWEEP_EXPIRY`] (or `expiry`, if shorter) to `expiry`.
///
/// # Errors
/// Returns [`EngineError::InvalidInput`](crate::EngineError::InvalidInput)
/// if `expiry` is negative.
pub fn expiry_range(expiry: f64, n: usize) -> Result<Vec<f64>> {
    validate_non_negative(expiry, "expiry")?;
    Ok(linspace(MIN_SWEEP_EXPIRY.min(expiry), expiry, n))
}

fn sweep<R, M>(xs: &[f64], rebuild: R, measure: M) -> Result<Vec<(f64, f64)>>
where
    R: Fn(f64) -> Result<OptionSpec>,
    M: Fn(&OptionSpec) -> f64,
{
    xs.iter()
        .map(|&x| rebuild(x).map(|spec| (x, measure(&spec))))
        .collect()
}

/// Option price at each spot in `spots`, other inputs from `spec`.
///
/// # Errors
/// Returns [`EngineError::InvalidInput`](crate::EngineError::InvalidInput)
/// at the first non-positive spot.
pub fn price_vs_spot(spec: &OptionSpec, spots: &[f64]) -> Result<Vec<(f64, f64)>> {
    sweep(spots, |s| spec.with_spot(s), price)
}

/// Delta at each spot in `spots`.
///
/// # Errors
/// Returns [`EngineError::InvalidInput`](crate::EngineError::InvalidInput)
/// at the first non-positive spot.
pub fn delta_vs_spot(spec: &OptionSpec, spots: &[f64]) -> Result<Vec<(f64, f64)>> {
    sweep(spots, |s| spec.with_spot(s), |g| greeks(g).delta)
}

/// Gamma at each spot in `spots`.
///
/// # Errors
/// Returns [`EngineError::InvalidInput`](crate::EngineError::InvalidInput)
/// at the first non-positive spot.
pub fn gamma_vs_spot(spec: &OptionSpec, spots: &[f64]) -> Result<Vec<(f64, f64)>> {
    sweep(spots, |s| spec.with_spot(s), |g| greeks(g).gamma)
}

/// Per-day theta at each expiry in `expiries`.
///
/// # Errors
/// Returns [`EngineError::InvalidInput`](crate::EngineError::InvalidInput)
/// at the first negative expiry.
pub fn theta_vs_expiry(spec: &OptionSpec, expiries: &[f64]) -> Result<Vec<(f64, f64)>> {
    sweep(expiries, |t| spec.with_expiry(t), |g| greeks(g).theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OptionType;
    use approx::assert_abs_diff_eq;

    fn atm_call() -> OptionSpec {
        OptionSpec::new(100.0, 100.0, 0.5, 0.05, 0.25, OptionType::Call).unwrap()
    }

    #[test]
    fn linspace_hits_both_ends() {
        let xs = linspace(0.01, 0.37, 100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.01);
        assert_eq!(xs[99], 0.37);
    }

    #[test]
    fn default_ranges() {
        let spots = spot_range(200.0, DEFAULT_SWEEP_POINTS).unwrap();
        assert_eq!(spots.first(), Some(&100.0));
        assert_eq!(spots.last(), Some(&300.0));
        let ts = expiry_range(0.5, 10).unwrap();
        assert_eq!(ts[0], MIN_SWEEP_EXPIRY);
        assert_eq!(ts[9], 0.5);
        assert_eq!(expiry_range(0.005, 3).unwrap()[0], 0.005);
        assert!(spot_range(-1.0, 10).is_err());
    }

    #[test]
    fn call_price_curve_is_increasing_in_spot() {
        let curve = price_vs_spot(&atm_call(), &spot_range(100.0, 50).unwrap()).unwrap();
        assert!(curve.windows(2).all(|w| w[1].1 > w[0].1));
    }

    #[test]
    fn delta_curve_spans_zero_to_one() {
        let curve = delta_vs_spot(&atm_call(), &linspace(20.0, 500.0, 25)).unwrap();
        assert!(curve.first().unwrap().1 < 0.01);
        assert!(curve.last().unwrap().1 > 0.99);
        assert!(curve.windows(2).all(|w| w[1].1 >= w[0].1));
    }

    #[test]
    fn gamma_peaks_near_the_strike() {
        let curve = gamma_vs_spot(&atm_call(), &spot_range(100.0, 101).unwrap()).unwrap();
        let (peak_spot, _) = curve
            .iter()
            .copied()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert!((90.0..=105.0).contains(&peak_spot));
    }

    #[test]
    fn theta_decay_steepens_toward_expiry() {
        let curve = theta_vs_expiry(&atm_call(), &expiry_range(0.5, 20).unwrap()).unwrap();
        assert!(curve.first().unwrap().1 < curve.last().unwrap().1);
    }

    #[test]
    fn zero_expiry_point_uses_boundary_values() {
        let curve = theta_vs_expiry(&atm_call(), &[0.0, 0.5]).unwrap();
        assert_eq!(curve[0], (0.0, 0.0));
        let price_curve = price_vs_spot(&atm_call().with_expiry(0.0).unwrap(), &[120.0]).unwrap();
        assert_abs_diff_eq!(price_curve[0].1, 20.0);
    }

    #[test]
    fn invalid_point_fails_the_sweep() {
        assert!(price_vs_spot(&atm_call(), &[100.0, 0.0]).is_err());
        assert!(theta_vs_expiry(&atm_call(), &[-0.1]).is_err());
    }
}
