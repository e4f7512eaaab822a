//! Internal optimization utilities for the implied-volatility solver.

/// Configuration for the bounded scalar minimizer.
pub(crate) struct BoundedConfig {
    /// Maximum number of objective evaluations.
    pub max_iter: usize,
    /// Absolute tolerance on the abscissa.
    pub xatol: f64,
}

/// Result of a bounded scalar minimization.
#[derive(Debug)]
pub(crate) struct BoundedResult {
    /// Best abscissa found, strictly inside `[lower, upper]`.
    pub x: f64,
    /// Objective value at `x`.
    pub fval: f64,
    /// Objective evaluations used.
    pub iterations: usize,
    /// False when the evaluation cap was hit before the bracket closed.
    pub converged: bool,
}

/// Minimize `objective(x)` on `[lower, upper]` with Brent's method.
///
/// Derivative-free: golden-section steps with parabolic interpolation when
/// the last three points allow it (Brent 1973, the algorithm behind
/// `fminbound`). The endpoints themselves are never evaluated, so a
/// minimum pinned at a bound is returned within tolerance of that bound.
pub(crate) fn minimize_bounded<F>(
    objective: F,
    lower: f64,
    upper: f64,
    config: &BoundedConfig,
) -> BoundedResult
where
    F: Fn(f64) -> f64,
{
    let sqrt_eps = f64::EPSILON.sqrt();
    let golden_mean = 0.5 * (3.0 - 5.0_f64.sqrt());

    let (mut a, mut b) = (lower, upper);
    let mut fulc = a + golden_mean * (b - a);
    let (mut nfc, mut xf) = (fulc, fulc);
    let (mut rat, mut e) = (0.0_f64, 0.0_f64);
    let mut fx = objective(xf);
    let mut evals = 1;
    let (mut ffulc, mut fnfc) = (fx, fx);

    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + config.xatol / 3.0;
    let mut tol2 = 2.0 * tol1;
    let mut converged = true;

    while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        if evals >= config.max_iter {
            converged = false;
            break;
        }

        let mut golden = true;
        if e.abs() > tol1 {
            // Fit a parabola through the three best points.
            golden = false;
            let mut r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            r = e;
            e = rat;

            if p.abs() < (0.5 * q * r).abs() && p > q * (a - xf) && p < q * (b - xf) {
                rat = p / q;
                let x = xf + rat;
                if (x - a) < tol2 || (b - x) < tol2 {
                    rat = tol1 * signum_or_one(xm - xf);
                }
            } else {
                golden = true;
            }
        }
        if golden {
            e = if xf >= xm { a - xf } else { b - xf };
            rat = golden_mean * e;
        }

        let x = xf + signum_or_one(rat) * rat.abs().max(tol1);
        let fu = objective(x);
        evals += 1;

        if fu <= fx {
            if x >= xf {
                a = xf;
            } else {
                b = xf;
            }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf {
                a = x;
            } else {
                b = x;
            }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + config.xatol / 3.0;
        tol2 = 2.0 * tol1;
    }

    BoundedResult {
        x: xf,
        fval: fx,
        iterations: evals,
        converged,
    }
}

/// Sign of `v`, with zero mapped to +1.
fn signum_or_one(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}
