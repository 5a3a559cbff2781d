use crate::error::{Error, Result};

const MAX_ITER: usize = 1024;

/// Find a root of `f` inside the bracket `[left, right]` using Brent's
/// method (bisection with inverse quadratic interpolation).
///
/// `eps_abs` and `eps_rel` bound the width of the final interval. Fails
/// with [`Error::NotBracketed`] when the endpoints do not straddle a sign
/// change and with [`Error::NoConvergence`] when the iteration budget runs
/// out before the tolerance is met; an inaccurate root is never returned
/// silently.
pub fn solve_bracketed<F>(
    mut f: F,
    left: f64,
    right: f64,
    eps_abs: f64,
    eps_rel: f64,
) -> Result<f64>
where
    F: FnMut(f64) -> f64,
{
    let (mut a, mut b) = (left, right);
    let (mut fa, mut fb) = (f(a), f(b));
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if (fa > 0.0 && fb > 0.0) || (fa < 0.0 && fb < 0.0) {
        return Err(Error::NotBracketed(left, right));
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = b - a;
    for _ in 0..MAX_ITER {
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            // root left the [b, c] side; rebracket with a
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * (eps_abs + eps_rel * b.abs());
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            // inverse quadratic interpolation, degrading to secant when
            // only two distinct points are available
            let s = fb / fa;
            let (mut p, mut q);
            if a == c {
                p = 2.0 * xm * s;
                q = 1.0 - s;
            } else {
                let r0 = fa / fc;
                let r1 = fb / fc;
                p = s * (2.0 * xm * r0 * (r0 - r1) - (b - a) * (r1 - 1.0));
                q = (r0 - 1.0) * (r1 - 1.0) * (s - 1.0);
            }
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let min1 = 3.0 * xm * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                // interpolation accepted
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        if d.abs() > tol {
            b += d;
        } else {
            b += tol.copysign(xm);
        }
        fb = f(b);
    }
    Err(Error::NoConvergence)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn linear_root() {
        let root = solve_bracketed(|x| x - 1.0, -1e9, 1e9, EPS, EPS).unwrap();
        assert!((root - 1.0).abs() <= 1e-9);
    }

    #[test]
    fn cubic_root() {
        let root = solve_bracketed(|x| x * x * x - 8.0, 0.0, 100.0, EPS, EPS).unwrap();
        assert!((root - 2.0).abs() <= 1e-9);
    }

    #[test]
    fn endpoint_root_is_exact() {
        assert_eq!(solve_bracketed(|x| x, 0.0, 1.0, EPS, EPS).unwrap(), 0.0);
    }

    #[test]
    fn monotone_sigmoid_root() {
        // same shape as the electron-count residual
        let target = 1.3;
        let f = |mu: f64| target - 2.0 / ((0.5 - mu).exp() + 1.0);
        let root = solve_bracketed(f, -100.0, 100.0, EPS, EPS).unwrap();
        assert!(f(root).abs() <= 1e-9);
    }

    #[test]
    fn unbracketed_fails() {
        assert!(matches!(
            solve_bracketed(|x| x * x + 1.0, -1.0, 1.0, EPS, EPS),
            Err(Error::NotBracketed(_, _))
        ));
    }
}
