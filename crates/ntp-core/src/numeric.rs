use crate::NtpError;

/// Floating point type used throughout the model
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, NtpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(NtpError::NonFinite { what, value: v })
    }
}

/// `count` evenly spaced points from `start` to `end` inclusive.
///
/// A single point sits at `start`. The last point is pinned to `end` so
/// accumulated rounding never leaves it short.
pub fn linspace(start: Real, end: Real, count: usize) -> Vec<Real> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (count - 1) as Real;
            let mut points: Vec<Real> = (0..count).map(|i| start + i as Real * delta).collect();
            points[count - 1] = end;
            points
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn linspace_endpoints() {
        let pts = linspace(0.0, 1.2, 100);
        assert_eq!(pts.len(), 100);
        assert_eq!(pts[0], 0.0);
        assert_eq!(pts[99], 1.2);
        assert!(pts.windows(2).all(|w| w[1] >= w[0]));

        assert_eq!(linspace(0.0, 1.2, 1), vec![0.0]);
        assert!(linspace(0.0, 1.2, 0).is_empty());
    }
}
