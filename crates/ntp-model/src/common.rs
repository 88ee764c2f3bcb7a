//! Common utilities for model input checks.

use crate::error::{ModelError, ModelResult};
use ntp_core::numeric::ensure_finite;

/// `true` when `v` is finite and strictly greater than zero.
///
/// Written so that NaN lands on the `false` side.
#[inline]
pub fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Ensure a value is finite, returning ModelError if not.
pub fn check_finite(value: f64, what: &'static str) -> ModelResult<()> {
    ensure_finite(value, what).map_err(|_| ModelError::NonFinite { what, value })?;
    Ok(())
}

/// Require a strictly positive geometric quantity.
pub fn require_geometry(value: f64, what: &'static str) -> ModelResult<f64> {
    if is_positive(value) {
        Ok(value)
    } else {
        Err(ModelError::InvalidGeometry { what, value })
    }
}

/// Require a strictly positive flow quantity.
pub fn require_flow(value: f64, what: &'static str) -> ModelResult<f64> {
    if is_positive(value) {
        Ok(value)
    } else {
        Err(ModelError::InvalidFlowParameters { what, value })
    }
}
