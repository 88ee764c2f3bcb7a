//! Error types for model operations.

use ntp_core::error::NtpError;
use thiserror::Error;

/// Errors raised by the reactor/nozzle model.
///
/// Geometry and flow errors are contract violations and abort a run.
/// Nozzle degeneracies are not errors at all; they come back as a
/// `no_flow` [`crate::NozzleResult`]. `InvalidPropellantProperties` and
/// `NoFlow` are only produced when a caller asks for strict behaviour via
/// [`crate::NozzleResult::require_flow`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid geometry: {what} = {value}")]
    InvalidGeometry { what: &'static str, value: f64 },

    #[error("Invalid flow parameters: {what} = {value}")]
    InvalidFlowParameters { what: &'static str, value: f64 },

    #[error("Invalid propellant properties: gamma = {gamma}, molar_mass = {molar_mass} kg/mol")]
    InvalidPropellantProperties { gamma: f64, molar_mass: f64 },

    #[error("Invalid power shape '{shape}': {what}")]
    InvalidPowerShape { shape: String, what: &'static str },

    #[error("No nozzle flow: {reason}")]
    NoFlow { reason: crate::nozzle::NoFlowReason },

    #[error("Non-physical value: {what} = {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<ModelError> for NtpError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::InvalidGeometry { what, .. } => NtpError::InvalidArg { what },
            ModelError::InvalidFlowParameters { what, .. } => NtpError::InvalidArg { what },
            ModelError::InvalidPropellantProperties { .. } => NtpError::InvalidArg {
                what: "propellant properties",
            },
            ModelError::InvalidPowerShape { what, .. } => NtpError::InvalidArg { what },
            ModelError::NoFlow { .. } => NtpError::InvalidArg {
                what: "nozzle has no flow",
            },
            ModelError::NonFinite { what, value } => NtpError::NonFinite { what, value },
        }
    }
}
