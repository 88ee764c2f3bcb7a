use thiserror::Error;

pub type NtpResult<T> = Result<T, NtpError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NtpError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
