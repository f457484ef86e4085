use thiserror::Error;

/// Errors raised while validating integrator and sweep inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosslerError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, RosslerError>;

impl RosslerError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        RosslerError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
