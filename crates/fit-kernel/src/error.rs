/// Errors raised by the geometry builders.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("invalid profile {label:?}: {reason}")]
    InvalidProfile { label: String, reason: String },

    #[error("need at least {required} segments, got {provided}")]
    InsufficientSegments { required: usize, provided: usize },

    #[error("{parameter} must be positive and finite, got {value}")]
    InvalidDimension { parameter: &'static str, value: f64 },

    #[error("malformed mesh: {reason}")]
    MalformedMesh { reason: String },
}

impl KernelError {
    pub(crate) fn invalid_profile(label: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            label: label.to_string(),
            reason: reason.into(),
        }
    }
}

/// Reject zero, negative and non-finite lengths.
pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<(), KernelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidDimension { parameter, value })
    }
}

pub(crate) fn require_segments(required: usize, provided: usize) -> Result<(), KernelError> {
    if provided < required {
        Err(KernelError::InsufficientSegments { required, provided })
    } else {
        Ok(())
    }
}
