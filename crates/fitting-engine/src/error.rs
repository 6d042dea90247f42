use fit_kernel::KernelError;
use fit_types::{MeasurementField, TypesError};

/// Errors from the fitting engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("input error: {0}")]
    Types(#[from] TypesError),

    #[error("geometry error: {0}")]
    Kernel(#[from] KernelError),

    #[error("reference {field} must be positive and finite, got {value}")]
    ZeroReference { field: MeasurementField, value: f64 },

    #[error("no catalog item with id {id:?}")]
    UnknownItem { id: String },

    #[error("configuration error: {reason}")]
    Config { reason: String },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}
