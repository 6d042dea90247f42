pub mod garment;
pub mod measurements;

pub use garment::*;
pub use measurements::*;

/// Errors raised while constructing or parsing fitting-room input types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypesError {
    #[error("{field} = {value} is outside the valid range [{min}, {max}]")]
    OutOfRangeMeasurement {
        field: MeasurementField,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown slot {name:?} (expected top, bottom or shoes)")]
    UnknownSlot { name: String },

    #[error("unknown catalog category {name:?} (expected tops, bottoms or shoes)")]
    UnknownCategory { name: String },

    #[error("invalid colour {value:?}: expected #RRGGBB")]
    InvalidColor { value: String },
}
