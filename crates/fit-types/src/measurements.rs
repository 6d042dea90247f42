use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// One of the five body measurements that drive the mannequin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementField {
    Height,
    Chest,
    Waist,
    Hips,
    Shoulders,
}

impl MeasurementField {
    pub const ALL: [MeasurementField; 5] = [
        MeasurementField::Height,
        MeasurementField::Chest,
        MeasurementField::Waist,
        MeasurementField::Hips,
        MeasurementField::Shoulders,
    ];

    /// Inclusive valid range in centimetres.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Height => (150.0, 200.0),
            Self::Shoulders => (35.0, 50.0),
            Self::Chest | Self::Waist | Self::Hips => (60.0, 130.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::Chest => "chest",
            Self::Waist => "waist",
            Self::Hips => "hips",
            Self::Shoulders => "shoulders",
        }
    }
}

impl fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Body measurements in centimetres.
///
/// Fields are public so a UI layer can hold slider values that have not been
/// validated yet. Use [`Measurements::new`] or [`Measurements::validate`] to
/// enforce the documented ranges; the engine re-validates at its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub height: f64,
    pub chest: f64,
    pub waist: f64,
    pub hips: f64,
    pub shoulders: f64,
}

impl Measurements {
    /// The storefront's default body.
    pub const DEFAULT: Self = Self {
        height: 170.0,
        chest: 90.0,
        waist: 75.0,
        hips: 95.0,
        shoulders: 40.0,
    };

    /// Build a validated set of measurements.
    pub fn new(
        height: f64,
        chest: f64,
        waist: f64,
        hips: f64,
        shoulders: f64,
    ) -> Result<Self, TypesError> {
        let m = Self {
            height,
            chest,
            waist,
            hips,
            shoulders,
        };
        m.validate()?;
        Ok(m)
    }

    pub fn get(&self, field: MeasurementField) -> f64 {
        match field {
            MeasurementField::Height => self.height,
            MeasurementField::Chest => self.chest,
            MeasurementField::Waist => self.waist,
            MeasurementField::Hips => self.hips,
            MeasurementField::Shoulders => self.shoulders,
        }
    }

    /// Return a copy with one field replaced. Does not validate.
    pub fn with(mut self, field: MeasurementField, value: f64) -> Self {
        match field {
            MeasurementField::Height => self.height = value,
            MeasurementField::Chest => self.chest = value,
            MeasurementField::Waist => self.waist = value,
            MeasurementField::Hips => self.hips = value,
            MeasurementField::Shoulders => self.shoulders = value,
        }
        self
    }

    /// Check every field against its range. NaN is always out of range.
    pub fn validate(&self) -> Result<(), TypesError> {
        for field in MeasurementField::ALL {
            let value = self.get(field);
            let (min, max) = field.range();
            if !(min..=max).contains(&value) {
                return Err(TypesError::OutOfRangeMeasurement {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl Default for Measurements {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(Measurements::DEFAULT.validate().is_ok());
        assert_eq!(Measurements::default(), Measurements::DEFAULT);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(Measurements::new(150.0, 60.0, 60.0, 60.0, 35.0).is_ok());
        assert!(Measurements::new(200.0, 130.0, 130.0, 130.0, 50.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_height() {
        let err = Measurements::new(149.9, 90.0, 75.0, 95.0, 40.0).unwrap_err();
        assert_eq!(
            err,
            TypesError::OutOfRangeMeasurement {
                field: MeasurementField::Height,
                value: 149.9,
                min: 150.0,
                max: 200.0,
            }
        );
    }

    #[test]
    fn rejects_nan() {
        let m = Measurements::DEFAULT.with(MeasurementField::Waist, f64::NAN);
        assert!(matches!(
            m.validate(),
            Err(TypesError::OutOfRangeMeasurement {
                field: MeasurementField::Waist,
                ..
            })
        ));
    }

    #[test]
    fn with_replaces_only_one_field() {
        let m = Measurements::DEFAULT.with(MeasurementField::Shoulders, 45.0);
        assert_eq!(m.shoulders, 45.0);
        assert_eq!(m.height, 170.0);
        assert_eq!(m.get(MeasurementField::Shoulders), 45.0);
    }

    #[test]
    fn serde_uses_plain_field_names() {
        let json = serde_json::to_string(&Measurements::DEFAULT).unwrap();
        assert!(json.contains("\"height\":170.0"));
        let back: Measurements = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Measurements::DEFAULT);
    }
}
