//! Measurements to scale factors.
//!
//! Every factor is `measurement / reference`. The reference body is
//! configurable and defaults to the storefront's default measurements.

use fit_types::{MeasurementField, Measurements};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FitError;

/// Denominators used to turn centimetres into scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceBody {
    pub height: f64,
    pub chest: f64,
    pub waist: f64,
    pub hips: f64,
    pub shoulders: f64,
}

impl Default for ReferenceBody {
    fn default() -> Self {
        let m = Measurements::DEFAULT;
        Self {
            height: m.height,
            chest: m.chest,
            waist: m.waist,
            hips: m.hips,
            shoulders: m.shoulders,
        }
    }
}

impl ReferenceBody {
    pub fn get(&self, field: MeasurementField) -> f64 {
        match field {
            MeasurementField::Height => self.height,
            MeasurementField::Chest => self.chest,
            MeasurementField::Waist => self.waist,
            MeasurementField::Hips => self.hips,
            MeasurementField::Shoulders => self.shoulders,
        }
    }

    pub fn validate(&self) -> Result<(), FitError> {
        for field in MeasurementField::ALL {
            let value = self.get(field);
            if !(value.is_finite() && value > 0.0) {
                return Err(FitError::ZeroReference { field, value });
            }
        }
        Ok(())
    }
}

/// Dimensionless multipliers applied to the reference geometry.
///
/// The chest and waist factors are cross-mapped: the chest-scaled bands of
/// every profile follow the waist measurement and the waist-scaled bands
/// follow the chest measurement. This is most likely a defect; it is kept
/// deliberately, and named for what it does, until the intended mapping is
/// confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub height_scale: f64,
    pub shoulder_scale: f64,
    pub hip_scale: f64,
    /// `waist / reference.waist`; drives the chest bands.
    pub cross_mapped_chest_scale: f64,
    /// `chest / reference.chest`; drives the waist bands.
    pub cross_mapped_waist_scale: f64,
}

impl ScaleFactors {
    /// The factors of the reference body itself.
    pub const IDENTITY: Self = Self {
        height_scale: 1.0,
        shoulder_scale: 1.0,
        hip_scale: 1.0,
        cross_mapped_chest_scale: 1.0,
        cross_mapped_waist_scale: 1.0,
    };
}

/// Turns measurements into [`ScaleFactors`] against a fixed reference body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleResolver {
    reference: ReferenceBody,
}

impl ScaleResolver {
    pub fn new(reference: ReferenceBody) -> Result<Self, FitError> {
        reference.validate()?;
        Ok(Self { reference })
    }

    pub fn reference(&self) -> &ReferenceBody {
        &self.reference
    }

    /// Pure division. Range checks happen at the viewport boundary, not here.
    pub fn resolve(&self, m: &Measurements) -> ScaleFactors {
        let r = &self.reference;
        let factors = ScaleFactors {
            height_scale: m.height / r.height,
            shoulder_scale: m.shoulders / r.shoulders,
            hip_scale: m.hips / r.hips,
            cross_mapped_chest_scale: m.waist / r.waist,
            cross_mapped_waist_scale: m.chest / r.chest,
        };
        debug!(?factors, "resolved scale factors");
        factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_measurements_resolve_to_identity() {
        let s = ScaleResolver::default().resolve(&Measurements::DEFAULT);
        assert_eq!(s, ScaleFactors::IDENTITY);
    }

    #[test]
    fn chest_and_waist_are_cross_mapped() {
        let m = Measurements::DEFAULT
            .with(MeasurementField::Chest, 108.0)
            .with(MeasurementField::Waist, 60.0);
        let s = ScaleResolver::default().resolve(&m);
        assert_relative_eq!(s.cross_mapped_chest_scale, 0.8);
        assert_relative_eq!(s.cross_mapped_waist_scale, 1.2);
        assert_eq!(s.height_scale, 1.0);
    }

    #[test]
    fn every_factor_follows_its_field() {
        let m = Measurements::new(200.0, 90.0, 75.0, 114.0, 50.0).unwrap();
        let s = ScaleResolver::default().resolve(&m);
        assert_relative_eq!(s.height_scale, 200.0 / 170.0);
        assert_relative_eq!(s.hip_scale, 1.2);
        assert_relative_eq!(s.shoulder_scale, 1.25);
    }

    #[test]
    fn zero_reference_is_rejected() {
        let reference = ReferenceBody {
            hips: 0.0,
            ..ReferenceBody::default()
        };
        assert_eq!(
            ScaleResolver::new(reference),
            Err(FitError::ZeroReference {
                field: MeasurementField::Hips,
                value: 0.0
            })
        );
    }
}
