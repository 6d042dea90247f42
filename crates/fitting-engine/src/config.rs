//! Engine configuration.
//!
//! Everything has a default so an empty JSON object is a valid config.

use fit_types::GarmentCatalog;
use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::scale::{ReferenceBody, ScaleResolver};
use crate::tables::Segment;

/// Tunable engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Denominators for the scale factors.
    pub reference: ReferenceBody,
    /// Tessellation multiplier applied to every sample and segment count.
    /// `1.0` is full storefront quality. Must lie in `(0, MAX_DETAIL]`.
    pub detail: f64,
}

/// Upper bound on [`FitConfig::detail`]. Keeps vertex counts well inside the
/// `u32` index range of [`fit_kernel::TriangleMesh`].
pub const MAX_DETAIL: f64 = 4.0;

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            reference: ReferenceBody::default(),
            detail: 1.0,
        }
    }
}

impl FitConfig {
    /// Half-resolution meshes for fast interactive previews.
    pub fn preview() -> Self {
        Self {
            detail: 0.5,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, FitError> {
        let config: Self = serde_json::from_str(json).map_err(|e| FitError::Config {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FitError> {
        if !(self.detail > 0.0 && self.detail <= MAX_DETAIL) {
            return Err(FitError::Config {
                reason: format!(
                    "detail must be in (0, {MAX_DETAIL}], got {}",
                    self.detail
                ),
            });
        }
        self.reference.validate()
    }

    /// Validated resolver for this config's reference body. Every builder
    /// goes through here, so an out-of-range `detail` never reaches the
    /// tessellators.
    pub fn scale_resolver(&self) -> Result<ScaleResolver, FitError> {
        self.validate()?;
        ScaleResolver::new(self.reference)
    }

    pub fn profile_samples(&self, segment: Segment) -> usize {
        self.scaled(segment.base_samples(), 1)
    }

    pub fn radial_segments(&self, segment: Segment) -> usize {
        self.scaled(segment.base_radial_segments(), 3)
    }

    /// Sphere subdivisions for a full-detail count of `base`.
    pub fn sphere_segments(&self, base: usize) -> (usize, usize) {
        (self.scaled(base, 3), self.scaled(base, 2))
    }

    pub fn cylinder_segments(&self, base: usize) -> usize {
        self.scaled(base, 3)
    }

    fn scaled(&self, base: usize, min: usize) -> usize {
        ((base as f64 * self.detail).round() as usize).max(min)
    }
}

/// Parse a storefront catalog in the `{ tops, bottoms, shoes }` layout.
pub fn catalog_from_json(json: &str) -> Result<GarmentCatalog, FitError> {
    serde_json::from_str(json).map_err(|e| FitError::Config {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(FitConfig::from_json("{}").unwrap(), FitConfig::default());
    }

    #[test]
    fn partial_reference_keeps_other_defaults() {
        let config = FitConfig::from_json(r#"{ "reference": { "height": 180 } }"#).unwrap();
        assert_eq!(config.reference.height, 180.0);
        assert_eq!(config.reference.chest, 90.0);
        assert_eq!(config.detail, 1.0);
    }

    #[test]
    fn preview_halves_counts_with_floors() {
        let config = FitConfig::preview();
        assert_eq!(config.profile_samples(Segment::Torso), 40);
        assert_eq!(config.radial_segments(Segment::Torso), 24);
        assert_eq!(config.profile_samples(Segment::Waistband), 1);
        assert_eq!(config.sphere_segments(16), (8, 8));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            FitConfig::from_json(r#"{ "detail": 0 }"#),
            Err(FitError::Config { .. })
        ));
        assert!(matches!(
            FitConfig::from_json(r#"{ "reference": { "waist": -1 } }"#),
            Err(FitError::ZeroReference { .. })
        ));
        assert!(matches!(
            FitConfig::from_json(r#"{ "detail": -0.5 }"#),
            Err(FitError::Config { .. })
        ));
        assert!(matches!(
            FitConfig::from_json("not json"),
            Err(FitError::Config { .. })
        ));
    }

    #[test]
    fn detail_is_bounded() {
        assert!(FitConfig::from_json(r#"{ "detail": 4 }"#).is_ok());
        for json in [r#"{ "detail": 4.01 }"#, r#"{ "detail": 1e4 }"#, r#"{ "detail": 1e300 }"#] {
            assert!(
                matches!(FitConfig::from_json(json), Err(FitError::Config { .. })),
                "{json}"
            );
        }
        let huge = FitConfig {
            detail: f64::MAX,
            ..FitConfig::default()
        };
        assert!(matches!(huge.scale_resolver(), Err(FitError::Config { .. })));
        let nan = FitConfig {
            detail: f64::NAN,
            ..FitConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn parses_catalog() {
        let catalog = catalog_from_json(
            r##"{ "bottoms": [{ "id": "b9", "name": "Shorts", "color": "#000000", "price": 20, "fabric": "Denim" }] }"##,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("b9").is_some());
    }
}
