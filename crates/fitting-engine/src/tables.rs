//! Breakpoint tables for every revolved body and garment segment, plus the
//! fixed box dimensions and toe-rounding constants for feet and shoes.
//!
//! Radii and heights are in metres for the reference body and are multiplied
//! by the relevant scale factor. Garment tables are their own constants,
//! sized to sit outside the matching body table.

use fit_kernel::{build_profile, revolve_profile, Breakpoint, Profile, ToeRounding, TriangleMesh};
use serde::{Deserialize, Serialize};

use crate::config::FitConfig;
use crate::error::FitError;
use crate::scale::ScaleFactors;

/// A revolved segment of the mannequin or of a garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Torso,
    UpperArm,
    Forearm,
    Leg,
    TopBody,
    Sleeve,
    PantLeg,
    Waistband,
}

impl Segment {
    pub const BODY: [Segment; 4] = [
        Segment::Torso,
        Segment::UpperArm,
        Segment::Forearm,
        Segment::Leg,
    ];

    pub const GARMENT: [Segment; 4] = [
        Segment::TopBody,
        Segment::Sleeve,
        Segment::PantLeg,
        Segment::Waistband,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Torso => "torso",
            Self::UpperArm => "upper_arm",
            Self::Forearm => "forearm",
            Self::Leg => "leg",
            Self::TopBody => "top_body",
            Self::Sleeve => "sleeve",
            Self::PantLeg => "pant_leg",
            Self::Waistband => "waistband",
        }
    }

    /// Profile sample count `N` at full detail.
    pub fn base_samples(self) -> usize {
        match self {
            Self::Torso | Self::TopBody => 80,
            Self::UpperArm | Self::Forearm => 32,
            Self::Leg | Self::PantLeg => 60,
            Self::Sleeve => 28,
            Self::Waistband => 1,
        }
    }

    /// Angular segment count `M` at full detail.
    pub fn base_radial_segments(self) -> usize {
        match self {
            Self::Torso => 48,
            Self::UpperArm | Self::Forearm => 24,
            Self::Leg => 32,
            Self::TopBody | Self::Waistband => 36,
            Self::Sleeve => 20,
            Self::PantLeg => 28,
        }
    }

    /// Total profile height `H`.
    pub fn height(self, s: &ScaleFactors) -> f64 {
        let factor = match self {
            Self::Torso => 0.75,
            Self::UpperArm => 0.48,
            Self::Forearm => 0.43,
            Self::Leg => 0.95,
            Self::TopBody => 0.84,
            Self::Sleeve => 0.50,
            Self::PantLeg => 0.98,
            Self::Waistband => 0.14,
        };
        factor * s.height_scale
    }

    /// The ordered breakpoint table for this segment.
    pub fn breakpoints(self, s: &ScaleFactors) -> Vec<Breakpoint> {
        let h = s.height_scale;
        let c = s.cross_mapped_chest_scale;
        let w = s.cross_mapped_waist_scale;
        let p = s.hip_scale;
        let bp = Breakpoint::new;
        match self {
            // Neck to shoulder, upper chest, peak chest, chest-to-waist taper,
            // waist to hip.
            Self::Torso => vec![
                bp(0.0, 0.065 * h),
                bp(0.10, 0.16 * c),
                bp(0.35, 0.18 * c),
                bp(0.55, 0.18 * c),
                bp(0.75, 0.135 * w),
                bp(1.0, 0.16 * p),
            ],
            Self::UpperArm => vec![bp(0.0, 0.042), bp(1.0, 0.036)],
            Self::Forearm => vec![bp(0.0, 0.036), bp(1.0, 0.031)],
            // Thigh taper, knee, calf taper.
            Self::Leg => vec![
                bp(0.0, 0.082 * p),
                bp(0.45, 0.062),
                bp(0.45, 0.060),
                bp(0.55, 0.060),
                bp(1.0, 0.046),
            ],
            // Same bands as the torso, pushed out; the first band rises from
            // the collar.
            Self::TopBody => vec![
                bp(0.0, 0.068 * h),
                bp(0.08, 0.175 * c),
                bp(0.32, 0.195 * c),
                bp(0.52, 0.195 * c),
                bp(0.72, 0.15 * w),
                bp(1.0, 0.175 * p),
            ],
            Self::Sleeve => vec![bp(0.0, 0.050), bp(1.0, 0.044)],
            Self::PantLeg => vec![
                bp(0.0, 0.088 * p),
                bp(0.44, 0.068),
                bp(0.44, 0.066),
                bp(0.54, 0.066),
                bp(1.0, 0.053),
            ],
            Self::Waistband => vec![bp(0.0, 0.175 * p), bp(1.0, 0.175 * p)],
        }
    }

    /// Build this segment's radius profile.
    pub fn profile(self, s: &ScaleFactors, config: &FitConfig) -> Result<Profile, FitError> {
        Ok(build_profile(
            self.label(),
            config.profile_samples(self),
            self.height(s),
            &self.breakpoints(s),
        )?)
    }

    /// Build and sweep this segment's profile.
    pub fn mesh(self, s: &ScaleFactors, config: &FitConfig) -> Result<TriangleMesh, FitError> {
        let profile = self.profile(s, config)?;
        Ok(revolve_profile(&profile, config.radial_segments(self))?)
    }
}

/// Dimensions and subdivisions of a box-shaped foot or shoe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootBox {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub segments: [usize; 3],
    pub rounding: ToeRounding,
}

pub const BARE_FOOT: FootBox = FootBox {
    width: 0.075,
    height: 0.055,
    depth: 0.17,
    segments: [8, 4, 8],
    rounding: ToeRounding {
        z_threshold: 0.06,
        x_factor: 0.85,
    },
};

pub const SHOE: FootBox = FootBox {
    width: 0.082,
    height: 0.062,
    depth: 0.18,
    segments: [8, 4, 10],
    rounding: ToeRounding {
        z_threshold: 0.07,
        x_factor: 0.82,
    },
};

impl FootBox {
    /// Half-width after toe rounding at distance `z` from the box centre.
    pub fn half_width_at(&self, z: f64) -> f64 {
        let half = self.width / 2.0;
        if z.abs() > self.rounding.z_threshold {
            half * self.rounding.x_factor
        } else {
            half
        }
    }

    pub fn mesh(&self) -> Result<TriangleMesh, FitError> {
        let [ws, hs, ds] = self.segments;
        let mut mesh =
            fit_kernel::segmented_box(self.width, self.height, self.depth, ws, hs, ds)?;
        fit_kernel::round_toe(&mut mesh, self.rounding);
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fit_kernel::BreakpointTable;

    #[test]
    fn every_table_is_valid_for_the_reference_body() {
        let s = ScaleFactors::IDENTITY;
        for segment in Segment::BODY.into_iter().chain(Segment::GARMENT) {
            let table = BreakpointTable::new(segment.label(), segment.breakpoints(&s));
            assert!(table.is_ok(), "{} table rejected", segment.label());
        }
    }

    #[test]
    fn torso_has_five_bands() {
        let table =
            BreakpointTable::new("torso", Segment::Torso.breakpoints(&ScaleFactors::IDENTITY))
                .unwrap();
        assert_eq!(table.bands().count(), 5);
    }

    #[test]
    fn shoe_is_larger_than_foot() {
        assert!(SHOE.width > BARE_FOOT.width);
        assert!(SHOE.height > BARE_FOOT.height);
        assert!(SHOE.depth > BARE_FOOT.depth);
        assert_eq!(BARE_FOOT.half_width_at(0.0), 0.0375);
        assert_eq!(BARE_FOOT.half_width_at(0.08), 0.0375 * 0.85);
    }
}
