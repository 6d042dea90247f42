//! Mannequin assembly: one mesh per body part, placed by the scale factors.

use fit_kernel::{tapered_cylinder, uv_sphere, TriangleMesh, Vec3};
use fit_types::Measurements;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::FitConfig;
use crate::error::FitError;
use crate::parts::{mirrored, BodyPartKind, Part};
use crate::scale::ScaleFactors;
use crate::tables::{Segment, BARE_FOOT};

pub type BodyPart = Part<BodyPartKind>;

/// The assembled figure. Part offsets are in the mannequin frame; the whole
/// frame is lifted by `ground_offset` when placed in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mannequin {
    /// Fresh for every assembly. Renderers key GPU buffers on it.
    pub build_id: Uuid,
    pub measurements: Measurements,
    pub scales: ScaleFactors,
    pub ground_offset: f64,
    pub parts: Vec<BodyPart>,
}

impl Mannequin {
    pub fn part(&self, kind: BodyPartKind) -> Option<&BodyPart> {
        self.parts.iter().find(|p| p.kind == kind)
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.triangle_count()).sum()
    }

    /// True when both mannequins have identical geometry and placement,
    /// ignoring build ids.
    pub fn same_geometry(&self, other: &Mannequin) -> bool {
        self.ground_offset == other.ground_offset && self.parts == other.parts
    }

    /// Height the camera orbits around.
    pub fn focus_height(&self) -> f64 {
        1.1 * self.scales.height_scale
    }

    /// Height of the floor disc in scene coordinates.
    pub fn floor_height(&self) -> f64 {
        -0.2 * self.scales.height_scale
    }

    /// All parts merged into one mesh in scene coordinates.
    pub fn world_mesh(&self) -> TriangleMesh {
        let lift = Vec3::new(0.0, self.ground_offset, 0.0);
        let mut out = TriangleMesh::new();
        for part in &self.parts {
            out.merge(&part.mesh.translated(part.offset + lift));
        }
        out
    }
}

/// Build every body part for `m`.
///
/// Mirrored pairs share one mesh build. Measurements are not range-checked
/// here; geometry that cannot be built surfaces as a kernel error.
#[instrument(skip(config))]
pub fn assemble_mannequin(m: &Measurements, config: &FitConfig) -> Result<Mannequin, FitError> {
    let s = config.scale_resolver()?.resolve(m);
    let h = s.height_scale;
    let sh = s.shoulder_scale;
    let p = s.hip_scale;
    let at_y = |y: f64| Vec3::new(0.0, y, 0.0);

    let mut parts = Vec::with_capacity(15);

    let (ws, hs) = config.sphere_segments(32);
    parts.push(Part::new(
        BodyPartKind::Head,
        uv_sphere(0.13 * h, ws, hs)?,
        at_y(1.65 * h),
    ));
    parts.push(Part::new(
        BodyPartKind::Neck,
        tapered_cylinder(0.055 * h, 0.065 * h, 0.12 * h, config.cylinder_segments(32))?,
        at_y(1.53 * h),
    ));
    parts.push(Part::new(
        BodyPartKind::Torso,
        Segment::Torso.mesh(&s, config)?,
        at_y(1.095 * h),
    ));

    let (ws, hs) = config.sphere_segments(24);
    let shoulder = uv_sphere(0.065 * sh, ws, hs)?;
    parts.extend(mirrored(BodyPartKind::Shoulder, &shoulder, 0.215 * sh, 1.43 * h, 0.0));

    let upper_arm = Segment::UpperArm.mesh(&s, config)?;
    parts.extend(mirrored(BodyPartKind::UpperArm, &upper_arm, 0.22 * sh, 1.14 * h, 0.0));

    let forearm = Segment::Forearm.mesh(&s, config)?;
    parts.extend(mirrored(BodyPartKind::Forearm, &forearm, 0.22 * sh, 0.66 * h, 0.0));

    let (ws, hs) = config.sphere_segments(16);
    let mut hand = uv_sphere(0.035, ws, hs)?;
    hand.scale(1.0, 1.2, 0.7);
    parts.extend(mirrored(BodyPartKind::Hand, &hand, 0.22 * sh, 0.42 * h, 0.0));

    let leg = Segment::Leg.mesh(&s, config)?;
    parts.extend(mirrored(BodyPartKind::Leg, &leg, 0.095 * p, 0.245 * h, 0.0));

    let foot = BARE_FOOT.mesh()?;
    parts.extend(mirrored(BodyPartKind::Foot, &foot, 0.095 * p, -0.23 * h, 0.04));

    let mannequin = Mannequin {
        build_id: Uuid::new_v4(),
        measurements: *m,
        scales: s,
        ground_offset: 0.15 * h,
        parts,
    };
    info!(
        parts = mannequin.parts.len(),
        triangles = mannequin.triangle_count(),
        "assembled mannequin"
    );
    Ok(mannequin)
}
