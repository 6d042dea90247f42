//! Garment fitting: catalog item plus measurements to a mesh shell that sits
//! just outside the mannequin.

use fit_kernel::{TriangleMesh, Vec3};
use fit_types::{GarmentItem, Measurements, Rgb, Slot};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::FitConfig;
use crate::error::FitError;
use crate::parts::{mirrored, GarmentPartKind, Part};
use crate::tables::{Segment, SHOE};

pub type GarmentPart = Part<GarmentPartKind>;

/// Physically based surface parameters for a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FabricFinish {
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
}

impl FabricFinish {
    pub const LEATHER: Self = Self {
        roughness: 0.35,
        metalness: 0.25,
        clearcoat: 0.0,
        clearcoat_roughness: 0.4,
    };

    pub const SILK: Self = Self {
        roughness: 0.18,
        metalness: 0.0,
        clearcoat: 0.12,
        clearcoat_roughness: 0.4,
    };

    pub const CLOTH: Self = Self {
        roughness: 0.65,
        metalness: 0.0,
        clearcoat: 0.0,
        clearcoat_roughness: 0.4,
    };

    /// The mannequin's matte skin.
    pub const SKIN: Self = Self {
        roughness: 0.6,
        metalness: 0.1,
        clearcoat: 0.0,
        clearcoat_roughness: 0.0,
    };

    /// Finish for a catalog fabric name. Matching is exact; unknown fabrics
    /// fall back to plain cloth.
    pub fn for_fabric(fabric: &str) -> Self {
        match fabric {
            "Leather" => Self::LEATHER,
            "Silk" => Self::SILK,
            _ => Self::CLOTH,
        }
    }
}

/// Mannequin skin colour, `#E8D4C8`.
pub const SKIN_COLOR: Rgb = Rgb::new(0.909_804, 0.831_373, 0.784_314);

/// A fitted garment: the item it was built from, its material and its parts
/// in the mannequin frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentMesh {
    /// Fresh for every build. Renderers key GPU buffers on it.
    pub build_id: Uuid,
    pub slot: Slot,
    pub item: GarmentItem,
    pub color: Rgb,
    pub finish: FabricFinish,
    pub parts: Vec<GarmentPart>,
}

impl GarmentMesh {
    pub fn part(&self, kind: GarmentPartKind) -> Option<&GarmentPart> {
        self.parts.iter().find(|p| p.kind == kind)
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.triangle_count()).sum()
    }

    /// True when both garments have identical geometry, material and
    /// placement, ignoring build ids.
    pub fn same_geometry(&self, other: &GarmentMesh) -> bool {
        self.slot == other.slot
            && self.color == other.color
            && self.finish == other.finish
            && self.parts == other.parts
    }

    /// All parts merged in the mannequin frame, lifted by `ground_offset`.
    pub fn world_mesh(&self, ground_offset: f64) -> TriangleMesh {
        let lift = Vec3::new(0.0, ground_offset, 0.0);
        let mut out = TriangleMesh::new();
        for part in &self.parts {
            out.merge(&part.mesh.translated(part.offset + lift));
        }
        out
    }
}

/// Fit `item` into `slot` for the given measurements.
#[instrument(skip(item, config), fields(item = %item.id))]
pub fn fit_garment(
    slot: Slot,
    item: &GarmentItem,
    m: &Measurements,
    config: &FitConfig,
) -> Result<GarmentMesh, FitError> {
    let color = item.color()?;
    let s = config.scale_resolver()?.resolve(m);
    let h = s.height_scale;
    let sh = s.shoulder_scale;
    let p = s.hip_scale;
    let at_y = |y: f64| Vec3::new(0.0, y, 0.0);

    let mut parts = Vec::with_capacity(3);
    match slot {
        Slot::Top => {
            parts.push(Part::new(
                GarmentPartKind::TopBody,
                Segment::TopBody.mesh(&s, config)?,
                at_y(1.14 * h),
            ));
            let sleeve = Segment::Sleeve.mesh(&s, config)?;
            parts.extend(mirrored(GarmentPartKind::Sleeve, &sleeve, 0.22 * sh, 1.14 * h, 0.0));
        }
        Slot::Bottom => {
            parts.push(Part::new(
                GarmentPartKind::Waistband,
                Segment::Waistband.mesh(&s, config)?,
                at_y(0.70 * h),
            ));
            let leg = Segment::PantLeg.mesh(&s, config)?;
            parts.extend(mirrored(GarmentPartKind::PantLeg, &leg, 0.095 * p, 0.24 * h, 0.0));
        }
        Slot::Shoes => {
            let shoe = SHOE.mesh()?;
            parts.extend(mirrored(GarmentPartKind::Shoe, &shoe, 0.095 * p, -0.23 * h, 0.04));
        }
    }

    let garment = GarmentMesh {
        build_id: Uuid::new_v4(),
        slot,
        item: item.clone(),
        color,
        finish: FabricFinish::for_fabric(&item.fabric_name),
        parts,
    };
    info!(
        %slot,
        triangles = garment.triangle_count(),
        "fitted garment"
    );
    Ok(garment)
}

/// [`fit_garment`] with the slot given by name, as it arrives from a UI.
pub fn fit_garment_by_name(
    slot: &str,
    item: &GarmentItem,
    m: &Measurements,
    config: &FitConfig,
) -> Result<GarmentMesh, FitError> {
    fit_garment(slot.parse()?, item, m, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::Side;
    use approx::assert_relative_eq;
    use fit_types::{GarmentCatalog, TypesError};

    fn item(id: &str) -> GarmentItem {
        GarmentCatalog::builtin().find(id).unwrap().1.clone()
    }

    #[test]
    fn finish_by_fabric() {
        assert_eq!(FabricFinish::for_fabric("Leather"), FabricFinish::LEATHER);
        assert_eq!(FabricFinish::for_fabric("Silk"), FabricFinish::SILK);
        assert_eq!(FabricFinish::for_fabric("Denim"), FabricFinish::CLOTH);
        assert_eq!(FabricFinish::for_fabric("leather"), FabricFinish::CLOTH);
    }

    #[test]
    fn top_has_body_and_two_sleeves() {
        let g = fit_garment(Slot::Top, &item("t1"), &Measurements::DEFAULT, &FitConfig::default())
            .unwrap();
        assert_eq!(g.parts.len(), 3);
        assert_eq!(g.finish, FabricFinish::SILK);
        assert_eq!(g.color.to_hex(), "#F8E8D8");
        let body = g.part(GarmentPartKind::TopBody).unwrap();
        assert_relative_eq!(body.offset.y, 1.14);
        let sleeve = g.part(GarmentPartKind::Sleeve(Side::Left)).unwrap();
        assert_relative_eq!(sleeve.offset.x, -0.22);
    }

    #[test]
    fn bottom_waistband_is_a_capped_cylinder() {
        let g = fit_garment(
            Slot::Bottom,
            &item("b1"),
            &Measurements::DEFAULT,
            &FitConfig::default(),
        )
        .unwrap();
        let band = g.part(GarmentPartKind::Waistband).unwrap();
        let size = band.mesh.bounds().size();
        assert_relative_eq!(size[1], 0.14, epsilon = 1e-6);
        assert_relative_eq!(size[2], 0.35, epsilon = 1e-6);
        assert!(band.mesh.validate().is_ok());
    }

    #[test]
    fn shoes_sit_on_the_feet() {
        let g = fit_garment(
            Slot::Shoes,
            &item("s2"),
            &Measurements::DEFAULT,
            &FitConfig::default(),
        )
        .unwrap();
        assert_eq!(g.parts.len(), 2);
        assert_eq!(g.finish, FabricFinish::LEATHER);
        let right = g.part(GarmentPartKind::Shoe(Side::Right)).unwrap();
        assert_relative_eq!(right.offset.x, 0.095);
        assert_relative_eq!(right.offset.z, 0.04);
    }

    #[test]
    fn unknown_slot_name_is_rejected() {
        let result = fit_garment_by_name(
            "hat",
            &item("t2"),
            &Measurements::DEFAULT,
            &FitConfig::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            FitError::Types(TypesError::UnknownSlot {
                name: "hat".to_string()
            })
        );
    }

    #[test]
    fn bad_colour_is_rejected() {
        let mut bad = item("t2");
        bad.color_hex = "blue".to_string();
        let result = fit_garment(Slot::Top, &bad, &Measurements::DEFAULT, &FitConfig::default());
        assert!(matches!(
            result,
            Err(FitError::Types(TypesError::InvalidColor { .. }))
        ));
    }
}
