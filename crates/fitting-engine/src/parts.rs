use std::fmt;

use fit_kernel::{TriangleMesh, Vec3};
use serde::{Deserialize, Serialize};

/// Which side of the body a mirrored part sits on. Left is `-X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Left => "left_",
            Self::Right => "right_",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPartKind {
    Head,
    Neck,
    Torso,
    Shoulder(Side),
    UpperArm(Side),
    Forearm(Side),
    Hand(Side),
    Leg(Side),
    Foot(Side),
}

impl fmt::Display for BodyPartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (side, name) = match *self {
            Self::Head => (None, "head"),
            Self::Neck => (None, "neck"),
            Self::Torso => (None, "torso"),
            Self::Shoulder(s) => (Some(s), "shoulder"),
            Self::UpperArm(s) => (Some(s), "upper_arm"),
            Self::Forearm(s) => (Some(s), "forearm"),
            Self::Hand(s) => (Some(s), "hand"),
            Self::Leg(s) => (Some(s), "leg"),
            Self::Foot(s) => (Some(s), "foot"),
        };
        write!(f, "{}{name}", side.map_or("", Side::prefix))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentPartKind {
    TopBody,
    Sleeve(Side),
    Waistband,
    PantLeg(Side),
    Shoe(Side),
}

impl fmt::Display for GarmentPartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (side, name) = match *self {
            Self::TopBody => (None, "top_body"),
            Self::Sleeve(s) => (Some(s), "sleeve"),
            Self::Waistband => (None, "waistband"),
            Self::PantLeg(s) => (Some(s), "pant_leg"),
            Self::Shoe(s) => (Some(s), "shoe"),
        };
        write!(f, "{}{name}", side.map_or("", Side::prefix))
    }
}

/// A mesh in its own local frame plus the offset that places it in the
/// mannequin frame. No rotation or scale is carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part<K> {
    pub kind: K,
    pub mesh: TriangleMesh,
    pub offset: Vec3,
}

impl<K> Part<K> {
    pub fn new(kind: K, mesh: TriangleMesh, offset: Vec3) -> Self {
        Self { kind, mesh, offset }
    }

    /// The mesh moved into the mannequin frame.
    pub fn placed_mesh(&self) -> TriangleMesh {
        self.mesh.translated(self.offset)
    }
}

/// Two copies of `mesh` at `(±x, y, z)`.
pub(crate) fn mirrored<K>(
    kind: impl Fn(Side) -> K,
    mesh: &TriangleMesh,
    x: f64,
    y: f64,
    z: f64,
) -> [Part<K>; 2] {
    Side::BOTH.map(|side| Part::new(kind(side), mesh.clone(), Vec3::new(side.sign() * x, y, z)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_carry_side_prefix() {
        assert_eq!(BodyPartKind::Head.to_string(), "head");
        assert_eq!(BodyPartKind::UpperArm(Side::Left).to_string(), "left_upper_arm");
        assert_eq!(GarmentPartKind::Shoe(Side::Right).to_string(), "right_shoe");
    }

    #[test]
    fn mirrored_parts_flip_x_only() {
        let [left, right] = mirrored(BodyPartKind::Hand, &TriangleMesh::new(), 0.2, 0.4, 0.1);
        assert_eq!(left.offset, Vec3::new(-0.2, 0.4, 0.1));
        assert_eq!(right.offset, Vec3::new(0.2, 0.4, 0.1));
        assert_eq!(left.kind, BodyPartKind::Hand(Side::Left));
    }
}
