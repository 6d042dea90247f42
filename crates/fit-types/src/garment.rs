use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// An attachment point for garments on the mannequin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Top,
    Bottom,
    Shoes,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Top, Slot::Bottom, Slot::Shoes];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Shoes => "shoes",
        }
    }

    /// The catalog list that feeds this slot.
    pub fn category(self) -> &'static str {
        match self {
            Self::Top => "tops",
            Self::Bottom => "bottoms",
            Self::Shoes => "shoes",
        }
    }

    /// Map a catalog category name (`tops`, `bottoms`, `shoes`) to its slot.
    pub fn from_category(category: &str) -> Result<Self, TypesError> {
        match category {
            "tops" => Ok(Self::Top),
            "bottoms" => Ok(Self::Bottom),
            "shoes" => Ok(Self::Shoes),
            other => Err(TypesError::UnknownCategory {
                name: other.to_string(),
            }),
        }
    }
}

impl FromStr for Slot {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "shoes" => Ok(Self::Shoes),
            other => Err(TypesError::UnknownSlot {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// sRGB colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string (case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, TypesError> {
        let invalid = || TypesError::InvalidColor {
            value: hex.to_string(),
        };
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| -> Result<f32, TypesError> {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| f32::from(v) / 255.0)
                .map_err(|_| invalid())
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(&self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", q(self.r), q(self.g), q(self.b))
    }
}

/// A catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarmentItem {
    pub id: String,
    pub name: String,
    #[serde(alias = "color")]
    pub color_hex: String,
    pub price: f64,
    #[serde(alias = "fabric")]
    pub fabric_name: String,
}

impl GarmentItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color_hex: impl Into<String>,
        price: f64,
        fabric_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color_hex: color_hex.into(),
            price,
            fabric_name: fabric_name.into(),
        }
    }

    pub fn color(&self) -> Result<Rgb, TypesError> {
        Rgb::from_hex(&self.color_hex)
    }
}

/// The three garment lists offered by the storefront.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GarmentCatalog {
    #[serde(default)]
    pub tops: Vec<GarmentItem>,
    #[serde(default)]
    pub bottoms: Vec<GarmentItem>,
    #[serde(default)]
    pub shoes: Vec<GarmentItem>,
}

impl GarmentCatalog {
    /// The storefront's stock catalog.
    pub fn builtin() -> Self {
        let item = GarmentItem::new;
        Self {
            tops: vec![
                item("t1", "Silk Blouse", "#F8E8D8", 89.0, "Silk"),
                item("t2", "Cotton Tee", "#2C3E50", 29.0, "Cotton"),
                item("t3", "Denim Jacket", "#4A5D7F", 129.0, "Denim"),
                item("t4", "Wool Sweater", "#8B4513", 99.0, "Wool"),
                item("t5", "Linen Shirt", "#FAFAFA", 79.0, "Linen"),
                item("t6", "Leather Jacket", "#1A1A1A", 299.0, "Leather"),
            ],
            bottoms: vec![
                item("b1", "Slim Jeans", "#2B4560", 89.0, "Denim"),
                item("b2", "Chinos", "#C9B497", 69.0, "Cotton"),
                item("b3", "Cargo Pants", "#3D4F3A", 79.0, "Canvas"),
                item("b4", "Dress Pants", "#1C1C1C", 99.0, "Wool"),
                item("b5", "Joggers", "#696969", 59.0, "Fleece"),
            ],
            shoes: vec![
                item("s1", "Sneakers", "#FFFFFF", 129.0, "Synthetic"),
                item("s2", "Loafers", "#654321", 159.0, "Leather"),
                item("s3", "Boots", "#2C1810", 189.0, "Leather"),
                item("s4", "Sandals", "#D2B48C", 49.0, "Leather"),
            ],
        }
    }

    pub fn items(&self, slot: Slot) -> &[GarmentItem] {
        match slot {
            Slot::Top => &self.tops,
            Slot::Bottom => &self.bottoms,
            Slot::Shoes => &self.shoes,
        }
    }

    /// Find an item by id across all lists, returning the slot it belongs to.
    pub fn find(&self, id: &str) -> Option<(Slot, &GarmentItem)> {
        Slot::ALL.into_iter().find_map(|slot| {
            self.items(slot)
                .iter()
                .find(|item| item.id == id)
                .map(|item| (slot, item))
        })
    }

    pub fn len(&self) -> usize {
        self.tops.len() + self.bottoms.len() + self.shoes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
