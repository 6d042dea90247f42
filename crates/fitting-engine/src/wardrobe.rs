use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use fit_types::{GarmentItem, Slot};

use crate::garment::GarmentMesh;

/// What is worn in each slot. Each slot is empty or holds exactly one fitted
/// garment, which carries the item it was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wardrobe {
    worn: BTreeMap<Slot, GarmentMesh>,
}

impl Wardrobe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(&self, slot: Slot) -> Option<&GarmentItem> {
        self.worn.get(&slot).map(|g| &g.item)
    }

    pub fn mesh(&self, slot: Slot) -> Option<&GarmentMesh> {
        self.worn.get(&slot)
    }

    pub fn is_worn(&self, slot: Slot) -> bool {
        self.worn.contains_key(&slot)
    }

    /// Put a garment on its slot. Returns the stored garment and whatever it
    /// replaced.
    pub fn attach(&mut self, garment: GarmentMesh) -> (&GarmentMesh, Option<GarmentMesh>) {
        match self.worn.entry(garment.slot) {
            Entry::Occupied(mut entry) => {
                let old = entry.insert(garment);
                (entry.into_mut(), Some(old))
            }
            Entry::Vacant(entry) => (entry.insert(garment), None),
        }
    }

    pub fn detach(&mut self, slot: Slot) -> Option<GarmentMesh> {
        self.worn.remove(&slot)
    }

    /// Worn garments in slot order.
    pub fn garments(&self) -> impl Iterator<Item = &GarmentMesh> {
        self.worn.values()
    }

    pub fn equipped_items(&self) -> Vec<(Slot, GarmentItem)> {
        self.worn
            .iter()
            .map(|(&slot, g)| (slot, g.item.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.worn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worn.is_empty()
    }
}
