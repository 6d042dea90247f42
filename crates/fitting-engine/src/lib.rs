pub mod config;
pub mod coverage;
pub mod dispatch;
pub mod error;
pub mod garment;
pub mod mannequin;
pub mod messages;
pub mod parts;
pub mod scale;
pub mod tables;
pub mod wardrobe;

use fit_kernel::TriangleMesh;
use fit_types::{GarmentCatalog, GarmentItem, MeasurementField, Measurements, Rgb, Slot};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

pub use crate::config::FitConfig;
pub use crate::error::FitError;
pub use crate::garment::{fit_garment, fit_garment_by_name, FabricFinish, GarmentMesh};
pub use crate::mannequin::{assemble_mannequin, Mannequin};
pub use crate::wardrobe::Wardrobe;

/// The interactive fitting session.
///
/// Owns the current measurements, the mannequin built from them and every
/// worn garment. Whenever measurements change the mannequin and all worn
/// garments are rebuilt together, so they always agree on one set of
/// measurements.
#[derive(Debug, Clone)]
pub struct ViewportState {
    config: FitConfig,
    measurements: Measurements,
    mannequin: Mannequin,
    wardrobe: Wardrobe,
    /// Build ids of meshes dropped since the last [`take_discarded`](Self::take_discarded).
    discarded: Vec<Uuid>,
}

/// Result of a measurement change: the fresh mannequin and every garment
/// rebuilt against it.
#[derive(Debug)]
pub struct RebuildOutcome<'a> {
    pub mannequin: &'a Mannequin,
    pub garments: Vec<&'a GarmentMesh>,
}

/// A renderer-facing description of the scene, without mesh buffers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSummary {
    pub mannequin_id: Uuid,
    pub measurements: Measurements,
    pub ground_offset: f64,
    pub floor_height: f64,
    pub focus_height: f64,
    pub skin_color: Rgb,
    pub skin_finish: FabricFinish,
    pub body_triangles: usize,
    pub garments: Vec<WornGarment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WornGarment {
    pub slot: Slot,
    pub build_id: Uuid,
    pub item: GarmentItem,
    pub color: Rgb,
    pub finish: FabricFinish,
    pub triangles: usize,
}

impl ViewportState {
    /// Start a session. Measurements and config are validated here.
    #[instrument(skip(config))]
    pub fn new(measurements: Measurements, config: FitConfig) -> Result<Self, FitError> {
        config.validate()?;
        measurements.validate()?;
        let mannequin = assemble_mannequin(&measurements, &config)?;
        Ok(Self {
            config,
            measurements,
            mannequin,
            wardrobe: Wardrobe::new(),
            discarded: Vec::new(),
        })
    }

    /// Default measurements at full detail.
    pub fn with_defaults() -> Result<Self, FitError> {
        Self::new(Measurements::DEFAULT, FitConfig::default())
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    pub fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    pub fn mannequin(&self) -> &Mannequin {
        &self.mannequin
    }

    pub fn wardrobe(&self) -> &Wardrobe {
        &self.wardrobe
    }

    /// Fit `item` into `slot` and wear it, replacing anything already there.
    ///
    /// The garment is built before the wardrobe is touched, so a failed fit
    /// leaves the slot as it was.
    #[instrument(skip(self, item), fields(item = %item.id))]
    pub fn equip(&mut self, slot: Slot, item: GarmentItem) -> Result<&GarmentMesh, FitError> {
        let garment = fit_garment(slot, &item, &self.measurements, &self.config)?;
        let (worn, replaced) = self.wardrobe.attach(garment);
        if let Some(old) = replaced {
            info!(replaced = %old.item.id, "replaced garment");
            self.discarded.push(old.build_id);
        }
        Ok(worn)
    }

    /// [`equip`](Self::equip) with the slot given by catalog category name.
    pub fn equip_category(
        &mut self,
        category: &str,
        item: GarmentItem,
    ) -> Result<&GarmentMesh, FitError> {
        let slot = Slot::from_category(category)?;
        self.equip(slot, item)
    }

    /// Look `id` up in `catalog` and wear it in its own slot.
    pub fn equip_from_catalog(
        &mut self,
        catalog: &GarmentCatalog,
        id: &str,
    ) -> Result<&GarmentMesh, FitError> {
        let (slot, item) = catalog.find(id).ok_or_else(|| FitError::UnknownItem {
            id: id.to_string(),
        })?;
        self.equip(slot, item.clone())
    }

    /// Take off whatever is in `slot`. Returns the removed item, if any.
    #[instrument(skip(self))]
    pub fn unequip(&mut self, slot: Slot) -> Option<GarmentItem> {
        let garment = self.wardrobe.detach(slot)?;
        info!(item = %garment.item.id, "removed garment");
        self.discarded.push(garment.build_id);
        Some(garment.item)
    }

    /// Rebuild the mannequin and every worn garment for new measurements.
    ///
    /// Everything is built before anything is replaced: on error the previous
    /// measurements, mannequin and garments stay in place.
    #[instrument(skip(self))]
    pub fn on_measurements_changed(
        &mut self,
        measurements: Measurements,
    ) -> Result<RebuildOutcome<'_>, FitError> {
        measurements.validate()?;
        let mannequin = assemble_mannequin(&measurements, &self.config)?;
        let garments = self
            .wardrobe
            .garments()
            .map(|g| fit_garment(g.slot, &g.item, &measurements, &self.config))
            .collect::<Result<Vec<_>, _>>()?;

        let old = std::mem::replace(&mut self.mannequin, mannequin);
        self.discarded.push(old.build_id);
        for garment in garments {
            if let (_, Some(old)) = self.wardrobe.attach(garment) {
                self.discarded.push(old.build_id);
            }
        }
        self.measurements = measurements;
        info!(
            garments = self.wardrobe.len(),
            discarded = self.discarded.len(),
            "rebuilt scene"
        );

        Ok(RebuildOutcome {
            mannequin: &self.mannequin,
            garments: self.wardrobe.garments().collect(),
        })
    }

    /// Move a single slider.
    pub fn set_measurement(
        &mut self,
        field: MeasurementField,
        value: f64,
    ) -> Result<RebuildOutcome<'_>, FitError> {
        self.on_measurements_changed(self.measurements.with(field, value))
    }

    /// Height the camera should orbit around.
    pub fn focus_height(&self) -> f64 {
        self.mannequin.focus_height()
    }

    /// Drain the build ids of meshes that were replaced or removed, so a
    /// renderer can free their buffers.
    pub fn take_discarded(&mut self) -> Vec<Uuid> {
        std::mem::take(&mut self.discarded)
    }

    pub fn scene(&self) -> SceneSummary {
        SceneSummary {
            mannequin_id: self.mannequin.build_id,
            measurements: self.measurements,
            ground_offset: self.mannequin.ground_offset,
            floor_height: self.mannequin.floor_height(),
            focus_height: self.focus_height(),
            skin_color: garment::SKIN_COLOR,
            skin_finish: FabricFinish::SKIN,
            body_triangles: self.mannequin.triangle_count(),
            garments: self
                .wardrobe
                .garments()
                .map(|g| WornGarment {
                    slot: g.slot,
                    build_id: g.build_id,
                    item: g.item.clone(),
                    color: g.color,
                    finish: g.finish,
                    triangles: g.triangle_count(),
                })
                .collect(),
        }
    }

    /// Mannequin and garments merged into one mesh in scene coordinates.
    pub fn world_mesh(&self) -> TriangleMesh {
        let mut mesh = self.mannequin.world_mesh();
        for garment in self.wardrobe.garments() {
            mesh.merge(&garment.world_mesh(self.mannequin.ground_offset));
        }
        mesh
    }
}
