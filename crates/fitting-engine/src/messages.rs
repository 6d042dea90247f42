use fit_types::{GarmentItem, MeasurementField, Measurements};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::SceneSummary;

/// Messages from the storefront UI to the fitting engine.
/// Serialized as JSON with a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToEngine {
    /// Replace every measurement at once.
    SetMeasurements { measurements: Measurements },
    /// One slider moved.
    SetMeasurement { field: MeasurementField, value: f64 },
    /// "Try on" pressed on a catalog card.
    TryOn { item: GarmentItem, category: String },
    /// A catalog card dropped onto the viewport.
    Drop { item: GarmentItem, category: String },
    /// Take off whatever is in a slot.
    Remove { slot: String },
    /// Report the scene without changing it.
    GetScene,
}

/// Messages from the fitting engine back to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineToUi {
    /// The scene after the request was applied, plus the build ids of meshes
    /// the renderer should now free.
    SceneUpdated {
        scene: SceneSummary,
        discarded: Vec<Uuid>,
    },
    /// The request was rejected; the scene is unchanged.
    Error { message: String },
}
