use tracing::warn;

use crate::error::FitError;
use crate::messages::{EngineToUi, UiToEngine};
use crate::ViewportState;

/// Apply a UI message to the session and return the response.
///
/// Errors never leave the session half-updated; they come back as
/// [`EngineToUi::Error`].
pub fn dispatch(state: &mut ViewportState, msg: UiToEngine) -> EngineToUi {
    match handle_message(state, msg) {
        Ok(()) => scene_updated(state),
        Err(e) => {
            warn!(error = %e, "request rejected");
            EngineToUi::Error {
                message: e.to_string(),
            }
        }
    }
}

/// [`dispatch`] over JSON text, for hosts that exchange strings.
pub fn dispatch_json(state: &mut ViewportState, json: &str) -> String {
    let response = match serde_json::from_str::<UiToEngine>(json) {
        Ok(msg) => dispatch(state, msg),
        Err(e) => EngineToUi::Error {
            message: FitError::Serialization {
                reason: e.to_string(),
            }
            .to_string(),
        },
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"type":"Error","message":"response encoding failed: {e}"}}"#)
    })
}

fn handle_message(state: &mut ViewportState, msg: UiToEngine) -> Result<(), FitError> {
    match msg {
        UiToEngine::SetMeasurements { measurements } => {
            state.on_measurements_changed(measurements)?;
        }
        UiToEngine::SetMeasurement { field, value } => {
            state.set_measurement(field, value)?;
        }
        UiToEngine::TryOn { item, category } | UiToEngine::Drop { item, category } => {
            state.equip_category(&category, item)?;
        }
        UiToEngine::Remove { slot } => {
            state.unequip(slot.parse()?);
        }
        UiToEngine::GetScene => {}
    }
    Ok(())
}

fn scene_updated(state: &mut ViewportState) -> EngineToUi {
    EngineToUi::SceneUpdated {
        scene: state.scene(),
        discarded: state.take_discarded(),
    }
}
