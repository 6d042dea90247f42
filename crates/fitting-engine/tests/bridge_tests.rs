use fit_types::{GarmentCatalog, MeasurementField, Measurements, Slot};
use fitting_engine::dispatch::{dispatch, dispatch_json};
use fitting_engine::messages::{EngineToUi, UiToEngine};
use fitting_engine::{FitConfig, ViewportState};

// ── Helper functions ─────────────────────────────────────────────────────

fn state() -> ViewportState {
    let config = FitConfig {
        detail: 0.25,
        ..FitConfig::default()
    };
    ViewportState::new(Measurements::DEFAULT, config).unwrap()
}

fn try_on(id: &str) -> UiToEngine {
    let catalog = GarmentCatalog::builtin();
    let (slot, item) = catalog.find(id).unwrap();
    UiToEngine::TryOn {
        item: item.clone(),
        category: slot.category().to_string(),
    }
}

fn expect_scene(response: EngineToUi) -> (fitting_engine::SceneSummary, Vec<uuid::Uuid>) {
    match response {
        EngineToUi::SceneUpdated { scene, discarded } => (scene, discarded),
        EngineToUi::Error { message } => panic!("unexpected error: {message}"),
    }
}

fn expect_error(response: EngineToUi) -> String {
    match response {
        EngineToUi::Error { message } => message,
        other => panic!("expected error, got {other:?}"),
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────────

#[test]
fn try_on_and_drop_equip_into_the_category_slot() {
    let mut state = state();
    let (scene, discarded) = expect_scene(dispatch(&mut state, try_on("t4")));
    assert_eq!(scene.garments.len(), 1);
    assert_eq!(scene.garments[0].slot, Slot::Top);
    assert!(discarded.is_empty());

    let catalog = GarmentCatalog::builtin();
    let drop = UiToEngine::Drop {
        item: catalog.find("t5").unwrap().1.clone(),
        category: "tops".to_string(),
    };
    let first = scene.garments[0].build_id;
    let (scene, discarded) = expect_scene(dispatch(&mut state, drop));
    assert_eq!(scene.garments.len(), 1);
    assert_eq!(scene.garments[0].item.id, "t5");
    assert_eq!(discarded, vec![first]);
}

#[test]
fn remove_by_slot_name() {
    let mut state = state();
    dispatch(&mut state, try_on("b5"));
    let (scene, discarded) = expect_scene(dispatch(
        &mut state,
        UiToEngine::Remove {
            slot: "bottom".to_string(),
        },
    ));
    assert!(scene.garments.is_empty());
    assert_eq!(discarded.len(), 1);

    let message = expect_error(dispatch(
        &mut state,
        UiToEngine::Remove {
            slot: "hat".to_string(),
        },
    ));
    assert!(message.contains("unknown slot"), "{message}");
}

#[test]
fn unknown_category_is_an_error() {
    let mut state = state();
    let catalog = GarmentCatalog::builtin();
    let message = expect_error(dispatch(
        &mut state,
        UiToEngine::TryOn {
            item: catalog.find("t1").unwrap().1.clone(),
            category: "hats".to_string(),
        },
    ));
    assert!(message.contains("hats"), "{message}");
    assert!(state.wardrobe().is_empty());
}

#[test]
fn slider_out_of_range_keeps_scene() {
    let mut state = state();
    let before = state.scene();
    let message = expect_error(dispatch(
        &mut state,
        UiToEngine::SetMeasurement {
            field: MeasurementField::Shoulders,
            value: 20.0,
        },
    ));
    assert!(message.contains("shoulders"), "{message}");
    assert_eq!(state.scene(), before);
}

#[test]
fn slider_rebuilds_mannequin() {
    let mut state = state();
    dispatch(&mut state, try_on("s1"));
    let before = state.scene();
    let (scene, discarded) = expect_scene(dispatch(
        &mut state,
        UiToEngine::SetMeasurement {
            field: MeasurementField::Hips,
            value: 110.0,
        },
    ));
    assert_eq!(scene.measurements.hips, 110.0);
    assert_ne!(scene.mannequin_id, before.mannequin_id);
    assert_ne!(scene.garments[0].build_id, before.garments[0].build_id);
    assert_eq!(discarded.len(), 2);
}

#[test]
fn get_scene_changes_nothing() {
    let mut state = state();
    let before = state.scene();
    let (scene, discarded) = expect_scene(dispatch(&mut state, UiToEngine::GetScene));
    assert_eq!(scene, before);
    assert!(discarded.is_empty());
}

// ── JSON ─────────────────────────────────────────────────────────────────

#[test]
fn json_try_on_uses_storefront_field_names() {
    let mut state = state();
    let request = r##"{
        "type": "TryOn",
        "item": { "id": "t2", "name": "Cotton Tee", "color": "#2C3E50", "price": 29, "fabric": "Cotton" },
        "category": "tops"
    }"##;
    let response: EngineToUi = serde_json::from_str(&dispatch_json(&mut state, request)).unwrap();
    let (scene, _) = expect_scene(response);
    assert_eq!(scene.garments[0].color.to_hex(), "#2C3E50");
}

#[test]
fn json_set_measurements() {
    let mut state = state();
    let request = r#"{
        "type": "SetMeasurements",
        "measurements": { "height": 160, "chest": 85, "waist": 70, "hips": 92, "shoulders": 38 }
    }"#;
    let response: EngineToUi = serde_json::from_str(&dispatch_json(&mut state, request)).unwrap();
    let (scene, _) = expect_scene(response);
    assert_eq!(scene.measurements.height, 160.0);
}

#[test]
fn json_garbage_is_an_error() {
    let mut state = state();
    let response: EngineToUi =
        serde_json::from_str(&dispatch_json(&mut state, r#"{"type":"Teleport"}"#)).unwrap();
    let message = expect_error(response);
    assert!(message.contains("serialization"), "{message}");
}
