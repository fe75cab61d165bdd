use app_bridge::dispatch::*;
use app_bridge::*;
use chrono::{TimeZone, Utc};
use shape_store::{ManualClock, MemoryStorage, Storage, GALLERY_KEY, STRUCTURES_KEY};
use shape_types::{ShapeKind, DEFAULT_STRUCTURE_NAME};

// ── Helper functions ─────────────────────────────────────────────────────

fn make_clock() -> ManualClock {
    ManualClock::new(Utc.timestamp_millis_opt(1_717_000_000_000).unwrap())
}

fn make_state() -> AppState {
    AppState::with_seed(MemoryStorage::new(), 7).with_clock(make_clock())
}

fn send(state: &mut AppState, json: &str) -> AppToUi {
    let msg: UiToApp = serde_json::from_str(json).unwrap();
    dispatch(state, msg)
}

fn save_names(state: &mut AppState, names: &[&str]) {
    for name in names {
        dispatch(state, UiToApp::Generate { name: name.to_string() });
        dispatch(state, UiToApp::SaveShape);
    }
}

fn placed_ids(state: &AppState) -> Vec<i64> {
    state.working_set.shapes().iter().map(|s| s.id).collect()
}

fn assert_error(response: AppToUi) -> String {
    match response {
        AppToUi::Error { message } => message,
        other => panic!("expected Error, got {:?}", other),
    }
}

fn assert_prompt(response: AppToUi, expected: &str) {
    match response {
        AppToUi::ConfirmationRequired { prompt } => assert_eq!(prompt, expected),
        other => panic!("expected ConfirmationRequired, got {:?}", other),
    }
}

// ── Message serialization ────────────────────────────────────────────────

#[test]
fn messages_use_type_tag() {
    let json = serde_json::to_value(UiToApp::Generate {
        name: "bob".into(),
    })
    .unwrap();
    assert_eq!(json["type"], "Generate");
    assert_eq!(json["name"], "bob");

    let json = serde_json::to_value(AppToUi::ConfirmationRequired {
        prompt: "ok?".into(),
    })
    .unwrap();
    assert_eq!(json["type"], "ConfirmationRequired");
}

#[test]
fn confirmed_flag_defaults_to_false() {
    let msg: UiToApp = serde_json::from_str(r#"{"type":"DeleteStructure","id":5}"#).unwrap();
    match msg {
        UiToApp::DeleteStructure { id, confirmed } => {
            assert_eq!(id, 5);
            assert!(!confirmed);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn unit_messages_parse_from_bare_tag() {
    let msg: UiToApp = serde_json::from_str(r#"{"type":"SaveStructure"}"#).unwrap();
    assert!(matches!(msg, UiToApp::SaveStructure));
}

#[test]
fn shape_generated_response_carries_descriptor_fields() {
    let mut state = make_state();
    let json = serde_json::to_value(send(&mut state, r#"{"type":"Generate","name":"bob"}"#))
        .unwrap();
    assert_eq!(json["type"], "ShapeGenerated");
    assert_eq!(json["descriptor"]["shape"], "cylinder");
    assert_eq!(json["descriptor"]["originalName"], "bob");
    assert_eq!(json["descriptor"]["color"], "#e052d0");
}

// ── Generator ────────────────────────────────────────────────────────────

#[test]
fn generate_holds_shape_until_saved() {
    let mut state = make_state();
    match send(&mut state, r#"{"type":"Generate","name":"  Bob "}"#) {
        AppToUi::ShapeGenerated {
            descriptor,
            summary,
            ..
        } => {
            assert_eq!(descriptor.shape, ShapeKind::Cylinder);
            assert_eq!(descriptor.original_name, "  Bob ");
            assert!(summary.starts_with("Type: cylinder"));
        }
        other => panic!("expected ShapeGenerated, got {:?}", other),
    }
    assert!(state.pending.is_some());
    assert!(state.gallery.is_empty());
}

#[test]
fn blank_name_is_rejected() {
    let mut state = make_state();
    let message = assert_error(send(&mut state, r#"{"type":"Generate","name":"   "}"#));
    assert!(message.contains("enter a name"));
    assert!(state.pending.is_none());
}

#[test]
fn overlong_name_is_rejected() {
    let mut state = make_state();
    let name = "a".repeat(31);
    let message = assert_error(dispatch(&mut state, UiToApp::Generate { name }));
    assert!(message.contains("30"));
}

#[test]
fn name_at_limit_is_accepted() {
    let mut state = make_state();
    let name = "a".repeat(30);
    let response = dispatch(&mut state, UiToApp::Generate { name });
    assert!(matches!(response, AppToUi::ShapeGenerated { .. }));
}

#[test]
fn save_without_generate_fails() {
    let mut state = make_state();
    assert_error(send(&mut state, r#"{"type":"SaveShape"}"#));
}

// ── Gallery ──────────────────────────────────────────────────────────────

#[test]
fn save_shape_persists_to_gallery() {
    let mut state = make_state();
    send(&mut state, r#"{"type":"Generate","name":"bob"}"#);
    match send(&mut state, r#"{"type":"SaveShape"}"#) {
        AppToUi::GalleryUpdated { shapes, stored } => {
            assert!(stored);
            assert_eq!(shapes.len(), 1);
        }
        other => panic!("expected GalleryUpdated, got {:?}", other),
    }
    assert!(state.storage().get_item(GALLERY_KEY).unwrap().is_some());
    assert!(state.pending.is_none());
}

#[test]
fn duplicate_save_reports_not_stored() {
    let mut state = make_state();
    save_names(&mut state, &["bob"]);
    send(&mut state, r#"{"type":"Generate","name":"bob"}"#);
    match send(&mut state, r#"{"type":"SaveShape"}"#) {
        AppToUi::GalleryUpdated { shapes, stored } => {
            assert!(!stored);
            assert_eq!(shapes.len(), 1);
        }
        other => panic!("expected GalleryUpdated, got {:?}", other),
    }
}

#[test]
fn differently_cased_name_is_a_new_entry() {
    let mut state = make_state();
    save_names(&mut state, &["bob", "Bob"]);
    assert_eq!(state.gallery.len(), 2);
}

#[test]
fn clear_gallery_needs_confirmation() {
    let mut state = make_state();
    save_names(&mut state, &["bob", "alice"]);

    assert_prompt(
        send(&mut state, r#"{"type":"ClearGallery"}"#),
        CLEAR_GALLERY_PROMPT,
    );
    assert_eq!(state.gallery.len(), 2);

    let response = send(&mut state, r#"{"type":"ClearGallery","confirmed":true}"#);
    assert!(matches!(response, AppToUi::GalleryUpdated { ref shapes, .. } if shapes.is_empty()));
    assert!(state.storage().get_item(GALLERY_KEY).unwrap().is_none());
}

#[test]
fn state_loads_gallery_written_by_browser() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            GALLERY_KEY,
            r##"[{"shape":"sphere","size":1.2,"shaderType":4,"color":"#5278e0","originalName":"alexandra"}]"##,
        )
        .unwrap();
    let mut state = AppState::with_seed(storage, 1);
    assert!(state.gallery.contains("alexandra"));

    let response = send(
        &mut state,
        r#"{"type":"AddToStructure","original_name":"alexandra"}"#,
    );
    assert!(matches!(response, AppToUi::WorkingSetUpdated { ref shapes, .. } if shapes.len() == 1));
}

// ── Working structure ────────────────────────────────────────────────────

#[test]
fn add_to_structure_places_gallery_shape() {
    let mut state = make_state();
    save_names(&mut state, &["bob"]);
    match send(
        &mut state,
        r#"{"type":"AddToStructure","original_name":"bob"}"#,
    ) {
        AppToUi::WorkingSetUpdated { name, shapes, selected } => {
            assert_eq!(name, DEFAULT_STRUCTURE_NAME);
            assert_eq!(shapes.len(), 1);
            assert_eq!(shapes[0].name(), "bob");
            assert_eq!(selected, None);
        }
        other => panic!("expected WorkingSetUpdated, got {:?}", other),
    }
}

#[test]
fn add_unknown_shape_fails() {
    let mut state = make_state();
    let message = assert_error(send(
        &mut state,
        r#"{"type":"AddToStructure","original_name":"ghost"}"#,
    ));
    assert!(message.contains("ghost"));
    assert!(state.working_set.is_empty());
}

#[test]
fn same_shape_can_be_placed_twice() {
    let mut state = make_state();
    save_names(&mut state, &["bob"]);
    for _ in 0..2 {
        dispatch(
            &mut state,
            UiToApp::AddToStructure {
                original_name: "bob".into(),
            },
        );
    }
    let ids = placed_ids(&state);
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn move_select_and_remove() {
    let mut state = make_state();
    save_names(&mut state, &["bob", "alice"]);
    for name in ["bob", "alice"] {
        dispatch(
            &mut state,
            UiToApp::AddToStructure {
                original_name: name.into(),
            },
        );
    }
    let ids = placed_ids(&state);

    dispatch(
        &mut state,
        UiToApp::MoveShape {
            id: ids[0],
            position: [1.0, 0.5, -1.0],
        },
    );
    assert_eq!(state.working_set.find(ids[0]).unwrap().position, [1.0, 0.5, -1.0]);

    let response = dispatch(&mut state, UiToApp::SelectShape { id: Some(ids[0]) });
    assert!(matches!(
        response,
        AppToUi::WorkingSetUpdated { selected: Some(id), .. } if id == ids[0]
    ));

    dispatch(&mut state, UiToApp::RemoveShape { id: ids[0] });
    assert_eq!(placed_ids(&state), vec![ids[1]]);
    assert_eq!(state.working_set.selected_id(), None);
}

#[test]
fn deselect_with_null_id() {
    let mut state = make_state();
    save_names(&mut state, &["bob"]);
    send(&mut state, r#"{"type":"AddToStructure","original_name":"bob"}"#);
    let id = placed_ids(&state)[0];
    dispatch(&mut state, UiToApp::SelectShape { id: Some(id) });

    send(&mut state, r#"{"type":"SelectShape","id":null}"#);
    assert_eq!(state.working_set.selected_id(), None);
}

#[test]
fn remove_unknown_shape_fails() {
    let mut state = make_state();
    assert_error(dispatch(&mut state, UiToApp::RemoveShape { id: 99 }));
}

#[test]
fn new_structure_on_empty_set_skips_prompt() {
    let mut state = make_state();
    dispatch(
        &mut state,
        UiToApp::RenameStructure {
            name: "Tower".into(),
        },
    );
    let response = dispatch(&mut state, UiToApp::NewStructure { confirmed: false });
    assert!(matches!(response, AppToUi::WorkingSetUpdated { ref name, .. } if name == DEFAULT_STRUCTURE_NAME));
}

#[test]
fn new_structure_with_shapes_needs_confirmation() {
    let mut state = make_state();
    save_names(&mut state, &["bob"]);
    send(&mut state, r#"{"type":"AddToStructure","original_name":"bob"}"#);

    assert_prompt(
        dispatch(&mut state, UiToApp::NewStructure { confirmed: false }),
        NEW_STRUCTURE_PROMPT,
    );
    assert_eq!(state.working_set.len(), 1);

    dispatch(&mut state, UiToApp::NewStructure { confirmed: true });
    assert!(state.working_set.is_empty());
}

// ── Saved structures ─────────────────────────────────────────────────────

#[test]
fn save_empty_structure_fails() {
    let mut state = make_state();
    let message = assert_error(send(&mut state, r#"{"type":"SaveStructure"}"#));
    assert!(message.contains("no shapes"));
    assert!(state.structures.is_empty());
}

#[test]
fn save_structure_snapshots_working_set() {
    let mut state = make_state();
    save_names(&mut state, &["bob", "alice"]);
    for name in ["bob", "alice"] {
        dispatch(
            &mut state,
            UiToApp::AddToStructure {
                original_name: name.into(),
            },
        );
    }
    dispatch(
        &mut state,
        UiToApp::RenameStructure {
            name: "Tower".into(),
        },
    );

    match send(&mut state, r#"{"type":"SaveStructure"}"#) {
        AppToUi::StructureSaved {
            structure,
            structures,
        } => {
            assert_eq!(structure.name, "Tower");
            assert_eq!(structure.shapes.len(), 2);
            assert_eq!(structures.len(), 1);
            assert_eq!(structures[0].id, structure.id);
        }
        other => panic!("expected StructureSaved, got {:?}", other),
    }
    assert!(state.storage().get_item(STRUCTURES_KEY).unwrap().is_some());
}

#[test]
fn load_structure_into_empty_set_skips_prompt() {
    let mut state = make_state();
    save_names(&mut state, &["bob"]);
    send(&mut state, r#"{"type":"AddToStructure","original_name":"bob"}"#);
    state.working_set.set_name("Saved");
    send(&mut state, r#"{"type":"SaveStructure"}"#);
    let id = state.structures.list_structures()[0].id;

    dispatch(&mut state, UiToApp::NewStructure { confirmed: true });
    let response = dispatch(&mut state, UiToApp::LoadStructure { id, confirmed: false });
    match response {
        AppToUi::WorkingSetUpdated { name, shapes, .. } => {
            assert_eq!(name, "Saved");
            assert_eq!(shapes.len(), 1);
        }
        other => panic!("expected WorkingSetUpdated, got {:?}", other),
    }
}

#[test]
fn load_structure_over_work_needs_confirmation() {
    let mut state = make_state();
    save_names(&mut state, &["bob", "alice"]);
    send(&mut state, r#"{"type":"AddToStructure","original_name":"bob"}"#);
    send(&mut state, r#"{"type":"SaveStructure"}"#);
    let id = state.structures.list_structures()[0].id;
    send(&mut state, r#"{"type":"AddToStructure","original_name":"alice"}"#);

    assert_prompt(
        dispatch(&mut state, UiToApp::LoadStructure { id, confirmed: false }),
        LOAD_STRUCTURE_PROMPT,
    );
    assert_eq!(state.working_set.len(), 2);

    dispatch(&mut state, UiToApp::LoadStructure { id, confirmed: true });
    assert_eq!(state.working_set.len(), 1);
}

#[test]
fn load_unknown_structure_fails_before_prompting() {
    let mut state = make_state();
    let message = assert_error(dispatch(
        &mut state,
        UiToApp::LoadStructure {
            id: 42,
            confirmed: false,
        },
    ));
    assert!(message.contains("42"));
}

#[test]
fn delete_structure_needs_confirmation() {
    let mut state = make_state();
    save_names(&mut state, &["bob"]);
    send(&mut state, r#"{"type":"AddToStructure","original_name":"bob"}"#);
    send(&mut state, r#"{"type":"SaveStructure"}"#);
    let id = state.structures.list_structures()[0].id;

    assert_prompt(
        dispatch(&mut state, UiToApp::DeleteStructure { id, confirmed: false }),
        DELETE_STRUCTURE_PROMPT,
    );
    assert_eq!(state.structures.len(), 1);

    let response = dispatch(&mut state, UiToApp::DeleteStructure { id, confirmed: true });
    assert!(matches!(response, AppToUi::StructuresUpdated { ref structures } if structures.is_empty()));
}

#[test]
fn delete_unknown_structure_fails() {
    let mut state = make_state();
    assert_error(dispatch(
        &mut state,
        UiToApp::DeleteStructure {
            id: 7,
            confirmed: true,
        },
    ));
}

#[test]
fn list_structures_is_newest_first() {
    let clock = make_clock();
    let mut state = AppState::with_seed(MemoryStorage::new(), 3).with_clock(clock.clone());
    save_names(&mut state, &["bob"]);
    send(&mut state, r#"{"type":"AddToStructure","original_name":"bob"}"#);
    state.working_set.set_name("First");
    send(&mut state, r#"{"type":"SaveStructure"}"#);
    clock.advance_millis(1_000);
    state.working_set.set_name("Second");
    send(&mut state, r#"{"type":"SaveStructure"}"#);

    match send(&mut state, r#"{"type":"ListStructures"}"#) {
        AppToUi::StructuresUpdated { structures } => {
            let names: Vec<_> = structures.iter().map(|s| s.name.as_str()).collect();
            assert_eq!(names, vec!["Second", "First"]);
            assert!(structures[0].id > structures[1].id);
        }
        other => panic!("expected StructuresUpdated, got {:?}", other),
    }
}

#[test]
fn storage_quota_failure_reports_error_and_keeps_state() {
    let mut state = AppState::with_seed(MemoryStorage::with_quota(40), 1);
    send(&mut state, r#"{"type":"Generate","name":"bob"}"#);
    let message = assert_error(send(&mut state, r#"{"type":"SaveShape"}"#));
    assert!(message.contains("quota"));
    assert!(state.gallery.is_empty());
    assert!(state.pending.is_some());
}

#[test]
fn exhausted_ids_surface_as_error() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            STRUCTURES_KEY,
            r##"[{"id":9223372036854775807,"name":"Edge","shapes":[{"shape":"sphere","size":1.2,"shaderType":4,"color":"#5278e0","originalName":"alexandra","position":[0.0,0.0,0.0],"id":9223372036854775807}],"createdAt":"2024-05-29T16:26:40.123Z"}]"##,
        )
        .unwrap();
    let mut state = AppState::with_seed(storage, 1).with_clock(make_clock());
    save_names(&mut state, &["bob"]);
    send(&mut state, r#"{"type":"AddToStructure","original_name":"bob"}"#);

    let message = assert_error(send(&mut state, r#"{"type":"SaveStructure"}"#));
    assert!(message.contains("no id left"));
    assert_eq!(state.structures.len(), 1);

    let id = i64::MAX;
    dispatch(&mut state, UiToApp::LoadStructure { id, confirmed: true });
    assert_error(send(
        &mut state,
        r#"{"type":"AddToStructure","original_name":"bob"}"#,
    ));
    assert_eq!(state.working_set.len(), 1);
}

// ── Gallery outbox ───────────────────────────────────────────────────────

#[test]
fn outbox_holds_latest_gallery_after_dispatch() {
    let mut state = make_state();
    let outbox = GalleryOutbox::new();
    outbox.attach(&mut state.gallery);

    save_names(&mut state, &["bob", "alice"]);
    let shapes = outbox.take().unwrap();
    let names: Vec<_> = shapes.iter().map(|s| s.original_name.as_str()).collect();
    assert_eq!(names, vec!["bob", "alice"]);
    assert!(outbox.take().is_none());
}

#[test]
fn outbox_stays_empty_when_gallery_is_unchanged() {
    let mut state = make_state();
    save_names(&mut state, &["bob"]);
    let outbox = GalleryOutbox::new();
    outbox.attach(&mut state.gallery);

    save_names(&mut state, &["bob"]);
    send(&mut state, r#"{"type":"ListShapes"}"#);
    assert!(outbox.take().is_none());

    send(&mut state, r#"{"type":"ClearGallery","confirmed":true}"#);
    assert_eq!(outbox.take(), Some(Vec::new()));
}

#[test]
fn outbox_does_not_borrow_state_while_queued() {
    let mut state = make_state();
    let outbox = GalleryOutbox::new();
    outbox.attach(&mut state.gallery);
    save_names(&mut state, &["bob"]);

    // a listener reacting to the snapshot can keep driving the app
    let queued = outbox.take().unwrap();
    let response = dispatch(
        &mut state,
        UiToApp::AddToStructure {
            original_name: queued[0].original_name.clone(),
        },
    );
    assert!(matches!(response, AppToUi::WorkingSetUpdated { .. }));
}
