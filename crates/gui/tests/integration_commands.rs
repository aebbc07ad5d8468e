//! Integration tests for the AgentCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use ardraw_lib::command::{execute_json, execute_json_batch};
use ardraw_lib::harness::TestHarness;
use shared::SessionSnapshot;

const FLOOR: &str = r#"{"command": "anchor_added", "anchor": {"type": "plane", "id": "floor", "center": [0, 0, 0], "extent": [2, 2]}}"#;

#[test]
fn test_command_select_template() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "select_template", "id": "sphere"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["selected"], "sphere");
    assert_eq!(h.session.selected_template().map(|t| t.id.as_str()), Some("sphere"));
}

#[test]
fn test_command_unknown_template() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "select_template", "id": "teapot"}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("Unknown template: teapot"));
    assert!(h.session.selected_template().is_none());
}

#[test]
fn test_command_invalid_json() {
    let mut h = TestHarness::new();

    let err = execute_json(&mut h, r#"{"command": "explode"}"#).unwrap_err();
    assert!(err.starts_with("Invalid command JSON"), "{err}");

    let err = execute_json_batch(&mut h, r#"{"command": "undo"}"#).unwrap_err();
    assert!(err.starts_with("Invalid commands JSON"), "{err}");
}

#[test]
fn test_command_set_mode_reports_feed_configuration() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "set_mode", "mode": "image_anchored"}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["mode"], "image_anchored");
    assert_eq!(data["detect_images"], true);
    assert_eq!(data["detect_planes"], true);
    assert_eq!(data["overlay_visible"], false);

    let resp =
        execute_json(&mut h, r#"{"command": "set_mode", "mode": "surface_constrained"}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["detect_images"], false);
    assert_eq!(data["overlay_visible"], true);
}

#[test]
fn test_command_undo_on_empty_history() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["undone"], false);
    assert_eq!(data["can_undo"], false);
    assert_eq!(data["can_redo"], false);
}

#[test]
fn test_command_freeform_workflow_via_json_batch() {
    let mut h = TestHarness::new();

    let json = r#"[
        {"command": "select_template", "id": "small_cube"},
        {"command": "touch_began", "x": 100, "y": 100},
        {"command": "touch_ended"},
        {"command": "touch_began", "x": 300, "y": 200},
        {"command": "touch_ended"},
        {"command": "undo"},
        {"command": "inspect"}
    ]"#;

    let responses = execute_json_batch(&mut h, json).unwrap();
    assert_eq!(responses.len(), 7);
    for resp in &responses {
        assert!(resp.success, "Failed: {:?}", resp.error);
    }
    assert_eq!(responses[1].data.as_ref().unwrap()["placed"], true);

    let data = responses[6].data.as_ref().unwrap();
    assert_eq!(data["instance_count"], 2);
    assert_eq!(data["visible_count"], 1);
    assert_eq!(data["redo_depth"], 1);
    assert_eq!(data["can_undo"], true);
    assert_eq!(data["can_redo"], true);
    assert_eq!(data["instances"][1]["visible"], false);
}

#[test]
fn test_command_anchor_added_plane() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, FLOOR).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["surface_count"], 1);
    assert_eq!(data["placed"], false);

    // Same anchor again is a refinement, not a second surface
    let resp = execute_json(&mut h, FLOOR).unwrap();
    assert_eq!(resp.data.unwrap()["surface_count"], 1);
}

#[test]
fn test_command_tap_world_on_floor() {
    let mut h = TestHarness::new();

    let json = format!(
        r#"[
        {{"command": "select_template", "id": "small_cube"}},
        {{"command": "set_camera", "position": [0, 1, 0], "pitch": -1.5707964}},
        {FLOOR},
        {{"command": "set_mode", "mode": "surface_constrained"}},
        {{"command": "tap_world", "position": [0.1, 0, 0]}},
        {{"command": "inspect"}}
    ]"#
    );

    let responses = execute_json_batch(&mut h, &json).unwrap();
    assert_eq!(responses[4].data.as_ref().unwrap()["placed"], true);

    let data = responses[5].data.as_ref().unwrap();
    let position = data["instances"][0]["position"].as_array().unwrap();
    let y = position[1].as_f64().unwrap();
    assert!((y - 0.06).abs() < 1e-3, "y = {y}");
}

#[test]
fn test_command_image_anchor_places_child() {
    let mut h = TestHarness::new();

    let json = r#"[
        {"command": "select_template", "id": "cone"},
        {"command": "set_mode", "mode": "image_anchored"},
        {"command": "anchor_added",
         "anchor": {"type": "image", "id": "poster", "name": "poster"},
         "node": {"transform": {"position": [0, 0, -0.5], "rotation": [0, 0, 0], "scale": [1, 1, 1]}}},
        {"command": "anchor_updated",
         "anchor": {"type": "image", "id": "poster", "name": "poster"},
         "node": {"transform": {"position": [0, 0, -0.6], "rotation": [0, 0, 0], "scale": [1, 1, 1]}}}
    ]"#;

    let responses = execute_json_batch(&mut h, json).unwrap();
    assert_eq!(responses[2].data.as_ref().unwrap()["placed"], true);
    assert_eq!(h.instance_count(), 1);
    assert_eq!(h.session.history().entries()[0].template.id, "cone");
}

#[test]
fn test_command_reset() {
    let mut h = TestHarness::new();
    h.select_cube();
    h.place_in_front();
    h.place_in_front();

    let resp = execute_json(&mut h, r#"{"command": "reset"}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["can_undo"], false);
    assert_eq!(data["can_redo"], false);
    assert_eq!(h.instance_count(), 0);
}

#[test]
fn test_command_toggle_overlay() {
    let mut h = TestHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "toggle_overlay"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["overlay_visible"], true);

    execute_json(&mut h, r#"{"command": "set_overlay", "visible": false}"#).unwrap();
    assert!(!h.session.overlay_visible());
}

#[test]
fn test_command_export_state() {
    let mut h = TestHarness::new();
    h.select_cube();
    h.place_in_front();

    let resp = execute_json(&mut h, r#"{"command": "export_state"}"#).unwrap();
    let data = resp.data.unwrap();
    let snap: SessionSnapshot =
        serde_json::from_str(data["state_json"].as_str().unwrap()).unwrap();
    assert_eq!(snap.instances.len(), 1);
    assert_eq!(snap.instances[0].template_id, "small_cube");
    assert!(snap.can_undo);
}
