//! JSON command protocol for driving a session from scripts and agents.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use shared::{Anchor, AnchorEvent, AnchorNode, ObjectId, PlacementMode};

use crate::harness::TestHarness;
use crate::helpers::to_vec3;

/// A command executed against a [`TestHarness`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Select a catalog template for subsequent placements
    SelectTemplate { id: ObjectId },
    /// Switch placement mode
    SetMode { mode: PlacementMode },
    /// Show or hide the detected surface overlay
    SetOverlay { visible: bool },
    ToggleOverlay,
    /// Move the simulated device camera (angles in radians)
    SetCamera {
        position: [f64; 3],
        #[serde(default)]
        yaw: f32,
        #[serde(default)]
        pitch: f32,
    },
    /// Touch down at a screen point (pixels, top-left origin)
    TouchBegan { x: f32, y: f32 },
    TouchMoved { x: f32, y: f32 },
    TouchEnded,
    /// Tap wherever a world point appears on screen
    TapWorld { position: [f64; 3] },
    /// Report a newly tracked anchor
    AnchorAdded {
        anchor: Anchor,
        #[serde(default)]
        node: AnchorNode,
    },
    /// Report a refined anchor
    AnchorUpdated {
        anchor: Anchor,
        #[serde(default)]
        node: AnchorNode,
    },
    /// Undo the last placement.
    Undo,
    /// Redo the last undone placement.
    Redo,
    /// Remove every instance and surface, restart detection.
    Reset,
    /// Inspect the session: mode, affordances, instances.
    Inspect,
    /// Export the session snapshot as JSON.
    ExportState,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn placement_data(placed: Option<String>) -> serde_json::Value {
    serde_json::json!({ "placed": placed.is_some(), "id": placed })
}

fn affordance_data(harness: &TestHarness) -> serde_json::Value {
    let signals = harness.affordances();
    serde_json::json!({ "can_undo": signals.can_undo, "can_redo": signals.can_redo })
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::SelectTemplate { id } => {
            if harness.select_template(&id) {
                CommandResponse::ok_with_data(serde_json::json!({ "selected": id }))
            } else {
                CommandResponse::err(format!("Unknown template: {id}"))
            }
        }

        AgentCommand::SetMode { mode } => {
            harness.set_mode(mode);
            let config = harness.session.backend().configuration();
            CommandResponse::ok_with_data(serde_json::json!({
                "mode": mode,
                "overlay_visible": harness.session.overlay_visible(),
                "detect_images": config.detect_images,
                "detect_planes": config.detect_planes,
            }))
        }

        AgentCommand::SetOverlay { visible } => {
            harness.session.set_overlay(visible);
            CommandResponse::ok()
        }

        AgentCommand::ToggleOverlay => {
            let visible = harness.toggle_overlay();
            CommandResponse::ok_with_data(serde_json::json!({ "overlay_visible": visible }))
        }

        AgentCommand::SetCamera {
            position,
            yaw,
            pitch,
        } => {
            harness.set_camera(to_vec3(position), yaw, pitch);
            CommandResponse::ok()
        }

        AgentCommand::TouchBegan { x, y } => {
            let placed = harness.session.touch_began(Vec2::new(x, y));
            CommandResponse::ok_with_data(placement_data(placed))
        }

        AgentCommand::TouchMoved { x, y } => {
            let placed = harness.session.touch_moved(Vec2::new(x, y));
            CommandResponse::ok_with_data(placement_data(placed))
        }

        AgentCommand::TouchEnded => {
            harness.session.touch_ended();
            CommandResponse::ok()
        }

        AgentCommand::TapWorld { position } => {
            let placed = harness.tap_world(to_vec3(position));
            CommandResponse::ok_with_data(placement_data(placed))
        }

        AgentCommand::AnchorAdded { anchor, node } => {
            let before = harness.instance_count();
            harness.inject(AnchorEvent::Added { anchor, node });
            CommandResponse::ok_with_data(serde_json::json!({
                "placed": harness.instance_count() > before,
                "surface_count": harness.surface_count(),
            }))
        }

        AgentCommand::AnchorUpdated { anchor, node } => {
            harness.inject(AnchorEvent::Updated { anchor, node });
            CommandResponse::ok_with_data(serde_json::json!({
                "surface_count": harness.surface_count(),
            }))
        }

        AgentCommand::Undo => {
            let success = harness.undo();
            let mut data = affordance_data(harness);
            data["undone"] = success.into();
            CommandResponse::ok_with_data(data)
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            let mut data = affordance_data(harness);
            data["redone"] = success.into();
            CommandResponse::ok_with_data(data)
        }

        AgentCommand::Reset => {
            harness.reset();
            CommandResponse::ok_with_data(affordance_data(harness))
        }

        AgentCommand::Inspect => {
            let snapshot = harness.snapshot();
            let instances: Vec<serde_json::Value> = snapshot
                .instances
                .iter()
                .map(|instance| {
                    serde_json::json!({
                        "id": instance.id,
                        "index": instance.index,
                        "template_id": instance.template_id,
                        "position": instance.transform.position,
                        "visible": instance.visible,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "mode": snapshot.mode,
                "overlay_visible": snapshot.overlay_visible,
                "can_undo": snapshot.can_undo,
                "can_redo": snapshot.can_redo,
                "instance_count": instances.len(),
                "visible_count": snapshot.visible_count(),
                "surface_count": snapshot.surfaces.len(),
                "redo_depth": snapshot.redo_stack.len(),
                "instances": instances,
            }))
        }

        AgentCommand::ExportState => {
            let json = harness.export_state_json();
            CommandResponse::ok_with_data(serde_json::json!({ "state_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
