//! AR placement session
//!
//! Owns the anchor backend, the placement engine, the instance history and the
//! mode controller. Every mutation goes through `&mut self` on the control thread.

mod history;
mod modes;
mod placement;
mod snapshot;

pub use history::{Affordances, PlacementHistory};
pub use modes::{ModeController, SurfaceNode};
pub use placement::{PlacedInstance, PlacementConfig, PlacementEngine};

use glam::{Mat4, Vec2};
use shared::{Anchor, AnchorEvent, InstanceId, PlacementMode, TemplateObject};

use crate::anchor::{ArBackend, FeedConfiguration};
use crate::helpers::{to_extent, to_vec3, transform_to_mat4};

/// Placement session over an anchor backend
pub struct ArSession<B: ArBackend> {
    backend: B,
    placement: PlacementEngine,
    history: PlacementHistory,
    modes: ModeController,
    selected: Option<TemplateObject>,
    /// Monotonically increasing version counter for UI change detection
    version: u64,
}

impl<B: ArBackend> ArSession<B> {
    pub fn new(backend: B, config: PlacementConfig) -> Self {
        Self {
            backend,
            placement: PlacementEngine::new(config),
            history: PlacementHistory::new(),
            modes: ModeController::new(),
            selected: None,
            version: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn history(&self) -> &PlacementHistory {
        &self.history
    }

    pub fn surfaces(&self) -> &[SurfaceNode] {
        self.modes.surfaces()
    }

    pub fn placement_config(&self) -> &PlacementConfig {
        self.placement.config()
    }

    pub fn set_placement_config(&mut self, config: PlacementConfig) {
        self.placement.set_config(config);
    }

    /// Current session version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure the feed for the current mode and run it, keeping anchors
    pub fn start(&mut self) -> FeedConfiguration {
        self.bump();
        self.modes
            .reconfigure(&mut self.backend, false, &mut self.history)
    }

    pub fn pause(&mut self) {
        tracing::debug!("Session paused");
        self.backend.pause();
    }

    // ── Template and mode ─────────────────────────────────────

    pub fn select_template(&mut self, template: TemplateObject) {
        tracing::info!(template = %template.name, "Template selected");
        self.selected = Some(template);
        self.bump();
    }

    pub fn selected_template(&self) -> Option<&TemplateObject> {
        self.selected.as_ref()
    }

    pub fn mode(&self) -> PlacementMode {
        self.modes.mode()
    }

    pub fn set_mode(&mut self, mode: PlacementMode) -> FeedConfiguration {
        self.placement.end_gesture();
        self.bump();
        self.modes
            .set_mode(mode, &mut self.backend, &mut self.history)
    }

    pub fn overlay_visible(&self) -> bool {
        self.modes.overlay_visible()
    }

    pub fn set_overlay(&mut self, visible: bool) {
        self.modes.set_overlay(visible);
        self.bump();
    }

    /// Returns the new overlay visibility
    pub fn toggle_overlay(&mut self) -> bool {
        self.bump();
        self.modes.toggle_overlay()
    }

    // ── Touch input ───────────────────────────────────────────

    /// Start of a gesture. Returns the id of the placed instance, if any.
    pub fn touch_began(&mut self, point: Vec2) -> Option<InstanceId> {
        match self.modes.mode() {
            PlacementMode::Freeform => {
                let template = self.template_for_placement()?;
                let pose = self.backend.current_camera_transform();
                let instance = self.placement.place_in_front(template, pose)?;
                Some(self.commit(instance))
            }
            PlacementMode::SurfaceConstrained => self.place_on_surface(point),
            PlacementMode::ImageAnchored => None,
        }
    }

    /// Drag continues; only surface placement reacts
    pub fn touch_moved(&mut self, point: Vec2) -> Option<InstanceId> {
        match self.modes.mode() {
            PlacementMode::SurfaceConstrained => self.place_on_surface(point),
            _ => None,
        }
    }

    pub fn touch_ended(&mut self) {
        self.placement.end_gesture();
    }

    fn place_on_surface(&mut self, point: Vec2) -> Option<InstanceId> {
        let template = self.selected.as_ref()?;
        let instance = self
            .placement
            .place_on_surface(template, point, &self.backend)?;
        Some(self.commit(instance))
    }

    fn template_for_placement(&self) -> Option<&TemplateObject> {
        if self.selected.is_none() {
            tracing::debug!("No template selected, nothing to place");
        }
        self.selected.as_ref()
    }

    fn commit(&mut self, instance: PlacedInstance) -> InstanceId {
        let id = instance.id.clone();
        tracing::debug!(id = %id, template = %instance.template.id, "Instance placed");
        self.history.commit(instance);
        self.bump();
        id
    }

    // ── Anchor events ─────────────────────────────────────────

    /// Apply one anchor event. Returns the id of an instance placed because of it.
    pub fn handle_anchor_event(&mut self, event: &AnchorEvent) -> Option<InstanceId> {
        let node = transform_to_mat4(&event.node().transform);
        match (event, event.anchor()) {
            (AnchorEvent::Added { .. }, Anchor::Plane { id, center, extent }) => {
                self.modes
                    .plane_added(id, node, to_vec3(*center), to_extent(*extent));
                self.bump();
                None
            }
            (AnchorEvent::Updated { .. }, Anchor::Plane { id, center, extent }) => {
                if self
                    .modes
                    .plane_updated(id, node, to_vec3(*center), to_extent(*extent))
                {
                    self.bump();
                } else {
                    tracing::trace!(anchor = %id, "Update for unknown plane ignored");
                }
                None
            }
            (AnchorEvent::Added { .. }, Anchor::Image { id, name }) => {
                tracing::info!(anchor = %id, image = %name, "Reference image detected");
                self.place_on_image(id, node)
            }
            (AnchorEvent::Updated { .. }, Anchor::Image { id, .. }) => {
                let moved = self.history.follow_anchor(id, node);
                if moved > 0 {
                    tracing::trace!(anchor = %id, moved, "Anchored instances followed their node");
                    self.bump();
                }
                None
            }
        }
    }

    fn place_on_image(&mut self, anchor_id: &str, node: Mat4) -> Option<InstanceId> {
        let template = self.template_for_placement()?;
        let instance = self
            .placement
            .place_on_image_anchor(template, &anchor_id.to_string(), node);
        Some(self.commit(instance))
    }

    /// Apply every event the feed queued since the last poll.
    /// Returns the number of events handled.
    pub fn poll_feed(&mut self) -> usize {
        let events = self.backend.drain_events();
        for event in &events {
            self.handle_anchor_event(event);
        }
        events.len()
    }

    // ── History ───────────────────────────────────────────────

    pub fn undo(&mut self) -> Option<Affordances> {
        let Some(signals) = self.history.undo() else {
            tracing::debug!("Nothing to undo");
            return None;
        };
        self.bump();
        Some(signals)
    }

    pub fn redo(&mut self) -> Option<Affordances> {
        let Some(signals) = self.history.redo() else {
            tracing::debug!("Nothing to redo");
            return None;
        };
        self.bump();
        Some(signals)
    }

    /// Drop every instance and surface, restart detection from scratch
    pub fn reset_scene(&mut self) -> Affordances {
        self.modes
            .reconfigure(&mut self.backend, true, &mut self.history);
        self.placement.end_gesture();
        self.bump();
        self.history.affordances()
    }

    pub fn affordances(&self) -> Affordances {
        self.history.affordances()
    }
}
