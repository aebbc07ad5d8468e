//! Headless test harness for programmatic session manipulation.
//!
//! Wraps an [`ArSession`] over a [`SimulatedFeed`] and exposes the gestures a
//! user would perform on the device: pointing the camera, tapping, dragging,
//! switching modes and pressing undo/redo.

use glam::{Mat4, Vec2, Vec3};
use shared::{AnchorEvent, InstanceId, PlacementMode, SessionSnapshot, TemplateObject};

use crate::anchor::SimulatedFeed;
use crate::fixtures;
use crate::state::catalog;
use crate::state::session::{Affordances, ArSession, PlacementConfig};
use crate::viewport::camera::DeviceCamera;

/// Headless test harness: owns a session, its simulated world and a template catalog
pub struct TestHarness {
    pub session: ArSession<SimulatedFeed>,
    pub templates: Vec<TemplateObject>,
}

impl TestHarness {
    /// Create a harness over an empty world. The feed is already running.
    pub fn new() -> Self {
        Self::with_feed(SimulatedFeed::new())
    }

    /// Create a harness over a prepared world and report what it sees
    pub fn with_feed(feed: SimulatedFeed) -> Self {
        let mut session = ArSession::new(feed, PlacementConfig::default());
        session.start();
        session.poll_feed();
        Self {
            session,
            templates: fixtures::templates(),
        }
    }

    // ── Template selection ────────────────────────────────────

    /// Select a catalog template by id
    pub fn select_template(&mut self, id: &str) -> bool {
        let Some(template) = catalog::find(&self.templates, id) else {
            return false;
        };
        self.session.select_template(template);
        true
    }

    /// Select the 10 cm cube
    pub fn select_cube(&mut self) {
        self.session.select_template(fixtures::small_cube());
    }

    // ── Simulated world ───────────────────────────────────────

    pub fn camera(&self) -> &DeviceCamera {
        &self.session.backend().camera
    }

    pub fn set_camera(&mut self, position: Vec3, yaw: f32, pitch: f32) {
        self.session.backend_mut().camera = DeviceCamera::at(position, yaw, pitch);
    }

    /// Point the camera straight down from `position`
    pub fn look_down_from(&mut self, position: Vec3) {
        self.set_camera(position, 0.0, -std::f32::consts::FRAC_PI_2);
    }

    pub fn viewport(&self) -> Vec2 {
        self.session.backend().viewport
    }

    pub fn screen_center(&self) -> Vec2 {
        self.viewport() * 0.5
    }

    /// Add a horizontal plane at height `y` centered under the origin, then poll
    pub fn add_floor(&mut self, id: &str, y: f32, extent: Vec2) {
        self.session.backend_mut().add_plane(
            id,
            Mat4::from_translation(Vec3::new(0.0, y, 0.0)),
            Vec3::ZERO,
            extent,
        );
        self.poll();
    }

    /// Add a reference image lying at `position`, then poll
    pub fn add_image_target(&mut self, id: &str, position: Vec3) {
        self.session
            .backend_mut()
            .add_image(id, id, Mat4::from_translation(position), 0.2);
        self.poll();
    }

    /// Resize a scripted plane, then poll
    pub fn grow_plane(&mut self, id: &str, extent: Vec2) -> bool {
        let grown = self.session.backend_mut().grow_plane(id, Vec3::ZERO, extent);
        self.poll();
        grown
    }

    /// Push an anchor event through the feed and poll
    pub fn inject(&mut self, event: AnchorEvent) -> usize {
        self.session.backend_mut().inject(event);
        self.poll()
    }

    /// Apply queued anchor events; returns how many were handled
    pub fn poll(&mut self) -> usize {
        self.session.poll_feed()
    }

    // ── Gestures ──────────────────────────────────────────────

    /// A single tap: touch down and up at one point
    pub fn tap(&mut self, point: Vec2) -> Option<InstanceId> {
        let placed = self.session.touch_began(point);
        self.session.touch_ended();
        placed
    }

    /// A drag through `points`; returns ids of every instance placed on the way
    pub fn drag(&mut self, points: &[Vec2]) -> Vec<InstanceId> {
        let mut placed = Vec::new();
        if let Some((first, rest)) = points.split_first() {
            placed.extend(self.session.touch_began(*first));
            for point in rest {
                placed.extend(self.session.touch_moved(*point));
            }
        }
        self.session.touch_ended();
        placed
    }

    /// Screen position of a world point, if it is in front of the camera
    pub fn screen_of(&self, world: Vec3) -> Option<Vec2> {
        self.camera().project(world, self.viewport())
    }

    /// Tap wherever `world` appears on screen
    pub fn tap_world(&mut self, world: Vec3) -> Option<InstanceId> {
        let point = self.screen_of(world)?;
        self.tap(point)
    }

    /// Drag across the screen positions of world points
    pub fn drag_world(&mut self, points: &[Vec3]) -> Vec<InstanceId> {
        let screen: Vec<Vec2> = points.iter().filter_map(|p| self.screen_of(*p)).collect();
        self.drag(&screen)
    }

    /// Freeform tap: screen position does not matter
    pub fn place_in_front(&mut self) -> Option<InstanceId> {
        self.tap(self.screen_center())
    }

    // ── Mode and overlay ──────────────────────────────────────

    pub fn set_mode(&mut self, mode: PlacementMode) {
        self.session.set_mode(mode);
        self.poll();
    }

    pub fn toggle_overlay(&mut self) -> bool {
        self.session.toggle_overlay()
    }

    // ── History ───────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.session.undo().is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo().is_some()
    }

    /// Reset the scene and let the feed rediscover the world
    pub fn reset(&mut self) {
        self.session.reset_scene();
        self.poll();
    }

    pub fn affordances(&self) -> Affordances {
        self.session.affordances()
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn instance_count(&self) -> usize {
        self.session.history().len()
    }

    pub fn visible_count(&self) -> usize {
        self.session.history().visible().count()
    }

    pub fn hidden_count(&self) -> usize {
        self.instance_count() - self.visible_count()
    }

    pub fn surface_count(&self) -> usize {
        self.session.surfaces().len()
    }

    /// World position of a placed instance
    pub fn position_of(&self, id: &str) -> Option<Vec3> {
        self.session.history().get(id).map(|i| i.position())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Export the session snapshot as JSON
    pub fn export_state_json(&self) -> String {
        serde_json::to_string_pretty(&self.snapshot()).unwrap_or_default()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
