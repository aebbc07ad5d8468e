//! Placement mode, surface overlay and feed reconfiguration.

use glam::{Mat4, Vec2, Vec3};
use shared::{AnchorId, PlacementMode};

use super::history::PlacementHistory;
use crate::anchor::{AnchorFeed, FeedConfiguration};

/// Visual overlay for a detected plane
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceNode {
    pub anchor_id: AnchorId,
    /// World transform of the plane's anchor node
    pub node: Mat4,
    /// Center in node space
    pub center: Vec3,
    pub extent: Vec2,
    pub hidden: bool,
}

impl SurfaceNode {
    /// World-space corners of the overlay quad
    pub fn corners(&self) -> [Vec3; 4] {
        let hx = self.extent.x / 2.0;
        let hz = self.extent.y / 2.0;
        [
            Vec3::new(-hx, 0.0, -hz),
            Vec3::new(hx, 0.0, -hz),
            Vec3::new(hx, 0.0, hz),
            Vec3::new(-hx, 0.0, hz),
        ]
        .map(|c| self.node.transform_point3(self.center + c))
    }
}

/// Owns the current mode, overlay visibility and the surface nodes
#[derive(Debug, Default)]
pub struct ModeController {
    mode: PlacementMode,
    overlay_visible: bool,
    surfaces: Vec<SurfaceNode>,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn surfaces(&self) -> &[SurfaceNode] {
        &self.surfaces
    }

    /// Switch mode; the overlay is shown only for surface placement.
    /// The feed is reconfigured without dropping anchors.
    pub fn set_mode<F: AnchorFeed + ?Sized>(
        &mut self,
        mode: PlacementMode,
        feed: &mut F,
        history: &mut PlacementHistory,
    ) -> FeedConfiguration {
        tracing::info!(?mode, "Placement mode changed");
        self.mode = mode;
        self.set_overlay(mode == PlacementMode::SurfaceConstrained);
        self.reconfigure(feed, false, history)
    }

    pub fn set_overlay(&mut self, visible: bool) {
        self.overlay_visible = visible;
        for surface in &mut self.surfaces {
            surface.hidden = !visible;
        }
    }

    pub fn toggle_overlay(&mut self) -> bool {
        self.set_overlay(!self.overlay_visible);
        self.overlay_visible
    }

    /// Apply the configuration for the current mode and (re)start the feed.
    /// With `reset_anchors` every surface node and the whole history go too.
    pub fn reconfigure<F: AnchorFeed + ?Sized>(
        &mut self,
        feed: &mut F,
        reset_anchors: bool,
        history: &mut PlacementHistory,
    ) -> FeedConfiguration {
        let config = FeedConfiguration::for_mode(self.mode);
        feed.configure(config.clone());

        if reset_anchors {
            let surfaces = self.surfaces.len();
            let instances = history.reset().len();
            self.surfaces.clear();
            tracing::info!(surfaces, instances, "Scene reset");
        }

        feed.run(reset_anchors);
        config
    }

    /// New plane detected. A repeated id updates the existing node.
    pub fn plane_added(&mut self, anchor_id: &str, node: Mat4, center: Vec3, extent: Vec2) {
        if self.plane_updated(anchor_id, node, center, extent) {
            return;
        }
        tracing::debug!(anchor_id, "Surface detected");
        self.surfaces.push(SurfaceNode {
            anchor_id: anchor_id.to_string(),
            node,
            center,
            extent,
            hidden: !self.overlay_visible,
        });
    }

    /// Move and resize the node of a known plane; false for unknown anchors
    pub fn plane_updated(&mut self, anchor_id: &str, node: Mat4, center: Vec3, extent: Vec2) -> bool {
        let Some(surface) = self.surfaces.iter_mut().find(|s| s.anchor_id == anchor_id) else {
            return false;
        };
        surface.node = node;
        surface.center = center;
        surface.extent = extent;
        true
    }
}
