//! Factory functions for creating test data.
//!
//! Provides templates, anchor events and a ready-made simulated world used in
//! unit tests, integration tests and by the command interface.

use glam::{Mat4, Vec2, Vec3};
use shared::*;

use crate::anchor::SimulatedFeed;
use crate::state::catalog;
use crate::state::session::PlacedInstance;
use crate::viewport::camera::DeviceCamera;

// ── Templates ───────────────────────────────────────────────────

/// 10 cm cube
pub fn small_cube() -> TemplateObject {
    catalog::small_cube()
}

/// Every built-in template
pub fn templates() -> Vec<TemplateObject> {
    catalog::builtin_templates()
}

/// Instance of [`small_cube`] at a world position, not yet committed
pub fn instance_at(x: f32, y: f32, z: f32) -> PlacedInstance {
    PlacedInstance {
        id: uuid::Uuid::new_v4().to_string(),
        index: 0,
        template: small_cube(),
        parent: InstanceParent::Root,
        transform: Mat4::from_translation(Vec3::new(x, y, z)),
        visible: true,
    }
}

// ── Anchor events ───────────────────────────────────────────────

pub fn plane(id: &str, extent: [f64; 2]) -> Anchor {
    Anchor::Plane {
        id: id.to_string(),
        center: [0.0; 3],
        extent,
    }
}

/// A floor plane detected at the world origin
pub fn plane_added(id: &str, extent: [f64; 2]) -> AnchorEvent {
    AnchorEvent::Added {
        anchor: plane(id, extent),
        node: AnchorNode::default(),
    }
}

pub fn plane_updated(id: &str, extent: [f64; 2]) -> AnchorEvent {
    AnchorEvent::Updated {
        anchor: plane(id, extent),
        node: AnchorNode::default(),
    }
}

/// A reference image half a metre in front of the origin
pub fn image_added(id: &str) -> AnchorEvent {
    AnchorEvent::Added {
        anchor: Anchor::Image {
            id: id.to_string(),
            name: id.to_string(),
        },
        node: AnchorNode::at([0.0, 0.0, -0.5]),
    }
}

pub fn image_updated(id: &str) -> AnchorEvent {
    AnchorEvent::Updated {
        anchor: Anchor::Image {
            id: id.to_string(),
            name: id.to_string(),
        },
        node: AnchorNode::at([0.0, 0.0, -0.6]),
    }
}

// ── Simulated worlds ────────────────────────────────────────────

/// Camera one metre up, looking straight down
pub fn top_down_camera() -> DeviceCamera {
    DeviceCamera::at(Vec3::new(0.0, 1.0, 0.0), 0.0, -std::f32::consts::FRAC_PI_2)
}

/// A 1x1 m floor under a top-down camera. The screen center hits the origin,
/// the top and bottom edges miss the floor.
pub fn floor_feed() -> SimulatedFeed {
    let mut feed = SimulatedFeed::new();
    feed.camera = top_down_camera();
    feed.add_plane("floor", Mat4::IDENTITY, Vec3::ZERO, Vec2::new(1.0, 1.0));
    feed
}
