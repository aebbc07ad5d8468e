//! Spatial anchor feed interfaces.
//!
//! Plane/image tracking is an external capability. The session only consumes
//! it through the three traits below: the feed itself (configure / run /
//! pause and the queued anchor events), surface hit-testing, and the current
//! camera pose. [`SimulatedFeed`] implements all three for the desktop preview
//! and for tests.

mod simulated;

pub use simulated::{ScriptedImage, ScriptedPlane, SimulatedFeed};

use glam::{Mat4, Vec2};
use shared::{AnchorEvent, PlacementMode};

/// Name of the reference image group used in image-anchored mode
pub const IMAGE_GROUP: &str = "AR Resources";

/// Detection settings applied to the anchor feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedConfiguration {
    pub detect_images: bool,
    /// Reference image group, present only while image detection is on
    pub image_group: Option<String>,
    /// Horizontal plane detection
    pub detect_planes: bool,
}

impl FeedConfiguration {
    /// Configuration for a placement mode: planes are always detected,
    /// images only in image-anchored mode.
    pub fn for_mode(mode: PlacementMode) -> Self {
        let detect_images = mode == PlacementMode::ImageAnchored;
        Self {
            detect_images,
            image_group: detect_images.then(|| IMAGE_GROUP.to_string()),
            detect_planes: true,
        }
    }
}

/// Source of anchor events
pub trait AnchorFeed {
    fn configure(&mut self, config: FeedConfiguration);

    /// Start (or restart) tracking. `reset_anchors` drops every anchor found so far.
    fn run(&mut self, reset_anchors: bool);

    fn pause(&mut self);

    /// Take all anchor events queued since the last call
    fn drain_events(&mut self) -> Vec<AnchorEvent>;
}

/// Hit-testing against detected surfaces, limited to their extent
pub trait HitTester {
    /// World transform of the hit point, or None when no surface is under `screen_point`
    fn hit_test_surface(&self, screen_point: Vec2) -> Option<Mat4>;
}

impl<F> HitTester for F
where
    F: Fn(Vec2) -> Option<Mat4>,
{
    fn hit_test_surface(&self, screen_point: Vec2) -> Option<Mat4> {
        self(screen_point)
    }
}

/// Current camera pose; None while there is no camera frame
pub trait CameraPoseSource {
    fn current_camera_transform(&self) -> Option<Mat4>;
}

/// Everything the session needs from the tracking side
pub trait ArBackend: AnchorFeed + HitTester + CameraPoseSource {}

impl<T> ArBackend for T where T: AnchorFeed + HitTester + CameraPoseSource {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_per_mode() {
        let free = FeedConfiguration::for_mode(PlacementMode::Freeform);
        assert!(!free.detect_images);
        assert!(free.image_group.is_none());
        assert!(free.detect_planes);

        let surface = FeedConfiguration::for_mode(PlacementMode::SurfaceConstrained);
        assert!(!surface.detect_images);
        assert!(surface.detect_planes);

        let image = FeedConfiguration::for_mode(PlacementMode::ImageAnchored);
        assert!(image.detect_images);
        assert_eq!(image.image_group.as_deref(), Some(IMAGE_GROUP));
        assert!(image.detect_planes);
    }

    #[test]
    fn test_closure_hit_tester() {
        let hits = |p: Vec2| (p.x > 0.0).then_some(Mat4::IDENTITY);
        assert!(hits.hit_test_surface(Vec2::new(1.0, 0.0)).is_some());
        assert!(hits.hit_test_surface(Vec2::new(-1.0, 0.0)).is_none());
    }
}
