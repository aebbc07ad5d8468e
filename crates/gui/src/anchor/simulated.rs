//! Scripted stand-in for a real tracking session.
//!
//! The "world" is a list of planes and image targets. While running, every
//! scripted anchor allowed by the current configuration is reported once as
//! `Added`; resetting forgets what was found so it gets reported again.

use std::collections::VecDeque;

use glam::{Mat4, Vec2, Vec3};
use shared::{Anchor, AnchorEvent, AnchorId, AnchorNode};

use super::{AnchorFeed, CameraPoseSource, FeedConfiguration, HitTester};
use crate::helpers::{from_extent, from_vec3, mat4_to_transform, to_extent, to_vec3, transform_to_mat4};
use crate::viewport::camera::DeviceCamera;
use crate::viewport::picking::ray_surface;

/// A horizontal plane in the simulated world
#[derive(Clone, Debug)]
pub struct ScriptedPlane {
    pub id: AnchorId,
    /// World transform of the anchor node
    pub node: Mat4,
    /// Plane center in node space
    pub center: Vec3,
    /// Plane size along node X and Z
    pub extent: Vec2,
    pub detected: bool,
}

impl ScriptedPlane {
    fn anchor(&self) -> Anchor {
        Anchor::Plane {
            id: self.id.clone(),
            center: from_vec3(self.center),
            extent: from_extent(self.extent),
        }
    }
}

/// A reference image lying somewhere in the simulated world
#[derive(Clone, Debug)]
pub struct ScriptedImage {
    pub id: AnchorId,
    pub name: String,
    pub node: Mat4,
    /// Physical width of the printed image
    pub size: f32,
    pub detected: bool,
}

impl ScriptedImage {
    fn anchor(&self) -> Anchor {
        Anchor::Image {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

fn node_of(m: &Mat4) -> AnchorNode {
    AnchorNode {
        transform: mat4_to_transform(m),
    }
}

/// Simulated anchor feed seen through a [`DeviceCamera`]
pub struct SimulatedFeed {
    pub camera: DeviceCamera,
    /// Screen size used for hit-testing
    pub viewport: Vec2,
    config: FeedConfiguration,
    running: bool,
    planes: Vec<ScriptedPlane>,
    images: Vec<ScriptedImage>,
    pending: VecDeque<AnchorEvent>,
}

impl SimulatedFeed {
    pub fn new() -> Self {
        Self {
            camera: DeviceCamera::new(),
            viewport: Vec2::new(800.0, 600.0),
            config: FeedConfiguration::default(),
            running: false,
            planes: Vec::new(),
            images: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// The default desktop world: a floor, a table and a poster lying on the table
    pub fn demo() -> Self {
        let mut feed = Self::new();
        feed.add_plane("floor", Mat4::IDENTITY, Vec3::ZERO, Vec2::new(3.0, 3.0));
        feed.add_plane(
            "table",
            Mat4::from_translation(Vec3::new(0.6, 0.4, -0.8)),
            Vec3::ZERO,
            Vec2::new(0.8, 0.5),
        );
        feed.add_image(
            "poster",
            "poster",
            Mat4::from_translation(Vec3::new(0.6, 0.401, -0.8)),
            0.2,
        );
        feed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn configuration(&self) -> &FeedConfiguration {
        &self.config
    }

    pub fn planes(&self) -> &[ScriptedPlane] {
        &self.planes
    }

    pub fn images(&self) -> &[ScriptedImage] {
        &self.images
    }

    /// Put a plane into the world; it is reported once plane detection runs
    pub fn add_plane(&mut self, id: impl Into<AnchorId>, node: Mat4, center: Vec3, extent: Vec2) {
        self.planes.push(ScriptedPlane {
            id: id.into(),
            node,
            center,
            extent,
            detected: false,
        });
    }

    /// Put a reference image into the world; reported only while image detection is on
    pub fn add_image(&mut self, id: impl Into<AnchorId>, name: impl Into<String>, node: Mat4, size: f32) {
        self.images.push(ScriptedImage {
            id: id.into(),
            name: name.into(),
            node,
            size,
            detected: false,
        });
    }

    /// Extend a plane, as tracking does while it keeps seeing more of the surface.
    /// Returns false for unknown planes.
    pub fn grow_plane(&mut self, id: &str, center: Vec3, extent: Vec2) -> bool {
        let Some(plane) = self.planes.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        plane.center = center;
        plane.extent = extent;
        if plane.detected {
            self.pending.push_back(AnchorEvent::Updated {
                anchor: plane.anchor(),
                node: node_of(&plane.node),
            });
        }
        true
    }

    /// Feed an externally described anchor event through the simulation.
    /// The anchor becomes part of the world as already detected.
    pub fn inject(&mut self, event: AnchorEvent) {
        let node = transform_to_mat4(&event.node().transform);
        match event.anchor() {
            Anchor::Plane { id, center, extent } => {
                let (center, extent) = (to_vec3(*center), to_extent(*extent));
                match self.planes.iter_mut().find(|p| p.id == *id) {
                    Some(plane) => {
                        plane.node = node;
                        plane.center = center;
                        plane.extent = extent;
                        plane.detected = true;
                    }
                    None => self.planes.push(ScriptedPlane {
                        id: id.clone(),
                        node,
                        center,
                        extent,
                        detected: true,
                    }),
                }
            }
            Anchor::Image { id, name } => match self.images.iter_mut().find(|i| i.id == *id) {
                Some(image) => {
                    image.node = node;
                    image.detected = true;
                }
                None => self.images.push(ScriptedImage {
                    id: id.clone(),
                    name: name.clone(),
                    node,
                    size: 0.2,
                    detected: true,
                }),
            },
        }
        self.pending.push_back(event);
    }

    /// Report every scripted anchor the current configuration can see
    fn discover(&mut self) {
        if self.config.detect_planes {
            for plane in self.planes.iter_mut().filter(|p| !p.detected) {
                plane.detected = true;
                self.pending.push_back(AnchorEvent::Added {
                    anchor: plane.anchor(),
                    node: node_of(&plane.node),
                });
            }
        }
        if self.config.detect_images {
            for image in self.images.iter_mut().filter(|i| !i.detected) {
                image.detected = true;
                self.pending.push_back(AnchorEvent::Added {
                    anchor: image.anchor(),
                    node: node_of(&image.node),
                });
            }
        }
    }
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl AnchorFeed for SimulatedFeed {
    fn configure(&mut self, config: FeedConfiguration) {
        tracing::debug!(?config, "simulated feed configured");
        self.config = config;
    }

    fn run(&mut self, reset_anchors: bool) {
        if reset_anchors {
            self.pending.clear();
            for plane in &mut self.planes {
                plane.detected = false;
            }
            for image in &mut self.images {
                image.detected = false;
            }
        }
        self.running = true;
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn drain_events(&mut self) -> Vec<AnchorEvent> {
        if self.running {
            self.discover();
        }
        self.pending.drain(..).collect()
    }
}

impl HitTester for SimulatedFeed {
    fn hit_test_surface(&self, screen_point: Vec2) -> Option<Mat4> {
        if !self.running {
            return None;
        }
        let ray = self.camera.screen_ray(screen_point, self.viewport);
        self.planes
            .iter()
            .filter(|p| p.detected)
            .filter_map(|p| ray_surface(&ray, &p.node, p.center, p.extent))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(hit, _)| Mat4::from_translation(hit))
    }
}

impl CameraPoseSource for SimulatedFeed {
    fn current_camera_transform(&self) -> Option<Mat4> {
        self.running.then(|| self.camera.pose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::translation_of;
    use shared::PlacementMode;

    fn floor_feed() -> SimulatedFeed {
        let mut feed = SimulatedFeed::new();
        feed.camera = DeviceCamera::at(Vec3::new(0.0, 1.0, 0.0), 0.0, -std::f32::consts::FRAC_PI_2);
        feed.add_plane("floor", Mat4::IDENTITY, Vec3::ZERO, Vec2::new(2.0, 2.0));
        feed
    }

    #[test]
    fn test_nothing_reported_before_run() {
        let mut feed = floor_feed();
        feed.configure(FeedConfiguration::for_mode(PlacementMode::Freeform));
        assert!(feed.drain_events().is_empty());
        assert!(feed.current_camera_transform().is_none());
    }

    #[test]
    fn test_planes_reported_once() {
        let mut feed = floor_feed();
        feed.configure(FeedConfiguration::for_mode(PlacementMode::Freeform));
        feed.run(false);

        let events = feed.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], AnchorEvent::Added { anchor: Anchor::Plane { .. }, .. }));
        assert!(feed.drain_events().is_empty());

        feed.run(true);
        assert_eq!(feed.drain_events().len(), 1);
    }

    #[test]
    fn test_images_need_image_detection() {
        let mut feed = SimulatedFeed::new();
        feed.add_image("img", "poster", Mat4::IDENTITY, 0.2);
        feed.configure(FeedConfiguration::for_mode(PlacementMode::SurfaceConstrained));
        feed.run(false);
        assert!(feed.drain_events().is_empty());

        feed.configure(FeedConfiguration::for_mode(PlacementMode::ImageAnchored));
        feed.run(false);
        let events = feed.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].anchor().id(), "img");
    }

    #[test]
    fn test_grow_plane_emits_update() {
        let mut feed = floor_feed();
        feed.configure(FeedConfiguration::for_mode(PlacementMode::SurfaceConstrained));
        feed.run(false);
        feed.drain_events();

        assert!(feed.grow_plane("floor", Vec3::new(0.5, 0.0, 0.0), Vec2::new(3.0, 2.0)));
        let events = feed.drain_events();
        match &events[..] {
            [AnchorEvent::Updated { anchor: Anchor::Plane { extent, .. }, .. }] => {
                assert_eq!(*extent, [3.0, 2.0]);
            }
            other => panic!("Expected one plane update, got {:?}", other),
        }
        assert!(!feed.grow_plane("missing", Vec3::ZERO, Vec2::ONE));
    }

    #[test]
    fn test_hit_test_only_detected_planes() {
        let mut feed = floor_feed();
        feed.configure(FeedConfiguration::for_mode(PlacementMode::SurfaceConstrained));
        feed.run(false);
        let center = feed.viewport * 0.5;
        assert!(feed.hit_test_surface(center).is_none());

        feed.drain_events();
        let hit = feed.hit_test_surface(center).unwrap();
        assert!(translation_of(&hit).length() < 1e-4);
    }

    #[test]
    fn test_inject_registers_anchor() {
        let mut feed = SimulatedFeed::new();
        feed.inject(AnchorEvent::Added {
            anchor: Anchor::Plane {
                id: "p".into(),
                center: [0.0; 3],
                extent: [1.0, 1.0],
            },
            node: AnchorNode::at([0.0, -0.5, 0.0]),
        });
        assert_eq!(feed.planes().len(), 1);
        assert!(feed.planes()[0].detected);
        assert_eq!(feed.drain_events().len(), 1);
    }

    #[test]
    fn test_demo_world_by_mode() {
        let mut feed = SimulatedFeed::demo();
        feed.configure(FeedConfiguration::for_mode(PlacementMode::Freeform));
        feed.run(false);
        assert_eq!(feed.drain_events().len(), 2);

        feed.configure(FeedConfiguration::for_mode(PlacementMode::ImageAnchored));
        let events = feed.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].anchor(), Anchor::Image { .. }));
    }
}
