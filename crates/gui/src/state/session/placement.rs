//! Placement engine: where a clone of the selected template may go.

use glam::{Mat4, Vec2, Vec3};
use shared::{AnchorId, InstanceId, InstanceParent, TemplateObject};

use crate::anchor::HitTester;
use crate::helpers::translation_of;

/// Placement constants. `unit_scale` converts template dimensions to world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Distance in front of the camera for freeform placement
    pub forward_offset: f32,
    /// Minimum spacing between consecutive surface placements of one gesture
    pub distance_threshold: f32,
    /// Gap left between a surface and the bottom of a placed object
    pub surface_epsilon: f32,
    pub unit_scale: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            forward_offset: 0.2,
            distance_threshold: 0.05,
            surface_epsilon: 0.01,
            unit_scale: 1.0,
        }
    }
}

/// A placed clone of a template
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedInstance {
    pub id: InstanceId,
    /// Insertion index, assigned by the history on commit
    pub index: u64,
    pub template: TemplateObject,
    pub parent: InstanceParent,
    /// World transform
    pub transform: Mat4,
    pub visible: bool,
}

impl PlacedInstance {
    fn clone_of(template: &TemplateObject, parent: InstanceParent, transform: Mat4) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            index: 0,
            template: template.clone(),
            parent,
            transform,
            visible: true,
        }
    }

    pub fn position(&self) -> Vec3 {
        translation_of(&self.transform)
    }
}

/// Decides where new instances go and filters near-duplicate surface placements
#[derive(Debug, Default)]
pub struct PlacementEngine {
    config: PlacementConfig,
    /// Last committed surface position of the current gesture
    last_position: Option<Vec3>,
}

impl PlacementEngine {
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config,
            last_position: None,
        }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PlacementConfig) {
        self.config = config;
    }

    pub fn last_position(&self) -> Option<Vec3> {
        self.last_position
    }

    /// Place `forward_offset` in front of the camera, ignoring surfaces.
    /// No camera frame means no placement.
    pub fn place_in_front(
        &self,
        template: &TemplateObject,
        camera_pose: Option<Mat4>,
    ) -> Option<PlacedInstance> {
        let Some(camera) = camera_pose else {
            tracing::debug!("No camera frame, skipping freeform placement");
            return None;
        };
        let offset = Mat4::from_translation(Vec3::new(0.0, 0.0, -self.config.forward_offset));
        Some(PlacedInstance::clone_of(template, InstanceParent::Root, camera * offset))
    }

    /// Place on the detected surface under `screen_point`, resting on top of it.
    ///
    /// Returns None when nothing is hit or when the candidate is closer than
    /// `distance_threshold` to the previous placement of this gesture.
    pub fn place_on_surface<H: HitTester + ?Sized>(
        &mut self,
        template: &TemplateObject,
        screen_point: Vec2,
        hits: &H,
    ) -> Option<PlacedInstance> {
        let hit = hits.hit_test_surface(screen_point)?;
        let position = translation_of(&hit) + Vec3::Y * self.surface_lift(template);

        if let Some(last) = self.last_position {
            let distance = position.distance(last);
            if distance < self.config.distance_threshold {
                tracing::trace!(distance, "Placement too close to previous one");
                return None;
            }
        }

        self.last_position = Some(position);
        Some(PlacedInstance::clone_of(
            template,
            InstanceParent::Root,
            Mat4::from_translation(position),
        ))
    }

    /// One clone per detected image, attached to the anchor's node
    pub fn place_on_image_anchor(
        &self,
        template: &TemplateObject,
        anchor_id: &AnchorId,
        node: Mat4,
    ) -> PlacedInstance {
        PlacedInstance::clone_of(
            template,
            InstanceParent::Anchor {
                anchor_id: anchor_id.clone(),
            },
            node,
        )
    }

    /// Input gesture finished: the next placement may land anywhere
    pub fn end_gesture(&mut self) {
        self.last_position = None;
    }

    /// Height above the hit point: half the object plus a small gap
    pub fn surface_lift(&self, template: &TemplateObject) -> f32 {
        template.height() as f32 * self.config.unit_scale / 2.0 + self.config.surface_epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn hit_at(position: Vec3) -> impl Fn(Vec2) -> Option<Mat4> {
        move |_| Some(Mat4::from_translation(position))
    }

    #[test]
    fn test_place_in_front_offsets_along_view_axis() {
        let engine = PlacementEngine::default();
        let camera = Mat4::from_translation(Vec3::new(1.0, 1.5, 0.0));
        let placed = engine
            .place_in_front(&fixtures::small_cube(), Some(camera))
            .unwrap();
        assert!((placed.position() - Vec3::new(1.0, 1.5, -0.2)).length() < 1e-6);
        assert_eq!(placed.parent, InstanceParent::Root);
        assert!(placed.visible);
    }

    #[test]
    fn test_place_in_front_follows_camera_rotation() {
        let engine = PlacementEngine::default();
        let camera = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let placed = engine
            .place_in_front(&fixtures::small_cube(), Some(camera))
            .unwrap();
        assert!((placed.position() - Vec3::new(-0.2, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_place_in_front_without_camera_frame() {
        let engine = PlacementEngine::default();
        assert!(engine.place_in_front(&fixtures::small_cube(), None).is_none());
    }

    #[test]
    fn test_surface_placement_is_lifted() {
        let mut engine = PlacementEngine::default();
        let template = fixtures::small_cube(); // 0.1 tall
        let placed = engine
            .place_on_surface(&template, Vec2::ZERO, &hit_at(Vec3::ZERO))
            .unwrap();
        assert!((placed.position().y - 0.06).abs() < 1e-6);
        assert_eq!(engine.last_position(), Some(placed.position()));
    }

    #[test]
    fn test_unit_scale_changes_lift() {
        let mut engine = PlacementEngine::new(PlacementConfig {
            unit_scale: 2.0,
            ..Default::default()
        });
        let placed = engine
            .place_on_surface(&fixtures::small_cube(), Vec2::ZERO, &hit_at(Vec3::ZERO))
            .unwrap();
        assert!((placed.position().y - 0.11).abs() < 1e-6);
    }

    #[test]
    fn test_surface_miss_is_silent() {
        let mut engine = PlacementEngine::default();
        let miss = |_: Vec2| None::<Mat4>;
        assert!(engine
            .place_on_surface(&fixtures::small_cube(), Vec2::ZERO, &miss)
            .is_none());
        assert!(engine.last_position().is_none());
    }

    #[test]
    fn test_distance_filter() {
        let mut engine = PlacementEngine::default();
        let template = fixtures::small_cube();

        assert!(engine.place_on_surface(&template, Vec2::ZERO, &hit_at(Vec3::ZERO)).is_some());
        assert!(engine
            .place_on_surface(&template, Vec2::ZERO, &hit_at(Vec3::new(0.0, 0.0, 0.03)))
            .is_none());
        let third = engine
            .place_on_surface(&template, Vec2::ZERO, &hit_at(Vec3::new(0.0, 0.0, 0.10)))
            .unwrap();
        assert_eq!(engine.last_position(), Some(third.position()));
    }

    #[test]
    fn test_distance_filter_measures_from_last_commit() {
        let mut engine = PlacementEngine::default();
        let template = fixtures::small_cube();

        engine.place_on_surface(&template, Vec2::ZERO, &hit_at(Vec3::ZERO));
        // Rejected candidates do not move the reference point
        engine.place_on_surface(&template, Vec2::ZERO, &hit_at(Vec3::new(0.04, 0.0, 0.0)));
        assert!(engine
            .place_on_surface(&template, Vec2::ZERO, &hit_at(Vec3::new(0.045, 0.0, 0.0)))
            .is_none());
        assert!(engine
            .place_on_surface(&template, Vec2::ZERO, &hit_at(Vec3::new(0.06, 0.0, 0.0)))
            .is_some());
    }

    #[test]
    fn test_end_gesture_clears_filter() {
        let mut engine = PlacementEngine::default();
        let template = fixtures::small_cube();

        engine.place_on_surface(&template, Vec2::ZERO, &hit_at(Vec3::ZERO));
        engine.end_gesture();
        assert!(engine.last_position().is_none());
        assert!(engine
            .place_on_surface(&template, Vec2::ZERO, &hit_at(Vec3::new(0.0, 0.0, 0.01)))
            .is_some());
    }

    #[test]
    fn test_image_anchor_placement_is_child_of_anchor() {
        let engine = PlacementEngine::default();
        let node = Mat4::from_translation(Vec3::new(0.0, 0.0, -1.0));
        let placed = engine.place_on_image_anchor(&fixtures::small_cube(), &"img-1".to_string(), node);
        assert_eq!(
            placed.parent,
            InstanceParent::Anchor {
                anchor_id: "img-1".into()
            }
        );
        assert_eq!(placed.transform, node);
    }

    #[test]
    fn test_every_placement_is_a_fresh_clone() {
        let engine = PlacementEngine::default();
        let template = fixtures::small_cube();
        let a = engine.place_in_front(&template, Some(Mat4::IDENTITY)).unwrap();
        let b = engine.place_in_front(&template, Some(Mat4::IDENTITY)).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.template, b.template);
    }
}
