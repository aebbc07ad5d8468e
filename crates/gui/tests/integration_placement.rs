//! Integration tests for placement rules and history properties.
//!
//! Exercises the public session building blocks directly, without a harness.

use ardraw_lib::anchor::{FeedConfiguration, IMAGE_GROUP};
use ardraw_lib::fixtures;
use ardraw_lib::state::session::{Affordances, PlacementConfig, PlacementEngine, PlacementHistory};
use glam::{Mat4, Vec2, Vec3};
use shared::{InstanceParent, PlacementMode};

/// Hit tester that lands every screen point on the floor at (x / 1000, 0, y / 1000)
fn flat_floor(point: Vec2) -> Option<Mat4> {
    Some(Mat4::from_translation(Vec3::new(point.x / 1000.0, 0.0, point.y / 1000.0)))
}

fn no_surface(_: Vec2) -> Option<Mat4> {
    None
}

#[test]
fn test_commits_keep_insertion_order() {
    for n in [0usize, 1, 5, 17] {
        let mut history = PlacementHistory::new();
        let ids: Vec<String> = (0..n)
            .map(|i| {
                let instance = fixtures::instance_at(i as f32, 0.0, 0.0);
                let id = instance.id.clone();
                history.commit(instance);
                id
            })
            .collect();

        assert_eq!(history.len(), n);
        let stored: Vec<String> = history.entries().iter().map(|i| i.id.clone()).collect();
        assert_eq!(stored, ids);
        let indices: Vec<u64> = history.entries().iter().map(|i| i.index).collect();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_commit_always_clears_redo() {
    for undos in 0..4 {
        let mut history = PlacementHistory::new();
        for _ in 0..3 {
            history.commit(fixtures::instance_at(0.0, 0.0, 0.0));
        }
        for _ in 0..undos {
            history.undo();
        }
        let signals = history.commit(fixtures::instance_at(1.0, 0.0, 0.0));
        assert!(!signals.can_redo);
        assert!(!history.has_redoable());
        assert!(history.redo_stack().is_empty());
    }
}

#[test]
fn test_undo_redo_noop_at_boundaries() {
    let mut history = PlacementHistory::new();
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
    assert_eq!(history.affordances(), Affordances::default());

    history.commit(fixtures::instance_at(0.0, 0.0, 0.0));
    assert!(history.redo().is_none());
    assert!(history.undo().is_some());
    assert!(history.undo().is_none());
    assert_eq!(history.len(), 1);
}

#[test]
fn test_undo_then_redo_restores_visibility() {
    let mut history = PlacementHistory::new();
    for i in 0..4 {
        history.commit(fixtures::instance_at(i as f32, 0.0, 0.0));
    }
    let before: Vec<bool> = history.entries().iter().map(|i| i.visible).collect();

    for k in 1..=4 {
        for _ in 0..k {
            history.undo();
        }
        for _ in 0..k {
            history.redo();
        }
        let after: Vec<bool> = history.entries().iter().map(|i| i.visible).collect();
        assert_eq!(after, before);
    }
}

#[test]
fn test_visible_entries_form_prefix() {
    let mut history = PlacementHistory::new();
    for i in 0..5 {
        history.commit(fixtures::instance_at(i as f32, 0.0, 0.0));
    }
    for step in [true, true, false, true, true, false, false] {
        if step {
            history.undo();
        } else {
            history.redo();
        }
        let visible: Vec<bool> = history.entries().iter().map(|i| i.visible).collect();
        let split = visible.iter().take_while(|v| **v).count();
        assert!(visible[split..].iter().all(|v| !v), "{visible:?}");
    }
}

#[test]
fn test_distance_filter_boundary() {
    let template = fixtures::small_cube();
    let mut engine = PlacementEngine::new(PlacementConfig::default());

    assert!(engine.place_on_surface(&template, Vec2::new(0.0, 0.0), &flat_floor).is_some());
    // 4.9 cm from the last accepted point
    assert!(engine.place_on_surface(&template, Vec2::new(49.0, 0.0), &flat_floor).is_none());
    // 6 cm
    assert!(engine.place_on_surface(&template, Vec2::new(60.0, 0.0), &flat_floor).is_some());

    engine.end_gesture();
    assert!(engine.last_position().is_none());
    assert!(engine.place_on_surface(&template, Vec2::new(60.0, 0.0), &flat_floor).is_some());
}

#[test]
fn test_surface_miss_keeps_gesture_state() {
    let template = fixtures::small_cube();
    let mut engine = PlacementEngine::new(PlacementConfig::default());
    engine.place_on_surface(&template, Vec2::new(0.0, 0.0), &flat_floor);
    let last = engine.last_position();

    assert!(engine.place_on_surface(&template, Vec2::new(0.0, 0.0), &no_surface).is_none());
    assert_eq!(engine.last_position(), last);
}

#[test]
fn test_unit_scale_changes_lift() {
    let template = fixtures::small_cube();
    let config = PlacementConfig {
        unit_scale: 0.5,
        ..PlacementConfig::default()
    };
    let mut engine = PlacementEngine::new(config);

    let instance = engine
        .place_on_surface(&template, Vec2::new(100.0, 200.0), &flat_floor)
        .unwrap();
    assert!((instance.position() - Vec3::new(0.1, 0.035, 0.2)).length() < 1e-5);
    assert_eq!(instance.parent, InstanceParent::Root);
}

#[test]
fn test_image_placement_uses_node_transform() {
    let engine = PlacementEngine::new(PlacementConfig::default());
    let node = Mat4::from_rotation_translation(
        glam::Quat::from_rotation_y(0.4),
        Vec3::new(0.2, 0.8, -1.0),
    );

    let instance = engine.place_on_image_anchor(&fixtures::small_cube(), &"poster".to_string(), node);
    assert_eq!(instance.transform, node);
    assert_eq!(
        instance.parent,
        InstanceParent::Anchor {
            anchor_id: "poster".to_string()
        }
    );
}

#[test]
fn test_feed_configuration_per_mode() {
    for mode in PlacementMode::all() {
        let config = FeedConfiguration::for_mode(*mode);
        assert!(config.detect_planes);
        let images = *mode == PlacementMode::ImageAnchored;
        assert_eq!(config.detect_images, images);
        assert_eq!(config.image_group.as_deref(), images.then_some(IMAGE_GROUP));
    }
}
