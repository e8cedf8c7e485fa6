use glam::{Mat4, Quat, Vec3, Vec4};
use crate::camera::{Camera, Frustum};
use crate::scene::{MeshArchetype, ObjectId, RenderableObject};
use super::*;

/// Camera at the origin looking down -Z, deep far plane.
fn test_camera() -> Camera {
    let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 1000.0);
    Camera::new(view, projection, Vec3::ZERO)
}

fn test_frustum(camera: &Camera) -> Frustum {
    Frustum::from_view_projection(&camera.view_projection_matrix())
}

fn object_at(id: u64, position: Vec3) -> RenderableObject {
    RenderableObject {
        id: ObjectId(id),
        archetype: MeshArchetype::Box,
        position,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
        color: Vec4::ONE,
        visible: true,
        importance: 0.3,
        bounding_radius: 0.5,
    }
}

// ============================================================================
// LOD tier mapping
// ============================================================================

#[test]
fn test_lod_tiers_by_distance() {
    let config = EvaluatorConfig::default();

    assert_eq!(config.lod_level_for(0.0, 1.0), 0);
    assert_eq!(config.lod_level_for(5.0, 1.0), 0);
    assert_eq!(config.lod_level_for(10.0, 1.0), 1);
    assert_eq!(config.lod_level_for(15.0, 1.0), 1);
    assert_eq!(config.lod_level_for(30.0, 1.0), 2);
    assert_eq!(config.lod_level_for(60.0, 1.0), 3);
    assert_eq!(config.lod_level_for(500.0, 1.0), 3);
}

#[test]
fn test_lod_thresholds_scale_with_quality() {
    let config = EvaluatorConfig::default();

    // At half scale the tier-1 boundary moves from 10 to 5
    assert_eq!(config.lod_level_for(7.0, 1.0), 0);
    assert_eq!(config.lod_level_for(7.0, 0.5), 1);
}

// ============================================================================
// Visibility and render distance
// ============================================================================

#[test]
fn test_object_in_front_is_visible_and_rendered() {
    let camera = test_camera();
    let frustum = test_frustum(&camera);
    let mut evaluator = Evaluator::new(EvaluatorConfig::default());

    evaluator.begin_frame();
    let result = evaluator.evaluate(
        &object_at(1, Vec3::new(0.0, 0.0, -20.0)),
        &camera,
        &frustum,
        1.0,
    );

    assert!(result.is_visible);
    assert!(result.should_render);
    assert_eq!(result.lod_level, 1);
}

#[test]
fn test_object_behind_camera_is_not_visible() {
    let camera = test_camera();
    let frustum = test_frustum(&camera);
    let mut evaluator = Evaluator::new(EvaluatorConfig::default());

    evaluator.begin_frame();
    let result = evaluator.evaluate(
        &object_at(1, Vec3::new(0.0, 0.0, 20.0)),
        &camera,
        &frustum,
        1.0,
    );

    assert!(!result.is_visible);
    assert!(!result.should_render);
}

#[test]
fn test_visible_but_beyond_render_distance() {
    let camera = test_camera();
    let frustum = test_frustum(&camera);
    let mut evaluator = Evaluator::new(EvaluatorConfig::default());

    // Inside the (deep) frustum but past max_render_distance = 100
    evaluator.begin_frame();
    let result = evaluator.evaluate(
        &object_at(1, Vec3::new(0.0, 0.0, -150.0)),
        &camera,
        &frustum,
        1.0,
    );

    assert!(result.is_visible);
    assert!(!result.should_render);
}

#[test]
fn test_hero_importance_extends_render_distance() {
    let camera = test_camera();
    let frustum = test_frustum(&camera);
    let mut evaluator = Evaluator::new(EvaluatorConfig::default());

    let mut hero = object_at(1, Vec3::new(0.0, 0.0, -150.0));
    hero.importance = 0.9;

    // 150 > 100 but <= 100 * 2.0
    evaluator.begin_frame();
    let result = evaluator.evaluate(&hero, &camera, &frustum, 1.0);

    assert!(result.should_render);
}

#[test]
fn test_non_finite_camera_rejects_object() {
    let mut camera = test_camera();
    let frustum = test_frustum(&camera);
    camera.set_position(Vec3::new(f32::NAN, 0.0, 0.0));

    let mut evaluator = Evaluator::new(EvaluatorConfig::default());
    evaluator.begin_frame();
    let result = evaluator.evaluate(
        &object_at(1, Vec3::new(0.0, 0.0, -20.0)),
        &camera,
        &frustum,
        1.0,
    );

    assert!(!result.is_visible);
    assert!(!result.should_render);
}

#[test]
fn test_non_finite_object_position_rejects_object() {
    let camera = test_camera();
    let frustum = test_frustum(&camera);

    let mut evaluator = Evaluator::new(EvaluatorConfig::default());
    evaluator.begin_frame();
    let result = evaluator.evaluate(
        &object_at(1, Vec3::new(f32::INFINITY, 0.0, -20.0)),
        &camera,
        &frustum,
        1.0,
    );

    assert!(!result.should_render);
}

// ============================================================================
// Staggered refresh
// ============================================================================

#[test]
fn test_result_is_stable_within_update_window() {
    let camera = test_camera();
    let frustum = test_frustum(&camera);
    let mut evaluator = Evaluator::new(EvaluatorConfig::default());

    // Id 0 → refresh phase 0: next fresh evaluation is 6 frames after
    // first sighting
    let mut object = object_at(0, Vec3::new(0.0, 0.0, -20.0));

    evaluator.begin_frame();
    let first = evaluator.evaluate(&object, &camera, &frustum, 1.0);
    assert!(first.should_render);

    // Teleport the object behind the camera; the cached result must
    // survive until the window elapses
    object.position = Vec3::new(0.0, 0.0, 50.0);

    for _ in 0..5 {
        evaluator.begin_frame();
        let stale = evaluator.evaluate(&object, &camera, &frustum, 1.0);
        assert_eq!(stale, first, "result must stay cached inside the window");
    }

    // Sixth frame after sighting: counter hits the refresh phase
    evaluator.begin_frame();
    let fresh = evaluator.evaluate(&object, &camera, &frustum, 1.0);
    assert!(!fresh.is_visible);
    assert!(!fresh.should_render);
}

#[test]
fn test_repeated_evaluation_is_idempotent_for_unchanged_input() {
    let camera = test_camera();
    let frustum = test_frustum(&camera);
    let mut evaluator = Evaluator::new(EvaluatorConfig::default());
    let object = object_at(42, Vec3::new(3.0, 1.0, -30.0));

    evaluator.begin_frame();
    let first = evaluator.evaluate(&object, &camera, &frustum, 1.0);

    // Unchanged camera and object: identical result across many
    // frames, whether served from cache or re-evaluated
    for _ in 0..20 {
        evaluator.begin_frame();
        assert_eq!(evaluator.evaluate(&object, &camera, &frustum, 1.0), first);
    }
}

// ============================================================================
// Arena pruning
// ============================================================================

#[test]
fn test_prune_drops_unseen_objects() {
    let camera = test_camera();
    let frustum = test_frustum(&camera);
    let mut evaluator = Evaluator::new(EvaluatorConfig::default());

    let a = object_at(1, Vec3::new(0.0, 0.0, -20.0));
    let b = object_at(2, Vec3::new(5.0, 0.0, -20.0));

    evaluator.begin_frame();
    evaluator.evaluate(&a, &camera, &frustum, 1.0);
    evaluator.evaluate(&b, &camera, &frustum, 1.0);
    evaluator.prune();
    assert_eq!(evaluator.cached_count(), 2);

    // Object b deleted by the editor
    evaluator.begin_frame();
    evaluator.evaluate(&a, &camera, &frustum, 1.0);
    evaluator.prune();
    assert_eq!(evaluator.cached_count(), 1);
}
