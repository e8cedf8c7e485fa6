//! Integration tests for the full per-frame pipeline.
//!
//! These tests drive RenderManager through the public API against a
//! recording backend. No GPU required.
//!
//! Run with: cargo test --test pipeline_integration_tests


use backend_test_utils::{object, test_camera, Recorded, RecordingBackend};
use meridian_render_manager::meridian::pipeline::{RenderManager, RenderManagerConfig};
use meridian_render_manager::meridian::scene::{MeshArchetype, ObjectId, RenderableObject, SelectionState};

const DT: f32 = 1.0 / 60.0;

/// Mixed scene: 30 boxes, 15 spheres, 2 cones.
fn mixed_scene() -> Vec<RenderableObject> {
    let mut objects = Vec::new();
    for i in 0..30 {
        objects.push(object(i, MeshArchetype::Box, (i % 10) as f32));
    }
    for i in 30..45 {
        objects.push(object(i, MeshArchetype::Sphere, ((i - 30) % 10) as f32));
    }
    for i in 45..47 {
        objects.push(object(i, MeshArchetype::Cone, (i - 45) as f32));
    }
    objects
}

// ============================================================================
// FULL FRAME
// ============================================================================

#[test]
fn test_integration_mixed_scene_partition() {
    let mut manager = RenderManager::new(RenderManagerConfig::default());
    let mut backend = RecordingBackend::new();
    let objects = mixed_scene();

    manager
        .render_frame(&objects, &test_camera(), &SelectionState::new(), DT, &mut backend)
        .unwrap();

    // Boxes and spheres clear the default threshold of 10; the two
    // cones do not and draw individually
    assert_eq!(backend.instanced_total(), 45);
    assert_eq!(backend.object_draws().len(), 2);

    let metrics = manager.metrics();
    assert_eq!(metrics.total_objects, 47);
    assert_eq!(metrics.rendered_objects, 47);
    assert_eq!(metrics.instanced_objects, 45);
    assert_eq!(metrics.culled_objects, 0);
    assert_eq!(metrics.dropped_instances, 0);
}

#[test]
fn test_integration_batches_submit_before_individual_draws() {
    let mut manager = RenderManager::new(RenderManagerConfig::default());
    let mut backend = RecordingBackend::new();
    let objects = mixed_scene();

    manager
        .render_frame(&objects, &test_camera(), &SelectionState::new(), DT, &mut backend)
        .unwrap();

    // Within one frame: every instanced submission precedes every
    // individual draw
    let first_object = backend
        .calls
        .iter()
        .position(|c| matches!(c, Recorded::Object(..)))
        .unwrap();
    let last_instanced = backend
        .calls
        .iter()
        .rposition(|c| matches!(c, Recorded::Instanced(..)))
        .unwrap();
    assert!(last_instanced < first_object);
}

#[test]
fn test_integration_selection_composes_with_instancing() {
    let mut manager = RenderManager::new(RenderManagerConfig::default());
    let mut backend = RecordingBackend::new();
    let objects = mixed_scene();

    let mut selection = SelectionState::new();
    selection.select(ObjectId(5)); // one of the 30 boxes
    selection.hover(ObjectId(31)); // one of the 15 spheres

    manager
        .render_frame(&objects, &test_camera(), &selection, DT, &mut backend)
        .unwrap();

    // Both highlighted objects leave their batches for the outline pass
    assert_eq!(backend.instanced_total(), 43);

    let draws = backend.object_draws();
    let selected = draws.iter().find(|(id, _)| *id == ObjectId(5)).unwrap();
    let hovered = draws.iter().find(|(id, _)| *id == ObjectId(31)).unwrap();
    assert_eq!(selected.1, Some(0.02));
    assert_eq!(hovered.1, Some(0.015));

    // The two cones still draw individually, without outlines
    let cone = draws.iter().find(|(id, _)| *id == ObjectId(45)).unwrap();
    assert_eq!(cone.1, None);
}

#[test]
fn test_integration_repeated_frames_are_deterministic() {
    let objects = mixed_scene();
    let mut selection = SelectionState::new();
    selection.select(ObjectId(12));

    let run = || {
        let mut manager = RenderManager::new(RenderManagerConfig::default());
        let mut backend = RecordingBackend::new();
        for _ in 0..3 {
            manager
                .render_frame(&objects, &test_camera(), &selection, DT, &mut backend)
                .unwrap();
        }
        backend.calls
    };

    assert_eq!(run(), run());
}

// ============================================================================
// CAPACITY DEGRADATION
// ============================================================================

#[test]
fn test_integration_capacity_overflow_drops_excess() {
    let config = RenderManagerConfig {
        max_instances_per_archetype: 8,
        ..Default::default()
    };
    let mut manager = RenderManager::new(config);
    let mut backend = RecordingBackend::new();

    let objects: Vec<RenderableObject> = (0..20)
        .map(|i| object(i, MeshArchetype::Box, (i % 10) as f32))
        .collect();

    manager
        .render_frame(&objects, &test_camera(), &SelectionState::new(), DT, &mut backend)
        .unwrap();

    // 20 assigned to the batch, 8 slots available
    assert_eq!(backend.instanced_total(), 8);

    let metrics = manager.metrics();
    assert_eq!(metrics.dropped_instances, 12);
    assert_eq!(metrics.rendered_objects, 8);
    // Capacity drops are reported separately from budget/visibility culls
    assert_eq!(metrics.culled_objects, 0);
}

// ============================================================================
// ADAPTIVE QUALITY LOOP
// ============================================================================

#[test]
fn test_integration_sustained_load_degrades_quality() {
    let mut manager = RenderManager::new(RenderManagerConfig::default());
    let mut backend = RecordingBackend::new();
    let objects = mixed_scene();

    // Sustained 20 FPS against the 60 FPS target
    for _ in 0..31 {
        manager
            .render_frame(&objects, &test_camera(), &SelectionState::new(), 1.0 / 20.0, &mut backend)
            .unwrap();
    }

    let metrics = manager.metrics();
    assert!(metrics.quality_multiplier < 1.0);
    // The LOD distance scale follows the multiplier
    assert!(metrics.lod_distance < 100.0);
}

#[test]
fn test_integration_quality_rescales_batch_capacity() {
    let config = RenderManagerConfig {
        max_instances_per_archetype: 100,
        ..Default::default()
    };
    let mut manager = RenderManager::new(config);
    let mut backend = RecordingBackend::new();
    let objects: Vec<RenderableObject> = (0..100)
        .map(|i| object(i, MeshArchetype::Box, (i % 10) as f32))
        .collect();

    // Degrade to 0.9: capacity re-derives to 90 on the next frame
    for _ in 0..31 {
        manager
            .render_frame(&objects, &test_camera(), &SelectionState::new(), 1.0 / 20.0, &mut backend)
            .unwrap();
    }

    let mut backend = RecordingBackend::new();
    manager
        .render_frame(&objects, &test_camera(), &SelectionState::new(), 1.0 / 20.0, &mut backend)
        .unwrap();

    assert_eq!(backend.instanced_total(), 90);
    assert_eq!(manager.metrics().dropped_instances, 10);
}
