/// Per-frame render pipeline orchestrator.
///
/// Wires the evaluator, allocator, batcher, quality controller, and
/// highlight overlay into the strict per-frame sequence: quality
/// snapshot → evaluate → partition → batch-write → draw → timing
/// feedback → telemetry. A frame always draws a consistent snapshot —
/// no partial partition is ever submitted.

use rustc_hash::FxHashMap;
use crate::camera::{Camera, Frustum};
use crate::error::Result;
use crate::{render_info, render_warn};
use crate::renderer::{DrawSubmission, RenderBackend};
use crate::scene::{MeshArchetype, ObjectId, RenderableObject, SelectionState};
use super::allocator::{RenderCandidate, RenderingPartition, StrategyAllocator};
use super::evaluator::{Evaluator, EvaluatorConfig};
use super::highlight::HighlightOverlay;
use super::instancing::InstanceBatcher;
use super::metrics::{MetricsSink, MetricsSnapshot};
use super::quality::{QualityConfig, QualityController};

// ===== CONFIG =====

/// Tuning constants for the whole pipeline, supplied at construction.
#[derive(Debug, Clone)]
pub struct RenderManagerConfig {
    /// Render budget at quality 1.0 (banded down as quality degrades)
    pub base_render_budget: usize,
    /// Instance-buffer capacity per archetype at quality 1.0
    pub max_instances_per_archetype: usize,
    /// Instance-count threshold at quality 1.0
    pub instance_count_threshold: usize,
    /// Publish a metrics snapshot every N frames
    pub metrics_interval: u32,
    /// Evaluator tuning (LOD table, stagger frequency, hero cutoff)
    pub evaluator: EvaluatorConfig,
    /// Quality loop tuning (target FPS, steps, cooldown)
    pub quality: QualityConfig,
}

impl Default for RenderManagerConfig {
    fn default() -> Self {
        Self {
            base_render_budget: 8000,
            max_instances_per_archetype: 4096,
            instance_count_threshold: 10,
            metrics_interval: 30,
            evaluator: EvaluatorConfig::default(),
            quality: QualityConfig::default(),
        }
    }
}

// ===== MANAGER =====

/// The rendering performance manager.
///
/// Owned by the editor's frame loop; `render_frame` is called once per
/// frame on the thread that owns the graphics context. All inputs are
/// read-only — this subsystem never writes back transforms, visibility,
/// or selection state.
pub struct RenderManager {
    config: RenderManagerConfig,
    evaluator: Evaluator,
    allocator: StrategyAllocator,
    batcher: InstanceBatcher,
    quality: QualityController,
    overlay: HighlightOverlay,
    metrics_sink: Option<Box<dyn MetricsSink>>,
    frame_count: u64,
    /// Quality version the batcher capacities were last derived from
    applied_quality_version: u64,
    last_metrics: MetricsSnapshot,
}

impl RenderManager {
    /// Create a manager with the given tuning constants.
    pub fn new(config: RenderManagerConfig) -> Self {
        let quality = QualityController::new(
            config.quality.clone(),
            config.base_render_budget,
            config.instance_count_threshold,
        );
        let batcher = InstanceBatcher::new(config.max_instances_per_archetype);
        let evaluator = Evaluator::new(config.evaluator.clone());
        render_info!(
            "meridian::RenderManager",
            "Render manager ready (budget {}, target {} FPS)",
            config.base_render_budget,
            config.quality.target_fps
        );
        Self {
            config,
            evaluator,
            allocator: StrategyAllocator::new(),
            batcher,
            quality,
            overlay: HighlightOverlay::new(),
            metrics_sink: None,
            frame_count: 0,
            applied_quality_version: 0,
            last_metrics: MetricsSnapshot::default(),
        }
    }

    /// Register the telemetry consumer (replaces any previous sink).
    pub fn set_metrics_sink<S: MetricsSink + 'static>(&mut self, sink: S) {
        self.metrics_sink = Some(Box::new(sink));
    }

    /// Run one full pipeline pass and issue all draw submissions.
    ///
    /// `objects` is the scene store's current working set, `camera` the
    /// editor viewport state, `selection` the current selection/hover
    /// marks, `delta_seconds` the previous frame's wall time.
    pub fn render_frame(
        &mut self,
        objects: &[RenderableObject],
        camera: &Camera,
        selection: &SelectionState,
        delta_seconds: f32,
        backend: &mut dyn RenderBackend,
    ) -> Result<()> {
        // Quality knobs are read once here; nothing re-reads them
        // mid-frame
        let snapshot = self.quality.snapshot();
        if snapshot.version != self.applied_quality_version {
            self.batcher.apply_quality(snapshot.quality_multiplier);
            self.applied_quality_version = snapshot.version;
        }

        // Working-set index; duplicate ids are a caller contract
        // violation: warn, later occurrence wins
        let mut working: FxHashMap<ObjectId, usize> = FxHashMap::default();
        working.reserve(objects.len());
        for (i, object) in objects.iter().enumerate() {
            if working.insert(object.id, i).is_some() {
                render_warn!(
                    "meridian::RenderManager",
                    "Duplicate object id {} in frame working set; later occurrence wins",
                    object.id
                );
            }
        }

        let frustum = Frustum::from_view_projection(&camera.view_projection_matrix());

        // Evaluation pass (staggered per object)
        self.evaluator.begin_frame();
        let mut candidates: Vec<RenderCandidate> = Vec::with_capacity(working.len());
        let mut lod_levels: FxHashMap<ObjectId, u32> = FxHashMap::default();
        lod_levels.reserve(working.len());
        for (i, object) in objects.iter().enumerate() {
            if working[&object.id] != i {
                continue; // overwritten duplicate
            }
            let cull =
                self.evaluator
                    .evaluate(object, camera, &frustum, snapshot.lod_distance_scale);
            lod_levels.insert(object.id, cull.lod_level);
            candidates.push(RenderCandidate {
                id: object.id,
                archetype: object.archetype,
                importance: object.importance,
                // The author flag is folded in fresh: a visibility
                // toggle must not wait out the stagger window
                should_render: object.visible && cull.should_render,
                lod_level: cull.lod_level,
            });
        }

        // Global partition decision
        let partition = self.allocator.partition(
            &candidates,
            snapshot.render_budget,
            snapshot.instance_count_threshold,
            |id| selection.is_highlighted(id),
        );

        // Batch write + instanced submissions, stable archetype order
        self.batcher.begin_frame();
        let mut batch_refs: Vec<&RenderableObject> = Vec::new();
        for archetype in MeshArchetype::ALL {
            let Some(ids) = partition.instanced.get(&archetype) else {
                continue;
            };
            batch_refs.clear();
            batch_refs.extend(
                ids.iter()
                    .filter_map(|id| working.get(id).map(|&i| &objects[i])),
            );
            self.batcher.write(archetype, &batch_refs);
        }
        let instanced_drawn = self.batcher.submit(backend)?;

        // Individual submissions with highlight decoration
        for &id in &partition.individual {
            let Some(&i) = working.get(&id) else { continue };
            let object = &objects[i];
            let flags = selection.flags(id);
            let (material, outline) = self.overlay.decorate(object.color, flags);
            backend.draw_object(&DrawSubmission {
                id,
                archetype: object.archetype,
                lod_level: lod_levels.get(&id).copied().unwrap_or(0),
                world_matrix: object.world_matrix(),
                material: &material,
                outline: outline.as_ref(),
            })?;
        }

        // Frame bookkeeping: prune deleted objects, close the quality
        // loop, publish telemetry
        self.evaluator.prune();
        self.quality.record_frame(delta_seconds);
        self.frame_count += 1;

        self.last_metrics = self.build_metrics(&partition, working.len() as u32, instanced_drawn);
        if self.config.metrics_interval > 0 && self.frame_count % self.config.metrics_interval as u64 == 0
        {
            if let Some(sink) = &self.metrics_sink {
                sink.publish(&self.last_metrics);
            }
        }

        Ok(())
    }

    /// The most recent frame's telemetry.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.last_metrics
    }

    /// The quality controller (read-only).
    pub fn quality(&self) -> &QualityController {
        &self.quality
    }

    /// Frames rendered since construction.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Tuning constants in effect.
    pub fn config(&self) -> &RenderManagerConfig {
        &self.config
    }

    fn build_metrics(
        &self,
        partition: &RenderingPartition,
        total_objects: u32,
        instanced_drawn: u32,
    ) -> MetricsSnapshot {
        let snapshot = self.quality.snapshot();
        MetricsSnapshot {
            total_objects,
            rendered_objects: partition.individual.len() as u32 + instanced_drawn,
            culled_objects: partition.culled.len() as u32,
            instanced_objects: instanced_drawn,
            dropped_instances: self.batcher.dropped_total(),
            frame_rate: self.quality.average_fps().unwrap_or(0.0),
            quality_multiplier: snapshot.quality_multiplier,
            lod_distance: self.config.evaluator.max_render_distance * snapshot.lod_distance_scale,
            instance_threshold: snapshot.instance_count_threshold as u32,
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
