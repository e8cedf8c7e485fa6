/// Visibility & LOD evaluation.
///
/// Per object, computes camera-relative visibility (frustum test
/// against the bounding sphere) and a discrete level-of-detail tier
/// from distance. Results are cached in an arena and refreshed on a
/// staggered schedule: each object re-evaluates only every
/// `update_frequency` frames, with phases spread across the working set
/// so the cost amortizes without a dedicated scheduler. Object
/// transforms are still read fresh every frame by the draw path — only
/// the visibility/LOD *decision* may be stale, bounded by the update
/// window.

use slotmap::{new_key_type, SlotMap};
use rustc_hash::FxHashMap;
use crate::camera::{Camera, Frustum};
use crate::scene::{ObjectId, RenderableObject};

new_key_type! {
    /// Arena key for one object's cached evaluation state.
    struct EvalKey;
}

// ===== CULL RESULT =====

/// Result of one visibility/LOD evaluation.
///
/// Cached between staggered updates; identical inputs produce an
/// identical result until the object's update window elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CullResult {
    /// Frustum test result for the bounding sphere
    pub is_visible: bool,
    /// Discrete detail tier, 0 = highest detail
    pub lod_level: u32,
    /// Visible AND within the max render distance
    pub should_render: bool,
}

impl CullResult {
    /// Result for objects that must never be drawn (non-finite input).
    fn rejected(lod_level: u32) -> Self {
        Self {
            is_visible: false,
            lod_level,
            should_render: false,
        }
    }
}

// ===== CONFIG =====

/// Tuning constants for the evaluator, supplied at construction.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Ordered LOD tier thresholds in world units; tier i applies from
    /// `lod_thresholds[i]` outward. Index 0 must be 0.0 (full detail).
    /// Thresholds scale with the quality snapshot's lod_distance_scale.
    pub lod_thresholds: Vec<f32>,
    /// Distance beyond which objects are not rendered at all (scaled
    /// like the tier thresholds)
    pub max_render_distance: f32,
    /// Re-evaluate each object every N frames
    pub update_frequency: u32,
    /// Importance above which the render-distance cutoff is extended
    pub hero_importance: f32,
    /// Cutoff multiplier for high-importance objects
    pub hero_distance_factor: f32,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            lod_thresholds: vec![0.0, 10.0, 25.0, 50.0],
            max_render_distance: 100.0,
            update_frequency: 6,
            hero_importance: 0.8,
            hero_distance_factor: 2.0,
        }
    }
}

impl EvaluatorConfig {
    /// Highest-indexed tier whose scaled threshold is <= the distance.
    pub fn lod_level_for(&self, distance: f32, lod_distance_scale: f32) -> u32 {
        let mut level = 0;
        for (i, threshold) in self.lod_thresholds.iter().enumerate() {
            if distance >= threshold * lod_distance_scale {
                level = i as u32;
            }
        }
        level
    }

    /// Coarsest tier index (used for rejected objects).
    fn coarsest_level(&self) -> u32 {
        self.lod_thresholds.len().saturating_sub(1) as u32
    }
}

// ===== EVALUATOR =====

/// Per-object cached state.
struct EvalState {
    result: CullResult,
    /// Incremented once per frame; a fresh evaluation runs when it hits
    /// a multiple of update_frequency. Seeded from the object id so
    /// refresh phases stagger across the working set.
    frame_counter: u32,
    /// Frame stamp of the last sighting, for pruning deleted objects
    last_seen: u64,
}

/// Visibility & LOD evaluator with a staggered-refresh result arena.
///
/// `&mut self` evaluation: the evaluator owns the cache and the frame
/// stamp. One `begin_frame` + N `evaluate` calls + one `prune` per
/// frame, driven by the RenderManager.
pub struct Evaluator {
    config: EvaluatorConfig,
    states: SlotMap<EvalKey, EvalState>,
    index: FxHashMap<ObjectId, EvalKey>,
    frame: u64,
}

impl Evaluator {
    /// Create an evaluator with the given tuning constants.
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            config,
            states: SlotMap::with_key(),
            index: FxHashMap::default(),
            frame: 0,
        }
    }

    /// Advance the frame stamp. Call once at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Evaluate one object against the camera, returning the cached
    /// result unless this object's staggered update window elapsed.
    ///
    /// First sighting always evaluates fresh.
    pub fn evaluate(
        &mut self,
        object: &RenderableObject,
        camera: &Camera,
        frustum: &Frustum,
        lod_distance_scale: f32,
    ) -> CullResult {
        let frequency = self.config.update_frequency.max(1);

        if let Some(&key) = self.index.get(&object.id) {
            let state = &mut self.states[key];
            state.last_seen = self.frame;
            state.frame_counter = state.frame_counter.wrapping_add(1);
            if state.frame_counter % frequency == 0 {
                state.result =
                    Self::evaluate_fresh(&self.config, object, camera, frustum, lod_distance_scale);
            }
            state.result
        } else {
            let result =
                Self::evaluate_fresh(&self.config, object, camera, frustum, lod_distance_scale);
            let key = self.states.insert(EvalState {
                result,
                frame_counter: (object.id.0 % frequency as u64) as u32,
                last_seen: self.frame,
            });
            self.index.insert(object.id, key);
            result
        }
    }

    /// Drop cached state for objects not seen this frame.
    ///
    /// The editor deletes objects continuously; without pruning the
    /// arena would grow with every object that ever existed.
    pub fn prune(&mut self) {
        let frame = self.frame;
        self.states.retain(|_, state| state.last_seen == frame);
        let states = &self.states;
        self.index.retain(|_, key| states.contains_key(*key));
    }

    /// Number of objects with cached state.
    pub fn cached_count(&self) -> usize {
        self.states.len()
    }

    /// Tuning constants in effect.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Stateless single evaluation.
    fn evaluate_fresh(
        config: &EvaluatorConfig,
        object: &RenderableObject,
        camera: &Camera,
        frustum: &Frustum,
        lod_distance_scale: f32,
    ) -> CullResult {
        // Non-finite upstream state must not reach the plane math
        if !camera.is_finite() || !object.is_transform_finite() {
            return CullResult::rejected(config.coarsest_level());
        }

        let is_visible = frustum.intersects_sphere(object.position, object.bounding_radius);

        let distance = camera.position().distance(object.position);
        let lod_level = config.lod_level_for(distance, lod_distance_scale);

        let mut max_distance = config.max_render_distance * lod_distance_scale;
        if object.importance > config.hero_importance {
            // Hero/selected objects stay visible farther out than filler
            max_distance *= config.hero_distance_factor;
        }

        CullResult {
            is_visible,
            lod_level,
            should_render: is_visible && distance <= max_distance,
        }
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
