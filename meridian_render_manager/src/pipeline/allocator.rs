/// Render strategy allocation.
///
/// Once per frame, partitions the full working set into three disjoint
/// groups — individually rendered, instanced-batched per archetype, and
/// culled — prioritized by importance under a frame render budget.
/// Membership is never persisted: the partition is recomputed from
/// current importance and budget every frame, so objects move freely
/// between groups without transition logic.

use std::cmp::Ordering;
use rustc_hash::FxHashMap;
use crate::scene::{MeshArchetype, ObjectId, ARCHETYPE_COUNT};

// ===== CANDIDATE =====

/// One object's allocation inputs, assembled by the RenderManager from
/// the scene slice and the evaluator's cached results.
#[derive(Debug, Clone, Copy)]
pub struct RenderCandidate {
    /// Object id
    pub id: ObjectId,
    /// Mesh archetype (instancing compatibility group)
    pub archetype: MeshArchetype,
    /// Caller-assigned priority in [0,1]
    pub importance: f32,
    /// Author-visible AND frustum-visible AND within render distance.
    /// The author flag is folded in fresh each frame so an editor
    /// visibility toggle is never delayed by the evaluator's stagger
    /// window.
    pub should_render: bool,
    /// Detail tier from the evaluator, carried through to the draw path
    pub lod_level: u32,
}

// ===== PARTITION =====

/// Result of one frame's allocation: three disjoint id groups.
#[derive(Debug, Clone, Default)]
pub struct RenderingPartition {
    /// Ids rendered with their own draw call (importance order)
    pub individual: Vec<ObjectId>,
    /// Ids rendered via a shared per-archetype batch
    pub instanced: FxHashMap<MeshArchetype, Vec<ObjectId>>,
    /// Ids skipped entirely this frame
    pub culled: Vec<ObjectId>,
    /// Objects admitted past the budget ceiling by the importance
    /// override
    pub budget_overrides: u32,
}

impl RenderingPartition {
    /// Total ids across all instanced groups.
    pub fn instanced_count(&self) -> usize {
        self.instanced.values().map(Vec::len).sum()
    }

    /// Total ids selected for rendering (individual + instanced).
    pub fn rendered_count(&self) -> usize {
        self.individual.len() + self.instanced_count()
    }
}

// ===== ALLOCATOR =====

/// Importance-first greedy allocator.
///
/// Stateless between frames (`&self` partitioning) — all frame inputs
/// arrive as arguments, which keeps the unit independently testable
/// from the highlight overlay and the quality loop.
pub struct StrategyAllocator {
    /// Importance above which an object is exempt from the budget
    /// ceiling (it may exceed the budget but never lands in `culled`)
    importance_override: f32,
}

impl StrategyAllocator {
    pub fn new() -> Self {
        Self {
            importance_override: 0.8,
        }
    }

    /// Partition the working set under `budget`.
    ///
    /// `highlighted` is the editor's selection/hover predicate:
    /// highlighted objects are excluded from instance-eligibility (the
    /// outline pass needs a per-object draw) and from the archetype
    /// population counts.
    ///
    /// Deterministic: stable sort by importance descending, ties broken
    /// by insertion order, so a fixed input produces the same three
    /// sets on every call.
    pub fn partition<F>(
        &self,
        candidates: &[RenderCandidate],
        budget: usize,
        instance_threshold: usize,
        highlighted: F,
    ) -> RenderingPartition
    where
        F: Fn(ObjectId) -> bool,
    {
        // Archetype population among renderable, non-highlighted
        // objects: instancing a rare mesh type costs more per-batch
        // overhead than it saves
        let mut population = [0usize; ARCHETYPE_COUNT];
        for candidate in candidates {
            if candidate.should_render && !highlighted(candidate.id) {
                population[candidate.archetype.index()] += 1;
            }
        }

        // Stable importance order (ties keep insertion order)
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| {
            candidates[b]
                .importance
                .partial_cmp(&candidates[a].importance)
                .unwrap_or(Ordering::Equal)
        });

        let mut partition = RenderingPartition::default();
        let mut used = 0usize;

        for &i in &order {
            let candidate = &candidates[i];

            if !candidate.should_render {
                partition.culled.push(candidate.id);
                continue;
            }

            let is_highlighted = highlighted(candidate.id);

            if used < budget {
                let instance_eligible = !is_highlighted
                    && population[candidate.archetype.index()] > instance_threshold;
                if instance_eligible {
                    partition
                        .instanced
                        .entry(candidate.archetype)
                        .or_default()
                        .push(candidate.id);
                } else {
                    partition.individual.push(candidate.id);
                }
                used += 1;
            } else if candidate.importance > self.importance_override {
                // The budget never silently drops what the user is
                // focused on
                partition.individual.push(candidate.id);
                partition.budget_overrides += 1;
            } else {
                partition.culled.push(candidate.id);
            }
        }

        partition
    }
}

impl Default for StrategyAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "allocator_tests.rs"]
mod tests;
