/// Instanced batch management.
///
/// Owns one fixed-capacity instance buffer per registered mesh
/// archetype. Each frame the buffers are repopulated from the
/// allocator's instanced groups (one matrix + one color per object at
/// sequential slots) and flagged dirty for upload. Objects beyond a
/// batch's capacity are dropped from that frame's instanced draw —
/// lossy degradation under extreme load, not an error — and counted so
/// telemetry can distinguish capacity drops from budget culls.

use rustc_hash::FxHashMap;
use glam::{Mat4, Vec4};
use crate::error::Result;
use crate::render_warn;
use crate::renderer::RenderBackend;
use crate::scene::{MeshArchetype, RenderableObject};

// ===== INSTANCE RECORD =====

/// One per-instance GPU record: world matrix + color tint.
///
/// `#[repr(C)]` Pod layout, uploaded verbatim via `bytemuck`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRecord {
    /// Object-space-to-world matrix (column-major)
    pub model: Mat4,
    /// Base tint (RGBA)
    pub color: Vec4,
}

// ===== INSTANCE BATCH =====

/// Per-archetype instance buffer state.
pub struct InstanceBatch {
    archetype: MeshArchetype,
    records: Vec<InstanceRecord>,
    /// Slot capacity for the current quality level
    capacity: usize,
    /// Buffer contents changed since the last upload
    dirty: bool,
    /// Instances dropped this frame because the batch was full
    dropped: u32,
}

impl InstanceBatch {
    fn new(archetype: MeshArchetype, capacity: usize) -> Self {
        Self {
            archetype,
            records: Vec::with_capacity(capacity),
            capacity,
            dirty: false,
            dropped: 0,
        }
    }

    /// Archetype this batch draws.
    pub fn archetype(&self) -> MeshArchetype {
        self.archetype
    }

    /// Live instance count this frame.
    pub fn instance_count(&self) -> u32 {
        self.records.len() as u32
    }

    /// Slot capacity at the current quality level.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer needs re-upload.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Instances dropped this frame due to capacity.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// The populated records (one per written instance).
    pub fn records(&self) -> &[InstanceRecord] {
        &self.records
    }
}

// ===== BATCHER =====

/// Owner of all per-archetype instance batches.
pub struct InstanceBatcher {
    batches: FxHashMap<MeshArchetype, InstanceBatch>,
    /// Capacity ceiling per archetype at quality 1.0
    max_instances_per_archetype: usize,
}

impl InstanceBatcher {
    /// Create a batcher with a batch registered for every archetype.
    pub fn new(max_instances_per_archetype: usize) -> Self {
        Self::with_archetypes(max_instances_per_archetype, &MeshArchetype::ALL)
    }

    /// Create a batcher for a subset of archetypes.
    ///
    /// Writing to an unregistered archetype is a programming error:
    /// fatal in debug builds, a warn-logged no-op in release.
    pub fn with_archetypes(
        max_instances_per_archetype: usize,
        archetypes: &[MeshArchetype],
    ) -> Self {
        let mut batches = FxHashMap::default();
        for &archetype in archetypes {
            batches.insert(
                archetype,
                InstanceBatch::new(archetype, max_instances_per_archetype.max(1)),
            );
        }
        Self {
            batches,
            max_instances_per_archetype,
        }
    }

    /// Re-derive batch capacities from the quality multiplier.
    ///
    /// Called by the manager when the quality snapshot version changes.
    pub fn apply_quality(&mut self, quality_multiplier: f32) {
        let capacity = ((self.max_instances_per_archetype as f32 * quality_multiplier) as usize)
            .clamp(1, self.max_instances_per_archetype);
        for batch in self.batches.values_mut() {
            batch.capacity = capacity;
            if batch.records.len() > capacity {
                batch.records.truncate(capacity);
                batch.dirty = true;
            }
        }
    }

    /// Reset all batches for a new frame.
    pub fn begin_frame(&mut self) {
        for batch in self.batches.values_mut() {
            batch.records.clear();
            batch.dirty = false;
            batch.dropped = 0;
        }
    }

    /// Write one instance record per object into the archetype's batch
    /// at sequential slots. Returns the number written; objects beyond
    /// capacity are counted as dropped and skipped.
    pub fn write(&mut self, archetype: MeshArchetype, objects: &[&RenderableObject]) -> usize {
        let Some(batch) = self.batches.get_mut(&archetype) else {
            debug_assert!(
                false,
                "write to unregistered archetype {} (missing registration)",
                archetype
            );
            render_warn!(
                "meridian::InstanceBatcher",
                "Ignoring write to unregistered archetype {}",
                archetype
            );
            return 0;
        };

        let mut written = 0;
        for object in objects {
            if batch.records.len() >= batch.capacity {
                batch.dropped += (objects.len() - written) as u32;
                break;
            }
            batch.records.push(InstanceRecord {
                model: object.world_matrix(),
                color: object.color,
            });
            written += 1;
        }

        if written > 0 {
            batch.dirty = true;
        }
        written
    }

    /// Upload dirty batches and issue one instanced draw per populated
    /// batch, in stable archetype order. Returns total instances drawn.
    pub fn submit(&mut self, backend: &mut dyn RenderBackend) -> Result<u32> {
        let mut drawn = 0;
        for archetype in MeshArchetype::ALL {
            let Some(batch) = self.batches.get_mut(&archetype) else {
                continue;
            };
            if batch.records.is_empty() {
                continue;
            }
            if batch.dirty {
                backend.upload_instances(archetype, bytemuck::cast_slice(&batch.records))?;
                batch.dirty = false;
            }
            backend.draw_instanced(archetype, batch.records.len() as u32)?;
            drawn += batch.records.len() as u32;
        }
        Ok(drawn)
    }

    /// Batch for an archetype, if registered.
    pub fn batch(&self, archetype: MeshArchetype) -> Option<&InstanceBatch> {
        self.batches.get(&archetype)
    }

    /// Total instances dropped across all batches this frame.
    pub fn dropped_total(&self) -> u32 {
        self.batches.values().map(InstanceBatch::dropped).sum()
    }

    /// Total instances written across all batches this frame.
    pub fn instance_total(&self) -> u32 {
        self.batches.values().map(InstanceBatch::instance_count).sum()
    }
}

#[cfg(test)]
#[path = "instancing_tests.rs"]
mod tests;
