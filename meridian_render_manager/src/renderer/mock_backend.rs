/// Mock backend for unit tests (no GPU required)
///
/// Records every submission in arrival order so tests can assert on
/// upload/draw sequencing, instance counts, and outline decoration
/// without a real graphics backend.

use glam::Mat4;
use crate::error::Result;
use crate::scene::{MeshArchetype, ObjectId};
use super::backend::{DrawSubmission, RenderBackend};

/// One recorded `draw_object` call.
#[derive(Debug, Clone)]
pub struct RecordedDraw {
    pub id: ObjectId,
    pub archetype: MeshArchetype,
    pub lod_level: u32,
    pub world_matrix: Mat4,
    pub color: glam::Vec4,
    pub outline_thickness: Option<f32>,
}

/// Backend that records submissions instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// (archetype, byte length) per upload, in call order
    pub uploads: Vec<(MeshArchetype, usize)>,
    /// (archetype, instance count) per instanced draw, in call order
    pub instanced_draws: Vec<(MeshArchetype, u32)>,
    /// Individual draws, in call order
    pub object_draws: Vec<RecordedDraw>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total instances across all recorded instanced draws.
    pub fn instanced_total(&self) -> u32 {
        self.instanced_draws.iter().map(|(_, n)| n).sum()
    }
}

impl RenderBackend for RecordingBackend {
    fn upload_instances(&mut self, archetype: MeshArchetype, data: &[u8]) -> Result<()> {
        self.uploads.push((archetype, data.len()));
        Ok(())
    }

    fn draw_instanced(&mut self, archetype: MeshArchetype, instance_count: u32) -> Result<()> {
        self.instanced_draws.push((archetype, instance_count));
        Ok(())
    }

    fn draw_object(&mut self, submission: &DrawSubmission<'_>) -> Result<()> {
        self.object_draws.push(RecordedDraw {
            id: submission.id,
            archetype: submission.archetype,
            lod_level: submission.lod_level,
            world_matrix: submission.world_matrix,
            color: submission.material.color,
            outline_thickness: submission.outline.map(|o| o.thickness),
        });
        Ok(())
    }
}
