/// Rendering backend trait.
///
/// Implemented by the editor's graphics layer. The render manager
/// issues one `draw_object` per individually-rendered object and one
/// `upload_instances` + `draw_instanced` pair per populated batch; it
/// never touches the device or context lifecycle.

use glam::Mat4;
use crate::error::Result;
use crate::pipeline::{MaterialSpec, OutlineSpec};
use crate::scene::{MeshArchetype, ObjectId};

/// One individually-rendered object, fully resolved for submission.
#[derive(Debug)]
pub struct DrawSubmission<'a> {
    /// Object id (for backend-side debug labels)
    pub id: ObjectId,
    /// Mesh to draw
    pub archetype: MeshArchetype,
    /// Detail tier selected by the evaluator (0 = full detail)
    pub lod_level: u32,
    /// Object-space-to-world matrix
    pub world_matrix: Mat4,
    /// Base material state (possibly highlight-tinted)
    pub material: &'a MaterialSpec,
    /// Outline pass for selected/hovered objects
    pub outline: Option<&'a OutlineSpec>,
}

/// Strategy seam to the external graphics layer.
///
/// `&mut self` because backends record into per-frame command state.
/// All calls happen on the thread that owns the graphics context.
pub trait RenderBackend: Send + Sync {
    /// Upload raw per-instance data for an archetype's batch.
    ///
    /// `data` is a Pod byte view of the batch's `InstanceRecord` slots.
    fn upload_instances(&mut self, archetype: MeshArchetype, data: &[u8]) -> Result<()>;

    /// Draw `instance_count` instances of an archetype from its
    /// previously uploaded buffer.
    fn draw_instanced(&mut self, archetype: MeshArchetype, instance_count: u32) -> Result<()>;

    /// Draw one object with its own draw call.
    fn draw_object(&mut self, submission: &DrawSubmission<'_>) -> Result<()>;
}
