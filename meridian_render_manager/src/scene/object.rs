/// Renderable object input types.
///
/// The external scene store owns canonical object state; each frame it
/// hands the render manager a flat slice of `RenderableObject` records.
/// This subsystem never writes back transforms, visibility, or
/// selection state.

use bitflags::bitflags;
use glam::{Mat4, Quat, Vec3, Vec4};
use rustc_hash::FxHashMap;

// ===== OBJECT ID =====

/// Stable integer identifier for a scene object.
///
/// The scene store guarantees uniqueness within one frame's working
/// set; a duplicate is a caller contract violation handled by the
/// manager (warn + later-wins), never a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== MESH ARCHETYPE =====

/// Number of mesh archetypes (size of per-archetype tables).
pub const ARCHETYPE_COUNT: usize = 5;

/// Closed set of mesh kinds the editor's primitive library produces.
///
/// The archetype determines which instance buffer an object can join:
/// objects sharing an archetype share geometry and can be drawn in one
/// instanced submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshArchetype {
    /// Unit cube (walls, floors, generated rooms)
    Box,
    /// Unit sphere
    Sphere,
    /// Unit cone
    Cone,
    /// Unit cylinder (pillars, props)
    Cylinder,
    /// Unit plane (decals, ground tiles)
    Plane,
}

impl MeshArchetype {
    /// All archetypes, in stable index order.
    pub const ALL: [MeshArchetype; ARCHETYPE_COUNT] = [
        MeshArchetype::Box,
        MeshArchetype::Sphere,
        MeshArchetype::Cone,
        MeshArchetype::Cylinder,
        MeshArchetype::Plane,
    ];

    /// Stable index of this archetype (for dense per-archetype tables).
    pub fn index(self) -> usize {
        match self {
            MeshArchetype::Box => 0,
            MeshArchetype::Sphere => 1,
            MeshArchetype::Cone => 2,
            MeshArchetype::Cylinder => 3,
            MeshArchetype::Plane => 4,
        }
    }
}

impl std::fmt::Display for MeshArchetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MeshArchetype::Box => "box",
            MeshArchetype::Sphere => "sphere",
            MeshArchetype::Cone => "cone",
            MeshArchetype::Cylinder => "cylinder",
            MeshArchetype::Plane => "plane",
        };
        write!(f, "{}", name)
    }
}

// ===== RENDERABLE OBJECT =====

/// One scene object as seen by the render manager. Read-only input.
#[derive(Debug, Clone)]
pub struct RenderableObject {
    /// Stable unique identifier (unique within a frame's working set)
    pub id: ObjectId,
    /// Mesh kind; determines instance-buffer compatibility
    pub archetype: MeshArchetype,
    /// World-space position
    pub position: Vec3,
    /// World-space rotation
    pub rotation: Quat,
    /// Per-axis scale
    pub scale: Vec3,
    /// Base tint (RGBA) when no per-object material override exists
    pub color: Vec4,
    /// Author-set visibility flag (layer/object toggle), independent of
    /// computed culling
    pub visible: bool,
    /// Caller-assigned priority in [0,1]; near 1.0 for selected objects
    /// and important layers, lower for procedural filler. Never mutated
    /// by this subsystem.
    pub importance: f32,
    /// Conservative bounding-sphere radius for culling tests
    pub bounding_radius: f32,
}

impl RenderableObject {
    /// Compose the object-space-to-world matrix from the transform
    /// components.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Whether position and transform components are all finite.
    pub fn is_transform_finite(&self) -> bool {
        self.position.is_finite()
            && self.rotation.is_finite()
            && self.scale.is_finite()
            && self.bounding_radius.is_finite()
    }
}

// ===== HIGHLIGHT FLAGS =====

bitflags! {
    /// Editor highlight state of one object.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct HighlightFlags: u8 {
        /// Object is in the current selection set
        const SELECTED = 1 << 0;
        /// Pointer is hovering the object this frame
        const HOVERED  = 1 << 1;
    }
}

// ===== SELECTION STATE =====

/// Per-frame selection/hover state, owned by the editor and passed in
/// read-only.
///
/// The allocator consumes this through an explicit predicate
/// (highlighted objects are excluded from instancing so the overlay can
/// attach per-object outlines), and the overlay reads the flags when
/// decorating individual draws.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    flags: FxHashMap<ObjectId, HighlightFlags>,
}

impl SelectionState {
    /// Create an empty selection state (nothing selected or hovered).
    pub fn new() -> Self {
        Self {
            flags: FxHashMap::default(),
        }
    }

    /// Mark an object as selected.
    pub fn select(&mut self, id: ObjectId) {
        *self.flags.entry(id).or_default() |= HighlightFlags::SELECTED;
    }

    /// Mark an object as hovered.
    pub fn hover(&mut self, id: ObjectId) {
        *self.flags.entry(id).or_default() |= HighlightFlags::HOVERED;
    }

    /// Remove all selection and hover marks.
    pub fn clear(&mut self) {
        self.flags.clear();
    }

    /// Highlight flags for an object (empty if unmarked).
    pub fn flags(&self, id: ObjectId) -> HighlightFlags {
        self.flags.get(&id).copied().unwrap_or_default()
    }

    /// Whether the object is selected or hovered.
    pub fn is_highlighted(&self, id: ObjectId) -> bool {
        !self.flags(id).is_empty()
    }

    /// Number of marked objects.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
#[path = "object_tests.rs"]
mod tests;
