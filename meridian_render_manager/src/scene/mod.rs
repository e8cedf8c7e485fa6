//! Scene object model.
//!
//! Read-only input types handed to the render manager each frame by the
//! external scene store, plus the editor-side selection state the
//! allocator and highlight overlay consume.

mod object;

pub use object::{
    ObjectId, MeshArchetype, RenderableObject,
    HighlightFlags, SelectionState,
    ARCHETYPE_COUNT,
};
