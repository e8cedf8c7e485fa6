//! Camera module — low-level camera and frustum.
//!
//! Provides passive data containers for the rendering pipeline.
//! The render manager does NOT store or manage cameras — the editor
//! computes view/projection/position each frame and passes them in
//! read-only.

mod camera;
mod frustum;

pub use camera::Camera;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
