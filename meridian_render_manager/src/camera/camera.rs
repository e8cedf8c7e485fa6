/// Camera — low-level passive data container.
///
/// The Camera computes nothing. The caller (the editor's viewport) is
/// responsible for computing and setting all fields: view matrix,
/// projection matrix, and world-space position.
///
/// The render manager does NOT store or manage cameras. One is passed
/// in read-only at the start of every frame.

use glam::{Mat4, Vec3};

/// Low-level camera. A passive data container — computes nothing.
///
/// The caller is responsible for computing and setting all fields.
/// Typically, the editor computes view/projection from high-level
/// parameters (orbit target, FOV, etc.) and passes the results here.
#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    position: Vec3,
}

impl Camera {
    /// Create a new camera with the given parameters.
    pub fn new(view: Mat4, projection: Mat4, position: Vec3) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            position,
        }
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// World-space camera position (used for distance-based LOD).
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Whether every component of the camera state is finite.
    ///
    /// Upstream tooling occasionally produces NaN/Inf matrices (e.g. a
    /// degenerate orbit target). The evaluator checks this before any
    /// plane math so one bad input cannot corrupt the whole pipeline.
    pub fn is_finite(&self) -> bool {
        self.view_matrix.is_finite()
            && self.projection_matrix.is_finite()
            && self.position.is_finite()
    }

    // ===== SETTERS — store, compute nothing =====

    /// Set the view matrix.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    /// Set the projection matrix.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }

    /// Set the world-space position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
