//! Rendering backend interface.
//!
//! The graphics device, swapchain, and pipelines live outside this
//! subsystem; the manager only issues draw submissions and raw buffer
//! uploads through the `RenderBackend` trait.

mod backend;
#[cfg(test)]
mod mock_backend;

pub use backend::{DrawSubmission, RenderBackend};
#[cfg(test)]
pub use mock_backend::{RecordedDraw, RecordingBackend};
