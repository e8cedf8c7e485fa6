/*!
# Meridian Render Manager

Rendering performance manager for the Meridian editor.

Every frame, this crate decides which of the scene's objects are worth
drawing, at what detail, and through which rendering path — an
individual draw call, a GPU-instanced batch, or nothing at all — and
continuously re-tunes those decisions against measured frame time.

## Architecture

- **Evaluator**: per-object frustum visibility and distance-based LOD,
  recomputed on a staggered schedule
- **StrategyAllocator**: importance-first partition of the working set
  into individual / instanced / culled groups under a frame budget
- **InstanceBatcher**: per-archetype instance buffers populated from the
  instanced groups
- **QualityController**: closed-loop quality multiplier driven by the
  rolling frame-time window
- **HighlightOverlay**: selection/hover outline decoration for
  individually drawn objects
- **RenderManager**: the per-frame orchestrator wiring the above to an
  external `RenderBackend`

The scene store, camera, and graphics backend are external
collaborators; this crate reads object and camera state and issues draw
submissions, nothing more.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod scene;
pub mod pipeline;
pub mod renderer;

// Main meridian namespace module
pub mod meridian {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (process-wide services: the logger)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: render_* macros are NOT re-exported here - they are internal only
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene object model sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Pipeline sub-module with all partitioning/quality types
    pub mod pipeline {
        pub use crate::pipeline::*;
    }

    // Backend sub-module
    pub mod render {
        pub use crate::renderer::*;
    }
}

// Re-export math library at crate root
pub use glam;
