//! Per-frame rendering performance pipeline.
//!
//! Four cooperating units plus the orchestrator, run in strict order
//! inside the frame callback: visibility/LOD evaluation, render
//! strategy allocation, instance batching, and the adaptive quality
//! loop feeding parameters back into the next frame.

mod evaluator;
mod allocator;
mod instancing;
mod quality;
mod highlight;
mod metrics;
mod manager;

pub use evaluator::{CullResult, Evaluator, EvaluatorConfig};
pub use allocator::{RenderCandidate, RenderingPartition, StrategyAllocator};
pub use instancing::{InstanceBatch, InstanceBatcher, InstanceRecord};
pub use quality::{QualityConfig, QualityController, QualitySnapshot};
pub use highlight::{
    HighlightOverlay, MaterialSpec, OutlineSpec,
    SELECTED_OUTLINE_THICKNESS, HOVERED_OUTLINE_THICKNESS,
};
pub use metrics::{MetricsSink, MetricsSnapshot};
pub use manager::{RenderManager, RenderManagerConfig};
