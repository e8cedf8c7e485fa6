/// Telemetry published to external debug consumers.
///
/// The manager assembles one snapshot per sampling interval and hands
/// it to the registered sink (an on-screen overlay, a profiler bridge).
/// Strictly read-only: there is no inbound control from consumers.

/// One telemetry snapshot of the pipeline's state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsSnapshot {
    /// Objects in this frame's working set
    pub total_objects: u32,
    /// Objects actually drawn (individual + instanced)
    pub rendered_objects: u32,
    /// Objects skipped by visibility, distance, or budget
    pub culled_objects: u32,
    /// Objects drawn through instance batches
    pub instanced_objects: u32,
    /// Instances dropped by batch capacity (distinct from culling)
    pub dropped_instances: u32,
    /// Average FPS over the quality controller's rolling window
    pub frame_rate: f32,
    /// Current global quality multiplier
    pub quality_multiplier: f32,
    /// Effective (quality-scaled) max render distance
    pub lod_distance: f32,
    /// Instance-count threshold in effect
    pub instance_threshold: u32,
}

/// Consumer of metrics snapshots.
///
/// Implement to feed an on-screen stats overlay or external profiler.
///
/// # Example
///
/// ```no_run
/// use meridian_render_manager::meridian::pipeline::{MetricsSink, MetricsSnapshot};
///
/// struct PrintSink;
///
/// impl MetricsSink for PrintSink {
///     fn publish(&self, snapshot: &MetricsSnapshot) {
///         println!("{} / {} drawn", snapshot.rendered_objects, snapshot.total_objects);
///     }
/// }
/// ```
pub trait MetricsSink: Send + Sync {
    /// Receive one snapshot. Called on the render thread; keep it cheap.
    fn publish(&self, snapshot: &MetricsSnapshot);
}
