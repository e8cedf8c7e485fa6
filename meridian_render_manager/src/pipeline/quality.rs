/// Adaptive quality control.
///
/// A closed-loop controller sampling per-frame delta time into a
/// rolling window, comparing average FPS against the target, and
/// stepping a single bounded quality multiplier up or down. A cooldown
/// counter suppresses oscillation: after any adjustment the controller
/// idles for ~3 seconds of frames before re-evaluating.
///
/// The multiplier is the single source of truth for every downstream
/// knob — LOD distance scale, instance capacity, render budget,
/// instance-count threshold — published as a versioned snapshot read
/// once at the start of each frame so no component sees a mid-frame
/// change.

use std::collections::VecDeque;
use crate::render_debug;

// ===== CONFIG =====

/// Tuning constants for the quality loop, supplied at construction.
#[derive(Debug, Clone)]
pub struct QualityConfig {
    /// Target frame rate the controller defends
    pub target_fps: f32,
    /// Quality ceiling (and initial value)
    pub base_quality: f32,
    /// Quality floor
    pub min_quality: f32,
    /// Step when degrading
    pub decrease_step: f32,
    /// Step when recovering (smaller: recover cautiously)
    pub increase_step: f32,
    /// Rolling frame-time window size; no decisions until full
    pub window_size: usize,
    /// Frames to idle after an adjustment (~3 s at 60 FPS)
    pub cooldown_frames: u32,
    /// Degrade when average FPS < target × this
    pub low_fps_ratio: f32,
    /// Recover when average FPS > target × this
    pub high_fps_ratio: f32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            target_fps: 60.0,
            base_quality: 1.0,
            min_quality: 0.2,
            decrease_step: 0.1,
            increase_step: 0.05,
            window_size: 30,
            cooldown_frames: 180,
            low_fps_ratio: 0.8,
            high_fps_ratio: 0.95,
        }
    }
}

// ===== SNAPSHOT =====

/// Immutable per-frame view of the quality state.
///
/// All downstream knobs are derived from the one multiplier here, at
/// snapshot time. The version bumps on every multiplier change so
/// consumers (the batcher's capacities) can re-derive lazily.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualitySnapshot {
    /// Bounded global quality scalar
    pub quality_multiplier: f32,
    /// Scale applied to LOD thresholds and the max render distance
    pub lod_distance_scale: f32,
    /// Minimum archetype population for instancing this frame
    pub instance_count_threshold: usize,
    /// Object budget for this frame's partition
    pub render_budget: usize,
    /// Bumped on every multiplier change
    pub version: u64,
}

// ===== CONTROLLER =====

/// Closed-loop quality controller.
///
/// Behaviorally a three-state machine (Stable / Reducing / Increasing)
/// driven by the sampling loop rather than literal enum transitions.
pub struct QualityController {
    config: QualityConfig,
    /// Budget at quality 1.0; banded down as quality degrades
    base_render_budget: usize,
    /// Instance threshold at quality 1.0
    base_instance_threshold: usize,
    /// Rolling per-frame delta times (seconds)
    samples: VecDeque<f32>,
    cooldown: u32,
    quality: f32,
    version: u64,
}

impl QualityController {
    /// Create a controller at base quality.
    pub fn new(
        config: QualityConfig,
        base_render_budget: usize,
        base_instance_threshold: usize,
    ) -> Self {
        let quality = config.base_quality;
        Self {
            config,
            base_render_budget,
            base_instance_threshold,
            samples: VecDeque::new(),
            cooldown: 0,
            quality,
            version: 0,
        }
    }

    /// Feed one frame's delta time (seconds) and possibly adjust.
    ///
    /// Call exactly once per frame, after drawing.
    pub fn record_frame(&mut self, delta_seconds: f32) {
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return;
        }

        self.samples.push_back(delta_seconds);
        if self.samples.len() > self.config.window_size {
            self.samples.pop_front();
        }
        if self.samples.len() < self.config.window_size {
            return;
        }

        // Idle out the cooldown before taking any further action
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return;
        }

        let avg_fps = match self.average_fps() {
            Some(fps) => fps,
            None => return,
        };

        if avg_fps < self.config.target_fps * self.config.low_fps_ratio {
            let next = (self.quality - self.config.decrease_step).max(self.config.min_quality);
            if next < self.quality {
                self.quality = next;
                self.version += 1;
                self.cooldown = self.config.cooldown_frames;
                render_debug!(
                    "meridian::QualityController",
                    "Average {:.1} FPS below target, quality down to {:.2}",
                    avg_fps,
                    self.quality
                );
            }
        } else if avg_fps > self.config.target_fps * self.config.high_fps_ratio
            && self.quality < self.config.base_quality
        {
            let next = (self.quality + self.config.increase_step).min(self.config.base_quality);
            self.quality = next;
            self.version += 1;
            self.cooldown = self.config.cooldown_frames;
            render_debug!(
                "meridian::QualityController",
                "Headroom at {:.1} FPS, quality up to {:.2}",
                avg_fps,
                self.quality
            );
        }
        // Otherwise: stable, no change
    }

    /// Average FPS over the rolling window (None until it has samples).
    pub fn average_fps(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        let total: f32 = self.samples.iter().sum();
        if total <= 0.0 {
            return None;
        }
        Some(self.samples.len() as f32 / total)
    }

    /// Current quality multiplier.
    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Frames remaining before the next adjustment is considered.
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Whether the rolling window has filled.
    pub fn window_full(&self) -> bool {
        self.samples.len() >= self.config.window_size
    }

    /// Derive this frame's knob values from the multiplier.
    pub fn snapshot(&self) -> QualitySnapshot {
        QualitySnapshot {
            quality_multiplier: self.quality,
            lod_distance_scale: self.quality,
            instance_count_threshold: self.instance_count_threshold(),
            render_budget: self.render_budget(),
            version: self.version,
        }
    }

    /// Banded render budget: full at high quality, then medium and low
    /// bands (8000/5000/3000 at the default base of 8000).
    fn render_budget(&self) -> usize {
        if self.quality >= 0.8 {
            self.base_render_budget
        } else if self.quality >= 0.5 {
            self.base_render_budget * 5 / 8
        } else {
            self.base_render_budget * 3 / 8
        }
    }

    /// Instance threshold shrinks as quality degrades, so struggling
    /// frames push more objects into batches.
    fn instance_count_threshold(&self) -> usize {
        (((self.base_instance_threshold as f32) * self.quality).round() as usize).max(2)
    }
}

#[cfg(test)]
#[path = "quality_tests.rs"]
mod tests;
