/// Selection highlight decoration.
///
/// A thin rendering decorator: given an object's base color and its
/// highlight flags, produces the material state to draw with plus an
/// optional back-face-expanded outline pass. Base material state of the
/// object is never mutated — the decorated spec is derived per frame.
///
/// Composes with both render paths because the allocator re-routes
/// highlighted objects to the individual partition; a shared instance
/// batch has no per-instance outline state to attach to.

use glam::{Vec3, Vec4};
use crate::scene::HighlightFlags;

/// Outline expansion for selected objects.
pub const SELECTED_OUTLINE_THICKNESS: f32 = 0.02;
/// Outline expansion for hovered objects (thinner than selected).
pub const HOVERED_OUTLINE_THICKNESS: f32 = 0.015;

// ===== SPECS =====

/// Resolved base material state for one draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSpec {
    /// Final tint (RGBA)
    pub color: Vec4,
}

/// One outline pass: back-face expansion by `thickness`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineSpec {
    /// Outline color (RGBA)
    pub color: Vec4,
    /// Back-face expansion distance
    pub thickness: f32,
}

// ===== OVERLAY =====

/// Stateless highlight decorator.
pub struct HighlightOverlay {
    /// Outline/tint color for selected objects
    selected_tint: Vec4,
    /// Outline/tint color for hovered objects
    hovered_tint: Vec4,
    /// Base-color brightening factor for selected objects
    brighten: f32,
}

impl HighlightOverlay {
    /// Default editor palette: warm selection orange, cool hover blue.
    pub fn new() -> Self {
        Self {
            selected_tint: Vec4::new(1.0, 0.62, 0.18, 1.0),
            hovered_tint: Vec4::new(0.35, 0.65, 1.0, 1.0),
            brighten: 1.25,
        }
    }

    /// Decorate one object's base color with its highlight state.
    ///
    /// Selected wins over hovered when both flags are set. Unhighlighted
    /// objects pass through untouched with no outline.
    pub fn decorate(
        &self,
        base_color: Vec4,
        flags: HighlightFlags,
    ) -> (MaterialSpec, Option<OutlineSpec>) {
        if flags.contains(HighlightFlags::SELECTED) {
            (
                MaterialSpec {
                    color: self.tinted(base_color, self.selected_tint, 0.35),
                },
                Some(OutlineSpec {
                    color: self.selected_tint,
                    thickness: SELECTED_OUTLINE_THICKNESS,
                }),
            )
        } else if flags.contains(HighlightFlags::HOVERED) {
            (
                MaterialSpec {
                    color: self.tinted(base_color, self.hovered_tint, 0.2),
                },
                Some(OutlineSpec {
                    color: self.hovered_tint,
                    thickness: HOVERED_OUTLINE_THICKNESS,
                }),
            )
        } else {
            (MaterialSpec { color: base_color }, None)
        }
    }

    /// Brighten the base color and blend toward the tint, preserving
    /// alpha.
    fn tinted(&self, base: Vec4, tint: Vec4, blend: f32) -> Vec4 {
        let rgb = (base.truncate() * self.brighten)
            .lerp(tint.truncate(), blend)
            .min(Vec3::ONE);
        rgb.extend(base.w)
    }
}

impl Default for HighlightOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "highlight_tests.rs"]
mod tests;
