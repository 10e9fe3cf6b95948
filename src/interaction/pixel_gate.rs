use glam::Vec2;

use super::hit::{RawHit, Renderable};

/// Boundary to the per-pixel opacity test for non-tilemap renderers.
pub trait PixelPrecisionGate: Send + Sync {
    /// The renderable actually under `point`, or `None` if the pixel is transparent.
    fn test_opacity(&self, hit: &RawHit, point: Vec2) -> Option<Renderable>;
}

/// Used when no pixel test is configured: every hit is opaque.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOpaque;

impl PixelPrecisionGate for AlwaysOpaque {
    fn test_opacity(&self, hit: &RawHit, _point: Vec2) -> Option<Renderable> {
        Some(hit.renderer.clone())
    }
}
