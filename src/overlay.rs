//! Animated overlay geometry.
//!
//! Effects that cannot be expressed as a per-pixel color function (drifting
//! vitreous floaters, directional field-loss masks) are emitted as
//! normalized-coordinate geometric primitives for the caller to composite as
//! a layer above the rendered frame. The generator runs on its own cadence
//! (100 ms by default), independent of frame rate, and suspends entirely
//! while its governing condition is disabled.

pub mod floaters;
pub mod mask;

/// One overlay shape in normalized `[0,1]²` coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayPrimitive {
    /// Center position.
    pub center: kurbo::Point,
    /// Radius in normalized units.
    pub radius: f64,
    /// Composite opacity in `[0,1]`.
    pub opacity: f32,
    /// Straight-alpha RGBA fill color.
    pub color: [f32; 4],
}

/// A full overlay layer for one tick.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayDescriptor {
    /// Primitives in paint order.
    pub primitives: Vec<OverlayPrimitive>,
}

impl OverlayDescriptor {
    /// A descriptor with nothing to paint.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when there is nothing to paint.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
