//! Directional field-loss masks.
//!
//! Pure functions: no clock, no state. The mask is a strip of large soft
//! discs centered past the lost half of the field, leaving the preserved
//! half untouched when composited with the usual radial falloff.

use kurbo::Point;

use crate::foundation::math::clamp01;
use crate::overlay::{OverlayDescriptor, OverlayPrimitive};

/// Which half of the visual field is lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldLossDirection {
    /// Left half lost.
    Left,
    /// Right half lost.
    Right,
    /// Upper half lost.
    Upper,
    /// Lower half lost.
    Lower,
}

const MASK_DISCS: usize = 5;
const MASK_RADIUS: f64 = 0.55;

/// Build the overlay mask for a half-field loss at `intensity`.
///
/// Intensity 0 yields an empty descriptor; opacity scales continuously up
/// to near-complete occlusion of the lost half.
pub fn field_mask(direction: FieldLossDirection, intensity: f32) -> OverlayDescriptor {
    let i = clamp01(intensity);
    if i == 0.0 {
        return OverlayDescriptor::empty();
    }

    let opacity = 0.9 * i;
    let primitives = (0..MASK_DISCS)
        .map(|k| {
            let along = (k as f64 + 0.5) / MASK_DISCS as f64;
            let center = match direction {
                FieldLossDirection::Left => Point::new(-0.25, along),
                FieldLossDirection::Right => Point::new(1.25, along),
                FieldLossDirection::Upper => Point::new(along, -0.25),
                FieldLossDirection::Lower => Point::new(along, 1.25),
            };
            OverlayPrimitive {
                center,
                radius: MASK_RADIUS,
                opacity,
                color: [0.0, 0.0, 0.0, 1.0],
            }
        })
        .collect();
    OverlayDescriptor { primitives }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_intensity_is_empty() {
        assert!(field_mask(FieldLossDirection::Right, 0.0).is_empty());
    }

    #[test]
    fn mask_discs_sit_past_the_lost_half() {
        let out = field_mask(FieldLossDirection::Right, 1.0);
        assert_eq!(out.primitives.len(), MASK_DISCS);
        for p in &out.primitives {
            assert!(p.center.x > 1.0, "disc must sit beyond the right edge");
        }

        let out = field_mask(FieldLossDirection::Upper, 1.0);
        for p in &out.primitives {
            assert!(p.center.y < 0.0);
        }
    }

    #[test]
    fn opacity_scales_with_intensity() {
        let half = field_mask(FieldLossDirection::Left, 0.5);
        let full = field_mask(FieldLossDirection::Left, 1.0);
        assert!(half.primitives[0].opacity < full.primitives[0].opacity);
        assert!(full.primitives[0].opacity <= 0.9 + 1e-6);
    }

    #[test]
    fn mask_is_pure() {
        assert_eq!(
            field_mask(FieldLossDirection::Lower, 0.7),
            field_mask(FieldLossDirection::Lower, 0.7)
        );
    }
}
