//! Core value types shared across the engine.

use crate::foundation::error::{VisimError, VisimResult};

/// One caller-supplied condition toggle.
///
/// The engine only ever reads an ordered slice of these; it never mutates
/// them. `intensity` is meaningful only while `enabled` is true: a disabled
/// effect contributes nothing to any compositor, and the caller (not this
/// core) is responsible for remembering the last intensity so re-enabling
/// restores it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectState {
    /// Condition identifier, e.g. `"protanopia"` or `"galileoGlaucoma"`.
    /// Unknown identifiers are silently ignored so forward-compatible caller
    /// data keeps working.
    pub id: String,
    /// Whether the condition currently contributes to the composite.
    pub enabled: bool,
    /// Severity in `[0, 1]`. Out-of-range values are clamped at the point of
    /// use, not rejected.
    pub intensity: f32,
}

impl EffectState {
    /// Convenience constructor for an enabled effect.
    pub fn enabled(id: impl Into<String>, intensity: f32) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            intensity,
        }
    }

    /// Convenience constructor for a disabled effect.
    pub fn disabled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enabled: false,
            intensity: 0.0,
        }
    }

    /// The intensity this effect contributes: its clamped severity while
    /// enabled, 0 otherwise.
    pub fn effective_intensity(&self) -> f32 {
        if !self.enabled || !self.intensity.is_finite() {
            return 0.0;
        }
        self.intensity.clamp(0.0, 1.0)
    }
}

/// Axis along which the diplopia ghost image is offset.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DiplopiaDirection {
    /// Ghost offset along +x.
    #[default]
    Horizontal,
    /// Ghost offset along +y.
    Vertical,
    /// Ghost offset along the (+x, +y) diagonal.
    Diagonal,
}

impl DiplopiaDirection {
    /// Encoding used in the shader uniform table (0 / 1 / 2).
    pub fn as_uniform(self) -> f32 {
        match self {
            Self::Horizontal => 0.0,
            Self::Vertical => 1.0,
            Self::Diagonal => 2.0,
        }
    }

    /// Unit offset direction in normalized texture coordinates.
    pub fn unit_offset(self) -> [f32; 2] {
        match self {
            Self::Horizontal => [1.0, 0.0],
            Self::Vertical => [0.0, 1.0],
            // Normalized diagonal, so equal separations travel equal distance.
            Self::Diagonal => [std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2],
        }
    }
}

/// Double-vision parameters, shared by both renderer backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DiplopiaSettings {
    /// Ghost separation in normalized texture coordinates. 0 means no
    /// perceptible double image.
    pub separation: f32,
    /// Offset axis for the ghost sample.
    #[serde(default)]
    pub direction: DiplopiaDirection,
}

impl DiplopiaSettings {
    /// Validate and clamp into engine range.
    pub fn validate(&self) -> VisimResult<()> {
        if !self.separation.is_finite() {
            return Err(VisimError::validation("diplopia separation must be finite"));
        }
        if self.separation < 0.0 {
            return Err(VisimError::validation("diplopia separation must be >= 0"));
        }
        Ok(())
    }
}

/// A frame of straight-alpha RGBA8 pixels, tightly packed, row-major.
///
/// This is the unit the CPU shader backend transforms in place. Unlike a
/// compositing engine there is no premultiplication here: the program is a
/// color transform over an already-composited source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl Frame {
    /// Allocate an opaque black frame.
    pub fn new(width: u32, height: u32) -> VisimResult<Self> {
        if width == 0 || height == 0 {
            return Err(VisimError::validation("frame dimensions must be positive"));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| VisimError::validation("frame dimensions overflow"))?;
        let mut data = vec![0u8; len];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing RGBA8 buffer, validating its length.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> VisimResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| VisimError::validation("frame dimensions overflow"))?;
        if data.len() != expected {
            return Err(VisimError::validation(format!(
                "RGBA buffer length mismatch: expected {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_intensity_is_zero_while_disabled() {
        let e = EffectState {
            id: "glaucoma".into(),
            enabled: false,
            intensity: 0.8,
        };
        assert_eq!(e.effective_intensity(), 0.0);
    }

    #[test]
    fn effective_intensity_clamps_out_of_range() {
        let e = EffectState::enabled("cataracts", 1.7);
        assert_eq!(e.effective_intensity(), 1.0);
        let e = EffectState::enabled("cataracts", -0.4);
        assert_eq!(e.effective_intensity(), 0.0);
        let e = EffectState::enabled("cataracts", f32::NAN);
        assert_eq!(e.effective_intensity(), 0.0);
    }

    #[test]
    fn diplopia_direction_uniform_encoding() {
        assert_eq!(DiplopiaDirection::Horizontal.as_uniform(), 0.0);
        assert_eq!(DiplopiaDirection::Vertical.as_uniform(), 1.0);
        assert_eq!(DiplopiaDirection::Diagonal.as_uniform(), 2.0);
    }

    #[test]
    fn diagonal_unit_offset_has_unit_length() {
        let [dx, dy] = DiplopiaDirection::Diagonal.unit_offset();
        assert!((dx * dx + dy * dy - 1.0).abs() < 1e-6);
    }

    #[test]
    fn frame_rejects_mismatched_buffer() {
        assert!(Frame::from_rgba8(2, 2, vec![0u8; 15]).is_err());
        assert!(Frame::from_rgba8(2, 2, vec![0u8; 16]).is_ok());
    }
}
