//! 3×3 linear color transform.

/// A row-major 3×3 matrix mapping source RGB to simulated-perception RGB.
///
/// Matrices are derived in linear (gamma-expanded) RGB but applied in display
/// space for performance, matching the practice of the physiological models
/// they come from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorMatrix(
    /// Row-major cells.
    pub [f32; 9],
);

impl ColorMatrix {
    /// The identity transform.
    pub const IDENTITY: ColorMatrix = ColorMatrix([
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0,
    ]);

    /// Row-major cell access (`row`, `col` in 0..3).
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.0[row * 3 + col]
    }

    /// Apply the transform to an RGB triple.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        [
            m[0] * rgb[0] + m[1] * rgb[1] + m[2] * rgb[2],
            m[3] * rgb[0] + m[4] * rgb[1] + m[5] * rgb[2],
            m[6] * rgb[0] + m[7] * rgb[1] + m[8] * rgb[2],
        ]
    }

    /// Per-cell linear interpolation toward `other`.
    ///
    /// The endpoints reproduce the inputs exactly (no `a + (b-a)` rounding),
    /// so severities landing on a control point have zero interpolation
    /// error.
    pub fn lerp(&self, other: &ColorMatrix, t: f32) -> ColorMatrix {
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *other;
        }
        let mut out = [0.0f32; 9];
        for (i, cell) in out.iter_mut().enumerate() {
            *cell = self.0[i] + (other.0[i] - self.0[i]) * t;
        }
        ColorMatrix(out)
    }

    /// Blend between identity (t = 0) and this matrix (t = 1).
    pub fn blended_with_identity(&self, t: f32) -> ColorMatrix {
        ColorMatrix::IDENTITY.lerp(self, t)
    }

    /// True when every cell is within `tol` of `other`'s.
    pub fn approx_eq(&self, other: &ColorMatrix, tol: f32) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= tol)
    }

    /// True when this is (numerically) the identity transform.
    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::IDENTITY, 1e-6)
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_apply_is_noop() {
        let rgb = [0.25, 0.5, 0.75];
        assert_eq!(ColorMatrix::IDENTITY.apply(rgb), rgb);
    }

    #[test]
    fn lerp_endpoints_reproduce_inputs() {
        let a = ColorMatrix::IDENTITY;
        let b = ColorMatrix([0.5; 9]);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn blend_with_identity_at_half_averages_cells() {
        let b = ColorMatrix([0.0; 9]);
        let mid = b.blended_with_identity(0.5);
        assert!((mid.at(0, 0) - 0.5).abs() < 1e-6);
        assert!((mid.at(0, 1) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn apply_is_row_major() {
        // First row picks the green channel only.
        let m = ColorMatrix([
            0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0,
        ]);
        assert_eq!(m.apply([0.1, 0.9, 0.3]), [0.9, 0.0, 0.0]);
    }
}
