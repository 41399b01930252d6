//! Severity interpolation over sparse matrix control points.

use crate::color::matrix::ColorMatrix;
use crate::foundation::math::clamp01;

/// Sparse severity → matrix control points.
///
/// Keys are ascending in `[0, 1]` and always include 0.0 (identity) and 1.0
/// (the full dichromatic endpoint for the cone class). Severities are
/// clamped before lookup, so the ramp never extrapolates.
#[derive(Clone, Debug, PartialEq)]
pub struct SeverityRamp {
    points: &'static [(f32, ColorMatrix)],
}

impl SeverityRamp {
    /// Wrap a static control-point table.
    ///
    /// Tables are engine data, so ordering is asserted in debug builds
    /// rather than validated at runtime.
    pub(crate) const fn new(points: &'static [(f32, ColorMatrix)]) -> Self {
        Self { points }
    }

    /// The control-point table.
    pub fn points(&self) -> &'static [(f32, ColorMatrix)] {
        self.points
    }

    /// Linearly interpolate the matrix at `severity`.
    pub fn interpolate(&self, severity: f32) -> ColorMatrix {
        debug_assert!(self.points.len() >= 2);
        debug_assert!(self.points.windows(2).all(|w| w[0].0 < w[1].0));

        let s = clamp01(severity);

        let (first_key, first) = &self.points[0];
        if s <= *first_key {
            return *first;
        }
        let (last_key, last) = &self.points[self.points.len() - 1];
        if s >= *last_key {
            return *last;
        }

        for pair in self.points.windows(2) {
            let (lo_key, lo) = &pair[0];
            let (hi_key, hi) = &pair[1];
            if s > *hi_key {
                continue;
            }
            let span = hi_key - lo_key;
            // Degenerate spacing falls back to the nearer control point.
            if span <= f32::EPSILON {
                return if (s - lo_key).abs() <= (hi_key - s).abs() {
                    *lo
                } else {
                    *hi
                };
            }
            let t = (s - lo_key) / span;
            return lo.lerp(hi, t);
        }

        *last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: ColorMatrix = ColorMatrix([0.5; 9]);
    const FULL: ColorMatrix = ColorMatrix([0.0; 9]);

    static RAMP: SeverityRamp = SeverityRamp::new(&[
        (0.0, ColorMatrix::IDENTITY),
        (0.5, HALF),
        (1.0, FULL),
    ]);

    #[test]
    fn exact_control_points_have_zero_interpolation_error() {
        assert_eq!(RAMP.interpolate(0.0), ColorMatrix::IDENTITY);
        assert_eq!(RAMP.interpolate(0.5), HALF);
        assert_eq!(RAMP.interpolate(1.0), FULL);
    }

    #[test]
    fn midpoints_interpolate_per_cell() {
        let m = RAMP.interpolate(0.25);
        // Diagonal cells move 1.0 -> 0.5 across the first bracket.
        assert!((m.at(0, 0) - 0.75).abs() < 1e-6);
        // Off-diagonal cells move 0.0 -> 0.5.
        assert!((m.at(0, 1) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_severities_clamp() {
        assert_eq!(RAMP.interpolate(-3.0), ColorMatrix::IDENTITY);
        assert_eq!(RAMP.interpolate(7.5), FULL);
        assert_eq!(RAMP.interpolate(f32::NAN), ColorMatrix::IDENTITY);
    }

    #[test]
    fn interpolation_is_continuous_at_control_points() {
        let eps = 1e-4;
        for key in [0.5f32] {
            let below = RAMP.interpolate(key - eps);
            let at = RAMP.interpolate(key);
            let above = RAMP.interpolate(key + eps);
            assert!(below.approx_eq(&at, 1e-3));
            assert!(above.approx_eq(&at, 1e-3));
        }
    }

    #[test]
    fn interpolation_is_monotonic_per_cell_within_brackets() {
        let mut prev = RAMP.interpolate(0.0).at(0, 0);
        for i in 1..=100 {
            let v = RAMP.interpolate(i as f32 / 100.0).at(0, 0);
            assert!(v <= prev + 1e-6);
            prev = v;
        }
    }
}
