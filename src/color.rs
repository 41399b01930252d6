//! Color matrix library: 3×3 transforms, severity interpolation, and the
//! physiological color-vision deficiency tables.

pub mod cvd;
pub mod interpolate;
pub mod matrix;
