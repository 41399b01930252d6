//! Physiologically derived color-vision deficiency transforms.
//!
//! Dichromatic endpoints and anomalous severity ramps follow the
//! Machado–Oliveira–Fernandes (2009) two-stage model matrices. Achromatic
//! conditions project onto ITU-R BT.709 luma. All matrices are defined
//! against linear RGB and applied in display space for performance.

use crate::catalog::condition::Condition;
use crate::color::interpolate::SeverityRamp;
use crate::color::matrix::ColorMatrix;
use crate::foundation::math::{clamp01, LUMA_709};

/// Protanopia endpoint (L-cone absence).
pub const PROTANOPIA: ColorMatrix = ColorMatrix([
    0.152286, 1.052583, -0.204868, //
    0.114503, 0.786281, 0.099216, //
    -0.003882, -0.048116, 1.051998,
]);

/// Deuteranopia endpoint (M-cone absence).
pub const DEUTERANOPIA: ColorMatrix = ColorMatrix([
    0.367322, 0.860646, -0.227968, //
    0.280085, 0.672501, 0.047413, //
    -0.011820, 0.042940, 0.968881,
]);

/// Tritanopia endpoint (S-cone absence).
pub const TRITANOPIA: ColorMatrix = ColorMatrix([
    1.255528, -0.076749, -0.178779, //
    -0.078411, 0.930809, 0.147602, //
    0.004733, 0.691367, 0.303900,
]);

/// BT.709 luminance projection: luma weights replicated across all three
/// output channels.
pub const LUMA_PROJECTION: ColorMatrix = ColorMatrix([
    LUMA_709[0], LUMA_709[1], LUMA_709[2], //
    LUMA_709[0], LUMA_709[1], LUMA_709[2], //
    LUMA_709[0], LUMA_709[1], LUMA_709[2],
]);

static PROTANOMALY_POINTS: [(f32, ColorMatrix); 4] = [
    (0.0, ColorMatrix::IDENTITY),
    (
        0.3,
        ColorMatrix([
            0.786812, 0.240298, -0.027110, //
            0.030806, 0.955434, 0.013760, //
            -0.001642, -0.004074, 1.005717,
        ]),
    ),
    (
        0.6,
        ColorMatrix([
            0.498864, 0.674741, -0.173604, //
            0.205199, 0.754872, 0.039929, //
            -0.011131, 0.030969, 0.980162,
        ]),
    ),
    (1.0, PROTANOPIA),
];

static DEUTERANOMALY_POINTS: [(f32, ColorMatrix); 4] = [
    (0.0, ColorMatrix::IDENTITY),
    (
        0.3,
        ColorMatrix([
            0.790, 0.258, -0.068, //
            0.084, 0.902, 0.014, //
            -0.004, 0.013, 0.991,
        ]),
    ),
    (
        0.6,
        ColorMatrix([
            0.547494, 0.607765, -0.155259, //
            0.181692, 0.781742, 0.036566, //
            -0.010410, 0.027275, 0.983136,
        ]),
    ),
    (1.0, DEUTERANOPIA),
];

static TRITANOMALY_POINTS: [(f32, ColorMatrix); 4] = [
    (0.0, ColorMatrix::IDENTITY),
    (
        0.3,
        ColorMatrix([
            1.017277, 0.027029, -0.044306, //
            -0.006113, 0.958479, 0.047634, //
            0.006379, 0.248708, 0.744913,
        ]),
    ),
    (
        0.6,
        ColorMatrix([
            1.104996, -0.046633, -0.058363, //
            -0.032137, 0.971635, 0.060503, //
            0.001336, 0.317922, 0.680742,
        ]),
    ),
    (1.0, TRITANOPIA),
];

/// Protanomaly severity ramp (0.0 / 0.3 / 0.6 / 1.0 control points).
pub static PROTANOMALY_RAMP: SeverityRamp = SeverityRamp::new(&PROTANOMALY_POINTS);
/// Deuteranomaly severity ramp.
pub static DEUTERANOMALY_RAMP: SeverityRamp = SeverityRamp::new(&DEUTERANOMALY_POINTS);
/// Tritanomaly severity ramp.
pub static TRITANOMALY_RAMP: SeverityRamp = SeverityRamp::new(&TRITANOMALY_POINTS);

/// Transform matrix for a known condition at `severity`.
///
/// Dichromatic conditions are binary: the endpoint matrix is returned
/// regardless of severity and the caller blends it with identity.
/// Anomalous conditions interpolate their ramp. Achromatopsia projects onto
/// luma; achromatomaly blends the projection by severity. Conditions with no
/// color component return identity.
pub fn matrix_for_condition(condition: Condition, severity: f32) -> ColorMatrix {
    let s = clamp01(severity);
    match condition {
        Condition::Protanopia => PROTANOPIA,
        Condition::Deuteranopia => DEUTERANOPIA,
        Condition::Tritanopia => TRITANOPIA,
        Condition::Protanomaly => PROTANOMALY_RAMP.interpolate(s),
        Condition::Deuteranomaly => DEUTERANOMALY_RAMP.interpolate(s),
        Condition::Tritanomaly => TRITANOMALY_RAMP.interpolate(s),
        Condition::Achromatopsia => LUMA_PROJECTION,
        Condition::Achromatomaly => LUMA_PROJECTION.blended_with_identity(s),
        _ => ColorMatrix::IDENTITY,
    }
}

/// Transform matrix for a raw identifier. Unknown identifiers return
/// identity, so the function is total.
pub fn matrix_for(id: &str, severity: f32) -> ColorMatrix {
    match Condition::parse(id) {
        Some(c) => matrix_for_condition(c, severity),
        None => ColorMatrix::IDENTITY,
    }
}

/// The severity ramp backing an anomalous condition, if it has one.
pub fn ramp_for(condition: Condition) -> Option<&'static SeverityRamp> {
    match condition {
        Condition::Protanomaly => Some(&PROTANOMALY_RAMP),
        Condition::Deuteranomaly => Some(&DEUTERANOMALY_RAMP),
        Condition::Tritanomaly => Some(&TRITANOMALY_RAMP),
        _ => None,
    }
}
