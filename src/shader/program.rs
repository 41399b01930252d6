//! The shared per-pixel program.
//!
//! One deterministic function of normalized coordinate, uniform table, and
//! source sampler, shared by the CPU backend (applied per pixel here) and
//! the GPU backend (mirrored in `impairment.wgsl`). Stage order:
//!
//! 1. terminal-blindness override (the only allowed discontinuity)
//! 2. optical blur taps + diplopia ghost sample
//! 3. color-vision matrix (first enabled condition wins, catalog order)
//! 4. per-condition tonal stages (catalog order)
//! 5. additive light effects (glare bloom, halo rings)
//! 6. multiplicative field masks (tunnel, scotomas, half field, floaters)
//!
//! Every stage is continuous in its intensity: a factor or mask always
//! scales with the uniform value, so intensity → 0 converges to identity.

use crate::catalog::condition::Condition;
use crate::catalog::tuning;
use crate::chain::compositor::color_vision_matrix;
use crate::foundation::math::{clamp01, lerp, luma_709, smoothstep};
use crate::shader::uniforms::UniformSet;

/// Fixed scotoma anchor points for diabetic retinopathy, normalized field
/// coordinates. Count matches [`tuning::RETINOPATHY_SCOTOMA_COUNT`].
const SCOTOMA_ANCHORS: [[f32; 2]; 5] = [
    [0.30, 0.35],
    [0.68, 0.28],
    [0.52, 0.62],
    [0.25, 0.72],
    [0.78, 0.65],
];

/// Evaluate the program for one pixel.
///
/// `uv` is the normalized coordinate in `[0,1]²`; `sample` reads the source
/// texture at a normalized coordinate (implementations clamp out-of-range
/// lookups to the edge).
pub fn shade_pixel<S>(u: &UniformSet, uv: [f32; 2], sample: &S) -> [f32; 3]
where
    S: Fn([f32; 2]) -> [f32; 3],
{
    // Terminal case: a condition whose clinical endpoint is total blindness
    // has reached it. Overrides every other stage.
    if u.terminal_black() {
        return [0.0, 0.0, 0.0];
    }

    let mut rgb = sample_with_blur(u, uv, sample);

    // Diplopia: second weighted sample offset along the configured axis.
    // Separation 0 resolves to the same texel, which is a null offset.
    if u.diplopia_separation > 0.0 {
        let dir = direction_offset(u.diplopia_direction);
        let ghost_uv = [
            uv[0] + u.diplopia_separation * dir[0],
            uv[1] + u.diplopia_separation * dir[1],
        ];
        let ghost = sample(clamp_uv(ghost_uv));
        rgb = mix3(rgb, ghost, tuning::DIPLOPIA_GHOST_OPACITY);
    }

    // Color vision: first enabled condition in catalog order wins,
    // mirroring the chain compositor's mutually-exclusive family.
    for &cv in Condition::COLOR_VISION {
        let i = u.get(cv);
        if i > 0.0 {
            rgb = color_vision_matrix(cv, i).apply(rgb);
            break;
        }
    }

    rgb = tonal_stages(u, rgb);
    rgb = light_stages(u, rgb);
    rgb = field_masks(u, uv, rgb);

    [clamp01(rgb[0]), clamp01(rgb[1]), clamp01(rgb[2])]
}

/// Box-tap blur approximating the declarative `Blur` stages. The tap radius
/// accumulates every enabled blur-carrying condition's pixel radius, scaled
/// into normalized uv units.
fn sample_with_blur<S>(u: &UniformSet, uv: [f32; 2], sample: &S) -> [f32; 3]
where
    S: Fn([f32; 2]) -> [f32; 3],
{
    let blur_px = tuning::CATARACTS_BLUR_PX * u.cataracts
        + tuning::GLAUCOMA_BLUR_PX * u.glaucoma
        + tuning::MACULAR_BLUR_PX * u.macular_degeneration
        + tuning::RP_BLUR_PX * u.retinitis_pigmentosa
        + tuning::RETINOPATHY_BLUR_PX * u.diabetic_retinopathy
        + tuning::HALOS_BLUR_PX * u.halos
        + tuning::MYOPIA_BLUR_PX * u.myopia
        + tuning::HYPEROPIA_BLUR_PX * u.hyperopia
        + tuning::ASTIGMATISM_BLUR_PX * u.astigmatism
        + tuning::PRESBYOPIA_BLUR_PX * u.presbyopia;

    let center = sample(uv);
    if blur_px <= 0.0 {
        return center;
    }

    let r = blur_px * tuning::BLUR_UV_PER_PX;
    let taps = [
        sample(clamp_uv([uv[0] - r, uv[1]])),
        sample(clamp_uv([uv[0] + r, uv[1]])),
        sample(clamp_uv([uv[0], uv[1] - r])),
        sample(clamp_uv([uv[0], uv[1] + r])),
    ];
    let mut out = center;
    for t in taps {
        out = add3(out, t);
    }
    scale3(out, 1.0 / 5.0)
}

/// Brightness / contrast / saturation / sepia adjustments, condition by
/// condition in catalog order, using the shared tuning tables.
fn tonal_stages(u: &UniformSet, mut rgb: [f32; 3]) -> [f32; 3] {
    if u.cataracts > 0.0 {
        let i = u.cataracts;
        rgb = brightness(rgb, 1.0 + tuning::CATARACTS_GAIN_PCT / 100.0 * i);
        rgb = contrast(rgb, 1.0 - tuning::CATARACTS_CONTRAST_LOSS_PCT / 100.0 * i);
        rgb = sepia(rgb, tuning::CATARACTS_SEPIA_PCT / 100.0 * i);
    }
    if u.glaucoma > 0.0 {
        let i = u.glaucoma;
        rgb = brightness(rgb, 1.0 - tuning::GLAUCOMA_DIM_PCT / 100.0 * i);
        rgb = contrast(rgb, 1.0 - tuning::GLAUCOMA_CONTRAST_LOSS_PCT / 100.0 * i);
    }
    if u.macular_degeneration > 0.0 {
        let i = u.macular_degeneration;
        rgb = brightness(rgb, 1.0 - tuning::MACULAR_DIM_PCT / 100.0 * i);
        rgb = contrast(rgb, 1.0 - tuning::MACULAR_CONTRAST_LOSS_PCT / 100.0 * i);
    }
    if u.retinitis_pigmentosa > 0.0 {
        let i = u.retinitis_pigmentosa;
        rgb = brightness(rgb, 1.0 - tuning::RP_DIM_PCT / 100.0 * i);
        rgb = contrast(rgb, 1.0 - tuning::RP_CONTRAST_LOSS_PCT / 100.0 * i);
        rgb = saturate(rgb, 1.0 - tuning::RP_SATURATE_LOSS_PCT / 100.0 * i);
    }
    if u.diabetic_retinopathy > 0.0 {
        let i = u.diabetic_retinopathy;
        rgb = brightness(rgb, 1.0 - tuning::RETINOPATHY_DIM_PCT / 100.0 * i);
        rgb = contrast(rgb, 1.0 - tuning::RETINOPATHY_CONTRAST_LOSS_PCT / 100.0 * i);
    }
    if u.hemianopia > 0.0 {
        rgb = brightness(rgb, 1.0 - tuning::HEMIANOPIA_DIM_PCT / 100.0 * u.hemianopia);
    }
    if u.floaters > 0.0 {
        rgb = brightness(rgb, 1.0 - tuning::FLOATERS_DIM_PCT / 100.0 * u.floaters);
    }
    if u.photophobia > 0.0 {
        let i = u.photophobia;
        rgb = brightness(rgb, 1.0 + tuning::PHOTOPHOBIA_GAIN_PCT / 100.0 * i);
        rgb = contrast(rgb, 1.0 - tuning::PHOTOPHOBIA_CONTRAST_LOSS_PCT / 100.0 * i);
    }
    if u.halos > 0.0 {
        rgb = brightness(rgb, 1.0 + tuning::HALOS_GAIN_PCT / 100.0 * u.halos);
    }
    if u.glare > 0.0 {
        let i = u.glare;
        rgb = brightness(rgb, 1.0 + tuning::GLARE_GAIN_PCT / 100.0 * i);
        rgb = contrast(rgb, 1.0 - tuning::GLARE_CONTRAST_LOSS_PCT / 100.0 * i);
    }
    if u.night_blindness > 0.0 {
        let i = u.night_blindness;
        rgb = brightness(rgb, 1.0 - tuning::NIGHT_DIM_PCT / 100.0 * i);
        rgb = contrast(rgb, 1.0 - tuning::NIGHT_CONTRAST_LOSS_PCT / 100.0 * i);
    }
    if u.xanthopsia > 0.0 {
        let i = u.xanthopsia;
        rgb = sepia(rgb, tuning::XANTHOPSIA_SEPIA_PCT / 100.0 * i);
        rgb = hue_rotate(rgb, tuning::XANTHOPSIA_HUE_DEG.to_radians() * i);
    }
    if u.astigmatism > 0.0 {
        rgb = contrast(
            rgb,
            1.0 - tuning::ASTIGMATISM_CONTRAST_LOSS_PCT / 100.0 * u.astigmatism,
        );
    }
    rgb
}

/// Additive light effects: glare bloom and halo isophote rings, both gated
/// by the source pixel's brightness.
fn light_stages(u: &UniformSet, mut rgb: [f32; 3]) -> [f32; 3] {
    let luma = luma_709(rgb);

    if u.glare > 0.0 {
        let bloom = smoothstep(tuning::GLARE_BLOOM_KNEE, 1.0, luma)
            * tuning::GLARE_BLOOM_STRENGTH
            * u.glare;
        rgb = add3(rgb, [bloom, bloom, bloom]);
    }

    if u.halos > 0.0 {
        // An isophote band just below the luma gate reads as a ring hugging
        // every bright region.
        let band = smoothstep(
            tuning::HALOS_LUMA_GATE - tuning::HALOS_RING_RADIUS,
            tuning::HALOS_LUMA_GATE,
            luma,
        ) * (1.0
            - smoothstep(
                tuning::HALOS_LUMA_GATE,
                tuning::HALOS_LUMA_GATE + tuning::HALOS_RING_THICKNESS,
                luma,
            ));
        let ring = band * u.halos * 0.6;
        rgb = add3(rgb, [ring, ring, ring * 0.8]);
    }

    rgb
}

/// Multiplicative field occlusion: tunnels, central scotoma, jittered
/// scotomas, half-field mask, drifting floater blobs.
fn field_masks(u: &UniformSet, uv: [f32; 2], mut rgb: [f32; 3]) -> [f32; 3] {
    // Normalized distance from field center; 1.0 at the corners.
    let dx = uv[0] - 0.5;
    let dy = uv[1] - 0.5;
    let d = (dx * dx + dy * dy).sqrt() / std::f32::consts::FRAC_1_SQRT_2;

    if u.glaucoma > 0.0 {
        rgb = scale3(rgb, tunnel_mask(d, u.glaucoma, tuning::GLAUCOMA_TUNNEL_RADIUS));
    }
    if u.retinitis_pigmentosa > 0.0 {
        rgb = scale3(
            rgb,
            tunnel_mask(d, u.retinitis_pigmentosa, tuning::RP_TUNNEL_RADIUS),
        );
    }

    if u.macular_degeneration > 0.0 {
        let i = u.macular_degeneration;
        let radius = lerp(
            tuning::MACULAR_SCOTOMA_RADIUS.0,
            tuning::MACULAR_SCOTOMA_RADIUS.1,
            i,
        );
        let hole = 1.0 - smoothstep(radius, radius + tuning::MACULAR_SCOTOMA_SOFTNESS, d);
        rgb = scale3(rgb, 1.0 - hole * i);
    }

    if u.diabetic_retinopathy > 0.0 {
        let i = u.diabetic_retinopathy;
        let mut occlusion = 0.0f32;
        for (k, anchor) in SCOTOMA_ANCHORS
            .iter()
            .enumerate()
            .take(tuning::RETINOPATHY_SCOTOMA_COUNT)
        {
            let k = k as f32;
            // Slow time jitter keeps the holes alive without teleporting.
            let cx = anchor[0] + 0.02 * (u.time * 0.40 + k * 2.4).sin();
            let cy = anchor[1] + 0.02 * (u.time * 0.33 + k * 1.7).cos();
            let dist = ((uv[0] - cx).powi(2) + (uv[1] - cy).powi(2)).sqrt();
            let r = tuning::RETINOPATHY_SCOTOMA_RADIUS * (0.6 + 0.4 * i);
            let hole = 1.0 - smoothstep(r * 0.5, r, dist);
            occlusion = occlusion.max(hole);
        }
        rgb = scale3(rgb, 1.0 - occlusion * tuning::RETINOPATHY_SCOTOMA_DEPTH * i);
    }

    if u.hemianopia > 0.0 {
        // Right-field loss: the mask covers uv.x > 0.5 with a soft edge.
        let mask = smoothstep(
            -tuning::HEMIANOPIA_EDGE_SOFTNESS,
            tuning::HEMIANOPIA_EDGE_SOFTNESS,
            uv[0] - 0.5,
        );
        rgb = scale3(rgb, 1.0 - mask * tuning::HEMIANOPIA_FIELD_LOSS * u.hemianopia);
    }

    if u.floaters > 0.0 {
        let i = u.floaters;
        let mut occlusion = 0.0f32;
        for k in 0..tuning::FLOATERS_BLOB_COUNT {
            let k = k as f32;
            let cx = 0.35 + 0.22 * (u.time * 0.11 + k * 2.1).sin();
            let cy = 0.40 + 0.26 * (u.time * 0.09 + k * 1.3).cos();
            let dist = ((uv[0] - cx).powi(2) + (uv[1] - cy).powi(2)).sqrt();
            let r = 0.030 + 0.012 * k;
            let blob = 1.0 - smoothstep(r * 0.6, r, dist);
            occlusion = occlusion.max(blob);
        }
        rgb = scale3(rgb, 1.0 - occlusion * tuning::FLOATERS_BLOB_OPACITY * i);
    }

    rgb
}

/// Smooth radial tunnel: 1 inside the preserved center, falling toward 0 in
/// the lost periphery. Radius and edge width shrink monotonically with
/// intensity, and the whole mask is gated by intensity so it converges to
/// identity as intensity → 0.
fn tunnel_mask(d: f32, intensity: f32, radius_range: (f32, f32)) -> f32 {
    let i = clamp01(intensity);
    let radius = lerp(radius_range.0, radius_range.1, i);
    let edge = lerp(
        tuning::GLAUCOMA_TUNNEL_EDGE.0,
        tuning::GLAUCOMA_TUNNEL_EDGE.1,
        i,
    );
    let vignette = smoothstep(radius - edge, radius + edge, d);
    1.0 - vignette * i
}

fn direction_offset(direction: f32) -> [f32; 2] {
    // The uniform is a float; route on its rounded value.
    if direction >= 1.5 {
        crate::foundation::core::DiplopiaDirection::Diagonal.unit_offset()
    } else if direction >= 0.5 {
        crate::foundation::core::DiplopiaDirection::Vertical.unit_offset()
    } else {
        crate::foundation::core::DiplopiaDirection::Horizontal.unit_offset()
    }
}

fn clamp_uv(uv: [f32; 2]) -> [f32; 2] {
    [uv[0].clamp(0.0, 1.0), uv[1].clamp(0.0, 1.0)]
}

fn mix3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp(a[0], b[0], t),
        lerp(a[1], b[1], t),
        lerp(a[2], b[2], t),
    ]
}

fn add3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn scale3(rgb: [f32; 3], s: f32) -> [f32; 3] {
    [rgb[0] * s, rgb[1] * s, rgb[2] * s]
}

fn brightness(rgb: [f32; 3], factor: f32) -> [f32; 3] {
    scale3(rgb, factor.max(0.0))
}

fn contrast(rgb: [f32; 3], factor: f32) -> [f32; 3] {
    let f = factor.max(0.0);
    [
        (rgb[0] - 0.5) * f + 0.5,
        (rgb[1] - 0.5) * f + 0.5,
        (rgb[2] - 0.5) * f + 0.5,
    ]
}

fn saturate(rgb: [f32; 3], factor: f32) -> [f32; 3] {
    let l = luma_709(rgb);
    mix3([l, l, l], rgb, factor.max(0.0))
}

/// Standard sepia projection, mixed in by `amount`.
fn sepia(rgb: [f32; 3], amount: f32) -> [f32; 3] {
    let toned = [
        rgb[0] * 0.393 + rgb[1] * 0.769 + rgb[2] * 0.189,
        rgb[0] * 0.349 + rgb[1] * 0.686 + rgb[2] * 0.168,
        rgb[0] * 0.272 + rgb[1] * 0.534 + rgb[2] * 0.131,
    ];
    mix3(rgb, toned, clamp01(amount))
}

/// Hue rotation about the luma axis (the standard filter-effects matrix).
fn hue_rotate(rgb: [f32; 3], radians: f32) -> [f32; 3] {
    let (sin, cos) = radians.sin_cos();
    let m = [
        0.213 + cos * 0.787 - sin * 0.213,
        0.715 - cos * 0.715 - sin * 0.715,
        0.072 - cos * 0.072 + sin * 0.928,
        0.213 - cos * 0.213 + sin * 0.143,
        0.715 + cos * 0.285 + sin * 0.140,
        0.072 - cos * 0.072 - sin * 0.283,
        0.213 - cos * 0.213 - sin * 0.787,
        0.715 - cos * 0.715 + sin * 0.715,
        0.072 + cos * 0.928 + sin * 0.072,
    ];
    [
        m[0] * rgb[0] + m[1] * rgb[1] + m[2] * rgb[2],
        m[3] * rgb[0] + m[4] * rgb[1] + m[5] * rgb[2],
        m[6] * rgb[0] + m[7] * rgb[1] + m[8] * rgb[2],
    ]
}
