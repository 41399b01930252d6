//! Per-condition numeric scaling policy.
//!
//! One table, two consumers: the filter-chain compositor reads these values
//! in CSS-style units (px, percent-delta, degrees) and the shader program
//! reads the same values normalized to factors. Keeping them in one place is
//! what keeps the two backends in agreement; the backends may not produce
//! bit-identical pixels (different primitive sets) but every formula below
//! must mean the same thing on both.
//!
//! Conventions: `*_DIM_PCT` subtracts from 100% brightness, `*_GAIN_PCT`
//! adds to it, `*_LOSS_PCT` subtracts from 100% contrast or saturation, and
//! `*_BLUR_PX` is the blur radius at full intensity.

// Cataracts: clouded, yellow-brown, light-scattering lens.
pub(crate) const CATARACTS_BLUR_PX: f32 = 5.0;
pub(crate) const CATARACTS_GAIN_PCT: f32 = 10.0;
pub(crate) const CATARACTS_CONTRAST_LOSS_PCT: f32 = 30.0;
pub(crate) const CATARACTS_SEPIA_PCT: f32 = 40.0;

// Glaucoma: peripheral dimming collapsing toward a tunnel.
pub(crate) const GLAUCOMA_DIM_PCT: f32 = 60.0;
pub(crate) const GLAUCOMA_CONTRAST_LOSS_PCT: f32 = 20.0;
pub(crate) const GLAUCOMA_BLUR_PX: f32 = 2.0;
/// Tunnel radius in normalized field units at intensity 0 and 1.
pub(crate) const GLAUCOMA_TUNNEL_RADIUS: (f32, f32) = (0.95, 0.12);
/// Width of the smooth tunnel edge at intensity 0 and 1.
pub(crate) const GLAUCOMA_TUNNEL_EDGE: (f32, f32) = (0.35, 0.10);

// Macular degeneration: central scotoma with distorted surround.
pub(crate) const MACULAR_BLUR_PX: f32 = 3.0;
pub(crate) const MACULAR_DIM_PCT: f32 = 40.0;
pub(crate) const MACULAR_CONTRAST_LOSS_PCT: f32 = 30.0;
/// Central scotoma radius in normalized field units at intensity 0 and 1.
pub(crate) const MACULAR_SCOTOMA_RADIUS: (f32, f32) = (0.02, 0.45);
/// Width of the scotoma's smooth edge.
pub(crate) const MACULAR_SCOTOMA_SOFTNESS: f32 = 0.12;

// Retinitis pigmentosa: tunnel plus desaturated, darkened vision.
pub(crate) const RP_DIM_PCT: f32 = 50.0;
pub(crate) const RP_CONTRAST_LOSS_PCT: f32 = 25.0;
pub(crate) const RP_SATURATE_LOSS_PCT: f32 = 40.0;
pub(crate) const RP_BLUR_PX: f32 = 1.5;
pub(crate) const RP_TUNNEL_RADIUS: (f32, f32) = (0.9, 0.15);

// Diabetic retinopathy: scattered scotomas and haze.
pub(crate) const RETINOPATHY_BLUR_PX: f32 = 2.0;
pub(crate) const RETINOPATHY_DIM_PCT: f32 = 30.0;
pub(crate) const RETINOPATHY_CONTRAST_LOSS_PCT: f32 = 20.0;
/// Number of procedural scotoma holes at full intensity.
pub(crate) const RETINOPATHY_SCOTOMA_COUNT: usize = 5;
pub(crate) const RETINOPATHY_SCOTOMA_RADIUS: f32 = 0.12;
/// Occlusion depth inside a scotoma hole at full intensity.
pub(crate) const RETINOPATHY_SCOTOMA_DEPTH: f32 = 0.85;

// Hemianopia: half-field loss; the chain path can only dim globally, the
// shader and overlay paths carry the directional mask.
pub(crate) const HEMIANOPIA_DIM_PCT: f32 = 25.0;
pub(crate) const HEMIANOPIA_EDGE_SOFTNESS: f32 = 0.08;
/// Occlusion depth of the lost half-field at full intensity.
pub(crate) const HEMIANOPIA_FIELD_LOSS: f32 = 0.9;

// Floaters: vitreous debris; visible shapes live on the overlay layer, the
// color paths only contribute a faint haze so backend presence stays in sync.
pub(crate) const FLOATERS_DIM_PCT: f32 = 6.0;
/// In-shader drifting blob count and peak occlusion.
pub(crate) const FLOATERS_BLOB_COUNT: usize = 3;
pub(crate) const FLOATERS_BLOB_OPACITY: f32 = 0.35;

// Light-sensitivity group.
pub(crate) const PHOTOPHOBIA_GAIN_PCT: f32 = 80.0;
pub(crate) const PHOTOPHOBIA_CONTRAST_LOSS_PCT: f32 = 30.0;
pub(crate) const HALOS_GAIN_PCT: f32 = 30.0;
pub(crate) const HALOS_BLUR_PX: f32 = 1.0;
/// Halo ring radius and thickness in normalized field units.
pub(crate) const HALOS_RING_RADIUS: f32 = 0.08;
pub(crate) const HALOS_RING_THICKNESS: f32 = 0.025;
/// Source-pixel brightness gate below which no halo is drawn.
pub(crate) const HALOS_LUMA_GATE: f32 = 0.75;
pub(crate) const GLARE_GAIN_PCT: f32 = 60.0;
pub(crate) const GLARE_CONTRAST_LOSS_PCT: f32 = 40.0;
/// Luma threshold where glare bloom starts picking up energy.
pub(crate) const GLARE_BLOOM_KNEE: f32 = 0.6;
/// How much bloom energy is added back at full intensity.
pub(crate) const GLARE_BLOOM_STRENGTH: f32 = 0.8;

// Night blindness.
pub(crate) const NIGHT_DIM_PCT: f32 = 70.0;
pub(crate) const NIGHT_CONTRAST_LOSS_PCT: f32 = 20.0;

// Xanthopsia: yellow cast.
pub(crate) const XANTHOPSIA_SEPIA_PCT: f32 = 60.0;
pub(crate) const XANTHOPSIA_HUE_DEG: f32 = -8.0;

// Refractive errors.
pub(crate) const MYOPIA_BLUR_PX: f32 = 4.0;
pub(crate) const HYPEROPIA_BLUR_PX: f32 = 3.0;
pub(crate) const ASTIGMATISM_BLUR_PX: f32 = 2.5;
pub(crate) const ASTIGMATISM_CONTRAST_LOSS_PCT: f32 = 10.0;
pub(crate) const PRESBYOPIA_BLUR_PX: f32 = 2.0;

// Compound named cases: constituent weights applied on top of the generic
// tables above. A weight scales the case intensity before it reaches the
// generic condition's formulas.
pub(crate) const GALILEO_UVEITIS_GLARE_WEIGHT: f32 = 0.7;
pub(crate) const GALILEO_UVEITIS_HAZE_WEIGHT: f32 = 0.3;
pub(crate) const GALILEO_GLAUCOMA_WEIGHT: f32 = 1.0;
pub(crate) const GALILEO_CATARACTS_WEIGHT: f32 = 0.6;

pub(crate) const MONET_EARLY_CATARACTS_WEIGHT: f32 = 0.45;
pub(crate) const MONET_EARLY_XANTHOPSIA_WEIGHT: f32 = 0.35;
pub(crate) const MONET_ADVANCED_CATARACTS_WEIGHT: f32 = 1.0;
pub(crate) const MONET_ADVANCED_XANTHOPSIA_WEIGHT: f32 = 0.8;
/// Intensity at which the progression aggregate crosses from the early to
/// the advanced stage.
pub(crate) const MONET_PROGRESSION_KNEE: f32 = 0.5;

pub(crate) const VANGOGH_XANTHOPSIA_WEIGHT: f32 = 1.0;
pub(crate) const VANGOGH_HALOS_WEIGHT: f32 = 0.8;

// Diplopia ghost opacity is fixed; only separation and direction vary.
pub(crate) const DIPLOPIA_GHOST_OPACITY: f32 = 0.5;

/// Normalized uv offset per pixel of declarative blur radius, used by the
/// per-pixel program's tap pattern to approximate the chain's `Blur` stage.
pub(crate) const BLUR_UV_PER_PX: f32 = 0.0015;
