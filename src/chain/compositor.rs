//! Filter-chain composition.
//!
//! Maps the caller's effect list to an ordered primitive chain for the
//! declarative renderer. Families are visited in a fixed, documented
//! priority order: color vision → optical blur → compound named cases →
//! generic symptom filters → refractive filters. Within the mutually
//! exclusive color-vision family only the first enabled condition is
//! honored; concurrent color-vision conditions are not blended.

use smallvec::SmallVec;

use crate::catalog::condition::{Category, ChainFamily, Condition};
use crate::catalog::lookup::EffectIndex;
use crate::catalog::tuning;
use crate::chain::cases;
use crate::chain::primitive::{FilterChain, FilterPrimitive};
use crate::color::cvd::matrix_for_condition;
use crate::foundation::core::EffectState;

/// Build the filter chain for an ordered effect list.
///
/// Total for all inputs: unknown identifiers are ignored, severities are
/// clamped, and disabled effects contribute nothing. An enabled effect at
/// severity 0 contributes explicit identity-equivalent stages rather than
/// disappearing, so stage presence cannot desync from the shader path.
#[tracing::instrument(skip_all, fields(effects = effects.len()))]
pub fn build_chain(effects: &[EffectState]) -> FilterChain {
    let fx = EffectIndex::build(effects);
    let mut out: Vec<FilterPrimitive> = Vec::new();

    // Color vision: first enabled wins, expressed as one matrix operator.
    if let Some(&cv) = Condition::COLOR_VISION
        .iter()
        .find(|c| fx.is_enabled(c.id()))
    {
        let i = fx.intensity(cv.id());
        out.push(FilterPrimitive::ColorMatrixRef {
            matrix: color_vision_matrix(cv, i),
        });
    }

    // Optical blur.
    append_family(&mut out, &fx, ChainFamily::OpticalBlur);

    // Compound named cases, each expanded by its handler.
    let mut terminal_black = any_terminal(&fx);
    for &case in crate::catalog::condition::CompoundCase::ALL {
        let contribution = cases::contribution(case, &fx);
        out.extend(contribution.primitives);
        terminal_black |= contribution.terminal_black;
    }

    // Generic symptom filters, then refractive filters.
    append_family(&mut out, &fx, ChainFamily::Symptom);
    append_family(&mut out, &fx, ChainFamily::Refractive);

    // A condition at its total-blindness endpoint supersedes everything.
    if terminal_black {
        return FilterChain(vec![
            FilterPrimitive::Brightness { pct: 0.0 },
            FilterPrimitive::Contrast { pct: 0.0 },
            FilterPrimitive::Saturate { pct: 0.0 },
        ]);
    }

    tracing::debug!(stages = out.len(), "composed filter chain");
    FilterChain(out)
}

fn append_family(out: &mut Vec<FilterPrimitive>, fx: &EffectIndex, family: ChainFamily) {
    for &c in Condition::ALL {
        if c.family() != family || !fx.is_enabled(c.id()) {
            continue;
        }
        out.extend(primitives_for(c, fx.intensity(c.id())));
    }
}

fn any_terminal(fx: &EffectIndex) -> bool {
    Condition::ALL
        .iter()
        .any(|c| c.is_terminal_blindness() && fx.is_enabled(c.id()) && fx.intensity(c.id()) >= 1.0)
}

/// The matrix the chain carries for the winning color-vision condition.
///
/// Dichromacy and complete achromatopsia are binary conditions, so severity
/// blends the endpoint matrix with identity here; anomalous and partial
/// conditions already fold severity into the matrix itself.
pub(crate) fn color_vision_matrix(
    condition: Condition,
    intensity: f32,
) -> crate::color::matrix::ColorMatrix {
    match condition.category() {
        Category::Dichromatic => {
            matrix_for_condition(condition, intensity).blended_with_identity(intensity)
        }
        Category::Achromatic if condition == Condition::Achromatopsia => {
            matrix_for_condition(condition, intensity).blended_with_identity(intensity)
        }
        _ => matrix_for_condition(condition, intensity),
    }
}

/// Intensity-scaled primitives for one generic non-color condition.
///
/// Shared with the compound-case handlers so a case constituent reuses the
/// exact formulas of the generic condition it maps onto. Color-vision
/// conditions return nothing here; they are carried by the matrix stage.
pub(crate) fn primitives_for(
    condition: Condition,
    intensity: f32,
) -> SmallVec<[FilterPrimitive; 4]> {
    use FilterPrimitive::{Blur, Brightness, Contrast, HueRotate, Saturate, Sepia};

    let i = crate::foundation::math::clamp01(intensity);
    let mut prims = SmallVec::new();
    match condition {
        Condition::Cataracts => {
            prims.push(Blur {
                radius_px: tuning::CATARACTS_BLUR_PX * i,
            });
            prims.push(Brightness {
                pct: 100.0 + tuning::CATARACTS_GAIN_PCT * i,
            });
            prims.push(Contrast {
                pct: 100.0 - tuning::CATARACTS_CONTRAST_LOSS_PCT * i,
            });
            prims.push(Sepia {
                pct: tuning::CATARACTS_SEPIA_PCT * i,
            });
        }
        Condition::Glaucoma => {
            prims.push(Brightness {
                pct: 100.0 - tuning::GLAUCOMA_DIM_PCT * i,
            });
            prims.push(Contrast {
                pct: 100.0 - tuning::GLAUCOMA_CONTRAST_LOSS_PCT * i,
            });
            prims.push(Blur {
                radius_px: tuning::GLAUCOMA_BLUR_PX * i,
            });
        }
        Condition::MacularDegeneration => {
            prims.push(Blur {
                radius_px: tuning::MACULAR_BLUR_PX * i,
            });
            prims.push(Brightness {
                pct: 100.0 - tuning::MACULAR_DIM_PCT * i,
            });
            prims.push(Contrast {
                pct: 100.0 - tuning::MACULAR_CONTRAST_LOSS_PCT * i,
            });
        }
        Condition::RetinitisPigmentosa => {
            prims.push(Brightness {
                pct: 100.0 - tuning::RP_DIM_PCT * i,
            });
            prims.push(Contrast {
                pct: 100.0 - tuning::RP_CONTRAST_LOSS_PCT * i,
            });
            prims.push(Saturate {
                pct: 100.0 - tuning::RP_SATURATE_LOSS_PCT * i,
            });
            prims.push(Blur {
                radius_px: tuning::RP_BLUR_PX * i,
            });
        }
        Condition::DiabeticRetinopathy => {
            prims.push(Blur {
                radius_px: tuning::RETINOPATHY_BLUR_PX * i,
            });
            prims.push(Brightness {
                pct: 100.0 - tuning::RETINOPATHY_DIM_PCT * i,
            });
            prims.push(Contrast {
                pct: 100.0 - tuning::RETINOPATHY_CONTRAST_LOSS_PCT * i,
            });
        }
        Condition::Hemianopia => {
            // The chain cannot mask half a field; it only dims. The shader
            // and overlay paths carry the directional mask.
            prims.push(Brightness {
                pct: 100.0 - tuning::HEMIANOPIA_DIM_PCT * i,
            });
        }
        Condition::Floaters => {
            // Visible floaters live on the overlay layer.
            prims.push(Brightness {
                pct: 100.0 - tuning::FLOATERS_DIM_PCT * i,
            });
        }
        Condition::Photophobia => {
            prims.push(Brightness {
                pct: 100.0 + tuning::PHOTOPHOBIA_GAIN_PCT * i,
            });
            prims.push(Contrast {
                pct: 100.0 - tuning::PHOTOPHOBIA_CONTRAST_LOSS_PCT * i,
            });
        }
        Condition::Halos => {
            prims.push(Brightness {
                pct: 100.0 + tuning::HALOS_GAIN_PCT * i,
            });
            prims.push(Blur {
                radius_px: tuning::HALOS_BLUR_PX * i,
            });
        }
        Condition::Glare => {
            prims.push(Brightness {
                pct: 100.0 + tuning::GLARE_GAIN_PCT * i,
            });
            prims.push(Contrast {
                pct: 100.0 - tuning::GLARE_CONTRAST_LOSS_PCT * i,
            });
        }
        Condition::NightBlindness => {
            prims.push(Brightness {
                pct: 100.0 - tuning::NIGHT_DIM_PCT * i,
            });
            prims.push(Contrast {
                pct: 100.0 - tuning::NIGHT_CONTRAST_LOSS_PCT * i,
            });
        }
        Condition::Xanthopsia => {
            prims.push(Sepia {
                pct: tuning::XANTHOPSIA_SEPIA_PCT * i,
            });
            prims.push(HueRotate {
                deg: tuning::XANTHOPSIA_HUE_DEG * i,
            });
        }
        Condition::Myopia => {
            prims.push(Blur {
                radius_px: tuning::MYOPIA_BLUR_PX * i,
            });
        }
        Condition::Hyperopia => {
            prims.push(Blur {
                radius_px: tuning::HYPEROPIA_BLUR_PX * i,
            });
        }
        Condition::Astigmatism => {
            prims.push(Blur {
                radius_px: tuning::ASTIGMATISM_BLUR_PX * i,
            });
            prims.push(Contrast {
                pct: 100.0 - tuning::ASTIGMATISM_CONTRAST_LOSS_PCT * i,
            });
        }
        Condition::Presbyopia => {
            prims.push(Blur {
                radius_px: tuning::PRESBYOPIA_BLUR_PX * i,
            });
        }
        // Color vision is carried by the matrix stage.
        Condition::Protanopia
        | Condition::Deuteranopia
        | Condition::Tritanopia
        | Condition::Protanomaly
        | Condition::Deuteranomaly
        | Condition::Tritanomaly
        | Condition::Achromatopsia
        | Condition::Achromatomaly => {}
    }
    prims
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::cvd::PROTANOPIA;

    fn on(id: &str, i: f32) -> EffectState {
        EffectState::enabled(id, i)
    }

    #[test]
    fn empty_and_all_disabled_states_are_identity() {
        assert!(build_chain(&[]).is_identity());

        let effects = vec![
            EffectState::disabled("glaucoma"),
            EffectState::disabled("protanopia"),
        ];
        assert!(build_chain(&effects).is_identity());
    }

    #[test]
    fn all_zero_intensities_are_identity_equivalent() {
        let effects: Vec<EffectState> = Condition::ALL
            .iter()
            .map(|c| on(c.id(), 0.0))
            .collect();
        let chain = build_chain(&effects);
        assert!(!chain.0.is_empty(), "stages stay present at severity 0");
        assert!(chain.is_identity());
    }

    #[test]
    fn protanopia_full_intensity_carries_exact_endpoint_matrix() {
        let chain = build_chain(&[on("protanopia", 1.0)]);
        let m = chain.color_matrix().expect("matrix stage present");
        assert_eq!(*m, PROTANOPIA);
    }

    #[test]
    fn first_enabled_color_vision_condition_wins() {
        let effects = vec![on("deuteranopia", 1.0), on("protanopia", 1.0)];
        let chain = build_chain(&effects);
        // Registry order puts protanopia first regardless of caller order.
        let m = chain.color_matrix().expect("matrix stage present");
        assert_eq!(*m, PROTANOPIA);
        let matrix_stages = chain
            .0
            .iter()
            .filter(|p| matches!(p, FilterPrimitive::ColorMatrixRef { .. }))
            .count();
        assert_eq!(matrix_stages, 1);
    }

    #[test]
    fn families_appear_in_priority_order() {
        let effects = vec![
            on("myopia", 0.5),
            on("glaucoma", 0.5),
            on("cataracts", 0.5),
            on("deuteranomaly", 0.5),
        ];
        let chain = build_chain(&effects);
        let pos = |pred: fn(&FilterPrimitive) -> bool| {
            chain.0.iter().position(pred).expect("stage present")
        };
        let matrix = pos(|p| matches!(p, FilterPrimitive::ColorMatrixRef { .. }));
        let sepia = pos(|p| matches!(p, FilterPrimitive::Sepia { .. }));
        let last_blur = chain
            .0
            .iter()
            .rposition(|p| matches!(p, FilterPrimitive::Blur { .. }))
            .unwrap();
        assert!(matrix < sepia, "color vision precedes cataracts");
        assert!(sepia < last_blur, "cataracts precedes refractive blur");
    }

    #[test]
    fn terminal_blindness_overrides_all_other_stages() {
        let effects = vec![on("glaucoma", 1.0), on("cataracts", 0.5)];
        let chain = build_chain(&effects);
        assert_eq!(
            chain.0,
            vec![
                FilterPrimitive::Brightness { pct: 0.0 },
                FilterPrimitive::Contrast { pct: 0.0 },
                FilterPrimitive::Saturate { pct: 0.0 },
            ]
        );
    }

    #[test]
    fn below_terminal_intensity_glaucoma_keeps_normal_stages() {
        let chain = build_chain(&[on("glaucoma", 0.99)]);
        assert!(!chain.is_identity());
        assert!(chain.0.len() > 1);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let chain = build_chain(&[on("keratoconus", 1.0)]);
        assert!(chain.is_identity());
    }

    #[test]
    fn every_enabled_condition_contributes_a_non_identity_stage() {
        for &c in Condition::ALL {
            let chain = build_chain(&[on(c.id(), 0.8)]);
            assert!(
                !chain.is_identity(),
                "condition '{}' produced an identity chain",
                c.id()
            );
        }
    }
}
