//! Compound named-case handlers.
//!
//! Each documented historical case bundles several primitive effects under
//! one identifier namespace (`galileo*`, `monet*`, `vanGogh*`). A case is a
//! pure function from the effect index to a contribution: filter primitives
//! for the chain path plus a patch onto generic uniform slots for the shader
//! path, both built from the generic tuning tables so a constituent behaves
//! exactly like the generic condition it maps onto. When a case's aggregate
//! id is enabled it supersedes the individual constituents.

use smallvec::SmallVec;

use crate::catalog::condition::{CompoundCase, Condition};
use crate::catalog::lookup::EffectIndex;
use crate::catalog::tuning;
use crate::chain::compositor::primitives_for;
use crate::chain::primitive::FilterPrimitive;
use crate::foundation::math::{clamp01, lerp, smoothstep};

/// What one compound case adds to the composite.
#[derive(Debug, Default)]
pub(crate) struct CaseContribution {
    /// Chain stages, in constituent order.
    pub(crate) primitives: SmallVec<[FilterPrimitive; 8]>,
    /// Shader patch: `(generic condition, intensity)` pairs merged into the
    /// uniform table with per-slot maximum.
    pub(crate) patch: SmallVec<[(Condition, f32); 6]>,
    /// True when the case reached its documented total-blindness endpoint.
    pub(crate) terminal_black: bool,
}

impl CaseContribution {
    fn add(&mut self, condition: Condition, intensity: f32) {
        let i = clamp01(intensity);
        self.primitives.extend(primitives_for(condition, i));
        self.patch.push((condition, i));
    }
}

/// Expand one case. Pure; returns an empty contribution when nothing in the
/// case's namespace is enabled.
pub(crate) fn contribution(case: CompoundCase, fx: &EffectIndex) -> CaseContribution {
    // The aggregate id supersedes the constituents for the whole case.
    if fx.is_enabled(case.aggregate_id()) {
        let i = fx.intensity(case.aggregate_id());
        return match case {
            CompoundCase::Galileo => galileo_complete(i),
            CompoundCase::Monet => monet_progression(i),
            CompoundCase::VanGogh => van_gogh_complete(i),
        };
    }

    let mut out = CaseContribution::default();
    match case {
        CompoundCase::Galileo => {
            if fx.is_enabled("galileoUveitis") {
                let i = fx.intensity("galileoUveitis");
                out.add(Condition::Glare, i * tuning::GALILEO_UVEITIS_GLARE_WEIGHT);
                out.add(
                    Condition::Cataracts,
                    i * tuning::GALILEO_UVEITIS_HAZE_WEIGHT,
                );
            }
            if fx.is_enabled("galileoGlaucoma") {
                let i = fx.intensity("galileoGlaucoma");
                out.add(Condition::Glaucoma, i * tuning::GALILEO_GLAUCOMA_WEIGHT);
            }
            if fx.is_enabled("galileoCataracts") {
                let i = fx.intensity("galileoCataracts");
                out.add(Condition::Cataracts, i * tuning::GALILEO_CATARACTS_WEIGHT);
            }
        }
        CompoundCase::Monet => {
            if fx.is_enabled("monetCataractsEarly") {
                let i = fx.intensity("monetCataractsEarly");
                out.add(
                    Condition::Cataracts,
                    i * tuning::MONET_EARLY_CATARACTS_WEIGHT,
                );
                out.add(
                    Condition::Xanthopsia,
                    i * tuning::MONET_EARLY_XANTHOPSIA_WEIGHT,
                );
            }
            if fx.is_enabled("monetCataractsAdvanced") {
                let i = fx.intensity("monetCataractsAdvanced");
                out.add(
                    Condition::Cataracts,
                    i * tuning::MONET_ADVANCED_CATARACTS_WEIGHT,
                );
                out.add(
                    Condition::Xanthopsia,
                    i * tuning::MONET_ADVANCED_XANTHOPSIA_WEIGHT,
                );
            }
        }
        CompoundCase::VanGogh => {
            if fx.is_enabled("vanGoghXanthopsia") {
                let i = fx.intensity("vanGoghXanthopsia");
                out.add(Condition::Xanthopsia, i * tuning::VANGOGH_XANTHOPSIA_WEIGHT);
            }
            if fx.is_enabled("vanGoghHalos") {
                let i = fx.intensity("vanGoghHalos");
                out.add(Condition::Halos, i * tuning::VANGOGH_HALOS_WEIGHT);
            }
        }
    }
    out
}

/// Galileo's full syndrome: uveitic glare, advancing glaucoma, cataracts.
/// His endpoint was total blindness, so intensity 1 forces black.
fn galileo_complete(intensity: f32) -> CaseContribution {
    let i = clamp01(intensity);
    let mut out = CaseContribution::default();
    out.add(Condition::Glaucoma, i * tuning::GALILEO_GLAUCOMA_WEIGHT);
    out.add(Condition::Cataracts, i * tuning::GALILEO_CATARACTS_WEIGHT);
    out.add(Condition::Glare, i * tuning::GALILEO_UVEITIS_GLARE_WEIGHT);
    out.terminal_black = i >= 1.0;
    out
}

/// Monet's cataract progression, 1912 → 1922: severity sweeps continuously
/// from the early stage (mild blur, slight yellowing) into the advanced
/// brunescent stage.
fn monet_progression(intensity: f32) -> CaseContribution {
    let i = clamp01(intensity);
    let stage = smoothstep(
        tuning::MONET_PROGRESSION_KNEE - 0.25,
        tuning::MONET_PROGRESSION_KNEE + 0.25,
        i,
    );
    let cataracts = i * lerp(
        tuning::MONET_EARLY_CATARACTS_WEIGHT,
        tuning::MONET_ADVANCED_CATARACTS_WEIGHT,
        stage,
    );
    let xanthopsia = i * lerp(
        tuning::MONET_EARLY_XANTHOPSIA_WEIGHT,
        tuning::MONET_ADVANCED_XANTHOPSIA_WEIGHT,
        stage,
    );

    let mut out = CaseContribution::default();
    out.add(Condition::Cataracts, cataracts);
    out.add(Condition::Xanthopsia, xanthopsia);
    out
}

/// Van Gogh's attributed digitalis effects: yellow vision plus coronas.
fn van_gogh_complete(intensity: f32) -> CaseContribution {
    let i = clamp01(intensity);
    let mut out = CaseContribution::default();
    out.add(Condition::Xanthopsia, i * tuning::VANGOGH_XANTHOPSIA_WEIGHT);
    out.add(Condition::Halos, i * tuning::VANGOGH_HALOS_WEIGHT);
    out
}
