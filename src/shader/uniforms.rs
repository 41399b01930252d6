//! Flat uniform table for the per-pixel program.
//!
//! One `f32` slot per generic condition (`<id>Intensity`) plus the shared
//! `time` / `diplopiaSeparation` / `diplopiaDirection` parameters. The
//! struct is `#[repr(C)]`, all-`f32`, padded to a 16-byte multiple so the
//! GPU backend can copy it into a uniform buffer verbatim; the WGSL program
//! declares the same struct field-for-field.

use crate::catalog::condition::Condition;
use crate::catalog::lookup::EffectIndex;
use crate::chain::cases;
use crate::foundation::core::{DiplopiaSettings, EffectState};
use crate::foundation::error::{VisimError, VisimResult};

/// Number of `f32` slots in [`UniformSet`], padding included.
pub const UNIFORM_SLOT_COUNT: usize = 28;

/// The shared uniform table. Field order is part of the GPU contract.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "gpu", derive(bytemuck::Pod, bytemuck::Zeroable))]
pub struct UniformSet {
    /// `protanopiaIntensity`
    pub protanopia: f32,
    /// `deuteranopiaIntensity`
    pub deuteranopia: f32,
    /// `tritanopiaIntensity`
    pub tritanopia: f32,
    /// `protanomalyIntensity`
    pub protanomaly: f32,
    /// `deuteranomalyIntensity`
    pub deuteranomaly: f32,
    /// `tritanomalyIntensity`
    pub tritanomaly: f32,
    /// `achromatopsiaIntensity`
    pub achromatopsia: f32,
    /// `achromatomalyIntensity`
    pub achromatomaly: f32,
    /// `cataractsIntensity`
    pub cataracts: f32,
    /// `glaucomaIntensity`
    pub glaucoma: f32,
    /// `macularDegenerationIntensity`
    pub macular_degeneration: f32,
    /// `retinitisPigmentosaIntensity`
    pub retinitis_pigmentosa: f32,
    /// `diabeticRetinopathyIntensity`
    pub diabetic_retinopathy: f32,
    /// `hemianopiaIntensity`
    pub hemianopia: f32,
    /// `floatersIntensity`
    pub floaters: f32,
    /// `photophobiaIntensity`
    pub photophobia: f32,
    /// `halosIntensity`
    pub halos: f32,
    /// `glareIntensity`
    pub glare: f32,
    /// `nightBlindnessIntensity`
    pub night_blindness: f32,
    /// `xanthopsiaIntensity`
    pub xanthopsia: f32,
    /// `myopiaIntensity`
    pub myopia: f32,
    /// `hyperopiaIntensity`
    pub hyperopia: f32,
    /// `astigmatismIntensity`
    pub astigmatism: f32,
    /// `presbyopiaIntensity`
    pub presbyopia: f32,
    /// Seconds since simulation start.
    pub time: f32,
    /// `diplopiaSeparation` in normalized texture coordinates.
    pub diplopia_separation: f32,
    /// `diplopiaDirection`: 0 horizontal, 1 vertical, 2 diagonal.
    pub diplopia_direction: f32,
    /// Pads the struct to a 16-byte multiple for uniform-buffer use.
    pub _pad: f32,
}

impl UniformSet {
    /// All-zero table (no active effect, t = 0).
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Read the slot for a generic condition.
    pub fn get(&self, condition: Condition) -> f32 {
        match condition {
            Condition::Protanopia => self.protanopia,
            Condition::Deuteranopia => self.deuteranopia,
            Condition::Tritanopia => self.tritanopia,
            Condition::Protanomaly => self.protanomaly,
            Condition::Deuteranomaly => self.deuteranomaly,
            Condition::Tritanomaly => self.tritanomaly,
            Condition::Achromatopsia => self.achromatopsia,
            Condition::Achromatomaly => self.achromatomaly,
            Condition::Cataracts => self.cataracts,
            Condition::Glaucoma => self.glaucoma,
            Condition::MacularDegeneration => self.macular_degeneration,
            Condition::RetinitisPigmentosa => self.retinitis_pigmentosa,
            Condition::DiabeticRetinopathy => self.diabetic_retinopathy,
            Condition::Hemianopia => self.hemianopia,
            Condition::Floaters => self.floaters,
            Condition::Photophobia => self.photophobia,
            Condition::Halos => self.halos,
            Condition::Glare => self.glare,
            Condition::NightBlindness => self.night_blindness,
            Condition::Xanthopsia => self.xanthopsia,
            Condition::Myopia => self.myopia,
            Condition::Hyperopia => self.hyperopia,
            Condition::Astigmatism => self.astigmatism,
            Condition::Presbyopia => self.presbyopia,
        }
    }

    /// Write the slot for a generic condition.
    pub fn set(&mut self, condition: Condition, value: f32) {
        let slot = match condition {
            Condition::Protanopia => &mut self.protanopia,
            Condition::Deuteranopia => &mut self.deuteranopia,
            Condition::Tritanopia => &mut self.tritanopia,
            Condition::Protanomaly => &mut self.protanomaly,
            Condition::Deuteranomaly => &mut self.deuteranomaly,
            Condition::Tritanomaly => &mut self.tritanomaly,
            Condition::Achromatopsia => &mut self.achromatopsia,
            Condition::Achromatomaly => &mut self.achromatomaly,
            Condition::Cataracts => &mut self.cataracts,
            Condition::Glaucoma => &mut self.glaucoma,
            Condition::MacularDegeneration => &mut self.macular_degeneration,
            Condition::RetinitisPigmentosa => &mut self.retinitis_pigmentosa,
            Condition::DiabeticRetinopathy => &mut self.diabetic_retinopathy,
            Condition::Hemianopia => &mut self.hemianopia,
            Condition::Floaters => &mut self.floaters,
            Condition::Photophobia => &mut self.photophobia,
            Condition::Halos => &mut self.halos,
            Condition::Glare => &mut self.glare,
            Condition::NightBlindness => &mut self.night_blindness,
            Condition::Xanthopsia => &mut self.xanthopsia,
            Condition::Myopia => &mut self.myopia,
            Condition::Hyperopia => &mut self.hyperopia,
            Condition::Astigmatism => &mut self.astigmatism,
            Condition::Presbyopia => &mut self.presbyopia,
        };
        *slot = value;
    }

    /// Refresh the table from caller state, in place.
    ///
    /// Every generic slot is rewritten as `enabled ? intensity : 0`; unknown
    /// ids in the effect list are ignored. Compound named-case effects are
    /// expanded by their handlers and merged into the generic slots with a
    /// per-slot maximum. Shared parameters are written last.
    #[tracing::instrument(skip_all)]
    pub fn update(
        &mut self,
        effects: &[EffectState],
        diplopia: DiplopiaSettings,
        time_secs: f32,
    ) {
        let fx = EffectIndex::build(effects);
        self.update_indexed(&fx, diplopia, time_secs);
    }

    /// [`UniformSet::update`] against a prebuilt index, for callers that
    /// already hold one for the frame.
    pub fn update_indexed(
        &mut self,
        fx: &EffectIndex<'_>,
        diplopia: DiplopiaSettings,
        time_secs: f32,
    ) {
        for &c in Condition::ALL {
            self.set(c, fx.intensity(c.id()));
        }

        for &case in crate::catalog::condition::CompoundCase::ALL {
            let contribution = cases::contribution(case, fx);
            for (condition, intensity) in contribution.patch {
                let current = self.get(condition);
                if intensity > current {
                    self.set(condition, intensity);
                }
            }
            // A case at its blindness endpoint saturates the tunnel slot so
            // the program's terminal override fires on this path too.
            if contribution.terminal_black {
                self.set(Condition::Glaucoma, 1.0);
            }
        }

        self.time = time_secs;
        self.diplopia_separation = if diplopia.separation.is_finite() {
            diplopia.separation.max(0.0)
        } else {
            0.0
        };
        self.diplopia_direction = diplopia.direction.as_uniform();
    }

    /// True when any condition with a total-blindness endpoint has reached
    /// full intensity.
    pub fn terminal_black(&self) -> bool {
        Condition::ALL
            .iter()
            .any(|c| c.is_terminal_blindness() && self.get(*c) >= 1.0)
    }

    /// Iterate `(uniform name, value)` pairs for the condition slots plus
    /// the shared parameters, in slot order.
    pub fn named_values(&self) -> Vec<(&'static str, f32)> {
        let mut out: Vec<(&'static str, f32)> = Condition::ALL
            .iter()
            .map(|&c| (c.uniform_name(), self.get(c)))
            .collect();
        out.push(("time", self.time));
        out.push(("diplopiaSeparation", self.diplopia_separation));
        out.push(("diplopiaDirection", self.diplopia_direction));
        out
    }
}

/// Validated name → slot mapping between the condition catalog and the
/// uniform struct.
///
/// A mismatch is a packaging bug and must surface at initialization, not at
/// frame time, so construction checks the catalog and the struct agree on
/// slot count and naming.
#[derive(Debug, Clone)]
pub struct UniformLayout {
    names: Vec<&'static str>,
}

impl UniformLayout {
    /// Build and validate the layout.
    pub fn new() -> VisimResult<Self> {
        let mut names: Vec<&'static str> =
            Condition::ALL.iter().map(|c| c.uniform_name()).collect();

        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        if deduped.len() != names.len() {
            return Err(VisimError::catalog(
                "duplicate uniform names in condition catalog",
            ));
        }

        // Condition slots + time + separation + direction + padding must
        // exactly fill the struct.
        let expected = names.len() + 4;
        if expected != UNIFORM_SLOT_COUNT {
            return Err(VisimError::catalog(format!(
                "uniform struct has {UNIFORM_SLOT_COUNT} slots but the catalog needs {expected}"
            )));
        }
        if std::mem::size_of::<UniformSet>() != UNIFORM_SLOT_COUNT * 4 {
            return Err(VisimError::catalog(
                "UniformSet size disagrees with slot count",
            ));
        }

        names.push("time");
        names.push("diplopiaSeparation");
        names.push("diplopiaDirection");
        Ok(Self { names })
    }

    /// Slot index for a uniform name, if the catalog knows it.
    pub fn slot(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }

    /// All uniform names in slot order (padding excluded).
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::DiplopiaDirection;

    #[test]
    fn struct_size_is_16_byte_aligned_slot_count() {
        assert_eq!(std::mem::size_of::<UniformSet>(), UNIFORM_SLOT_COUNT * 4);
        assert_eq!((UNIFORM_SLOT_COUNT * 4) % 16, 0);
    }

    #[test]
    fn layout_validates_against_catalog() {
        let layout = UniformLayout::new().expect("catalog and struct agree");
        assert_eq!(layout.names().len(), Condition::ALL.len() + 3);
        assert!(layout.slot("protanopiaIntensity").is_some());
        assert!(layout.slot("time").is_some());
        assert!(layout.slot("bogusIntensity").is_none());
    }

    #[test]
    fn update_writes_enabled_intensities_and_zeroes_disabled() {
        let mut u = UniformSet::zeroed();
        let effects = vec![
            EffectState::enabled("glaucoma", 0.6),
            EffectState {
                id: "cataracts".into(),
                enabled: false,
                intensity: 0.9,
            },
        ];
        u.update(&effects, DiplopiaSettings::default(), 1.25);
        assert_eq!(u.glaucoma, 0.6);
        assert_eq!(u.cataracts, 0.0);
        assert_eq!(u.time, 1.25);

        // Disabling later zeroes the previously written slot.
        u.update(&[], DiplopiaSettings::default(), 2.0);
        assert_eq!(u.glaucoma, 0.0);
    }

    #[test]
    fn update_ignores_unknown_ids() {
        let mut u = UniformSet::zeroed();
        u.update(
            &[EffectState::enabled("keratoconus", 1.0)],
            DiplopiaSettings::default(),
            0.0,
        );
        assert_eq!(u, {
            let mut expected = UniformSet::zeroed();
            expected.time = 0.0;
            expected
        });
    }

    #[test]
    fn compound_case_patches_generic_slots_with_max_merge() {
        let mut u = UniformSet::zeroed();
        let effects = vec![
            EffectState::enabled("cataracts", 0.2),
            EffectState::enabled("galileoCataracts", 1.0),
        ];
        u.update(&effects, DiplopiaSettings::default(), 0.0);
        // Case patch (1.0 * weight 0.6) beats the direct 0.2.
        assert!((u.cataracts - 0.6).abs() < 1e-6);
    }

    #[test]
    fn galileo_complete_saturates_terminal_slot() {
        let mut u = UniformSet::zeroed();
        u.update(
            &[EffectState::enabled("galileoComplete", 1.0)],
            DiplopiaSettings::default(),
            0.0,
        );
        assert!(u.terminal_black());
    }

    #[test]
    fn diplopia_parameters_are_written_and_sanitized() {
        let mut u = UniformSet::zeroed();
        u.update(
            &[],
            DiplopiaSettings {
                separation: 0.05,
                direction: DiplopiaDirection::Diagonal,
            },
            0.0,
        );
        assert_eq!(u.diplopia_separation, 0.05);
        assert_eq!(u.diplopia_direction, 2.0);

        u.update(
            &[],
            DiplopiaSettings {
                separation: f32::NAN,
                direction: DiplopiaDirection::Horizontal,
            },
            0.0,
        );
        assert_eq!(u.diplopia_separation, 0.0);
    }
}
