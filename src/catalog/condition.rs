//! Static condition catalog.
//!
//! Maps condition identifiers to their clinical category, their filter-chain
//! family (the priority bucket used by the chain compositor), their shader
//! uniform name, and the terminal-blindness flag. The catalog is the single
//! source of truth both renderer backends are validated against.

/// Clinical category of a condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Complete absence of one cone class; binary, severity blends with
    /// normal vision.
    Dichromatic,
    /// Shifted (not absent) cone sensitivity; continuous severity.
    AnomalousTrichromatic,
    /// Complete or partial color blindness, modeled as luminance projection.
    Achromatic,
    /// Media/refractive conditions expressed as blur and tonal shifts.
    Optical,
    /// Loss of part of the visual field.
    FieldLoss,
    /// Effects that displace or occlude rather than recolor.
    SpatialDistortion,
}

/// Priority bucket used by the filter-chain compositor.
///
/// Families are appended in declaration order: color vision first, then
/// optical blur, then compound named cases, then generic symptom filters,
/// then refractive filters. The order is part of the output contract because
/// the primitives do not commute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainFamily {
    /// Mutually exclusive color-vision deficiencies (first enabled wins).
    ColorVision,
    /// Media opacity blur (cataracts).
    OpticalBlur,
    /// Generic symptom filters (field loss, light sensitivity, ...).
    Symptom,
    /// Refractive errors.
    Refractive,
}

/// A generic condition known to the engine.
///
/// Compound named-case identifiers (e.g. `galileo*`) are not listed here;
/// they expand onto these generics via [`crate::chain::cases`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    /// L-cone absence.
    Protanopia,
    /// M-cone absence.
    Deuteranopia,
    /// S-cone absence.
    Tritanopia,
    /// Shifted L-cone sensitivity.
    Protanomaly,
    /// Shifted M-cone sensitivity.
    Deuteranomaly,
    /// Shifted S-cone sensitivity.
    Tritanomaly,
    /// Complete color blindness.
    Achromatopsia,
    /// Partial color blindness.
    Achromatomaly,
    /// Lens opacification.
    Cataracts,
    /// Peripheral field loss progressing to tunnel vision.
    Glaucoma,
    /// Central scotoma.
    MacularDegeneration,
    /// Tunnel vision with night blindness.
    RetinitisPigmentosa,
    /// Scattered scotomas from retinal damage.
    DiabeticRetinopathy,
    /// Loss of half the visual field.
    Hemianopia,
    /// Drifting vitreous debris.
    Floaters,
    /// Painful light sensitivity.
    Photophobia,
    /// Rings around light sources.
    Halos,
    /// Veiling luminance washout.
    Glare,
    /// Reduced vision in low light.
    NightBlindness,
    /// Yellow-tinted vision (chromatopsia).
    Xanthopsia,
    /// Near-sightedness.
    Myopia,
    /// Far-sightedness.
    Hyperopia,
    /// Directional defocus.
    Astigmatism,
    /// Age-related loss of accommodation.
    Presbyopia,
}

impl Condition {
    /// Every generic condition, in catalog order.
    ///
    /// Catalog order is the iteration order of both compositors, so it is
    /// stable and documented rather than derived.
    pub const ALL: &[Condition] = &[
        Condition::Protanopia,
        Condition::Deuteranopia,
        Condition::Tritanopia,
        Condition::Protanomaly,
        Condition::Deuteranomaly,
        Condition::Tritanomaly,
        Condition::Achromatopsia,
        Condition::Achromatomaly,
        Condition::Cataracts,
        Condition::Glaucoma,
        Condition::MacularDegeneration,
        Condition::RetinitisPigmentosa,
        Condition::DiabeticRetinopathy,
        Condition::Hemianopia,
        Condition::Floaters,
        Condition::Photophobia,
        Condition::Halos,
        Condition::Glare,
        Condition::NightBlindness,
        Condition::Xanthopsia,
        Condition::Myopia,
        Condition::Hyperopia,
        Condition::Astigmatism,
        Condition::Presbyopia,
    ];

    /// The mutually exclusive color-vision family, in first-wins order.
    pub const COLOR_VISION: &[Condition] = &[
        Condition::Protanopia,
        Condition::Deuteranopia,
        Condition::Tritanopia,
        Condition::Protanomaly,
        Condition::Deuteranomaly,
        Condition::Tritanomaly,
        Condition::Achromatopsia,
        Condition::Achromatomaly,
    ];

    /// Canonical identifier string.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
            Self::Protanomaly => "protanomaly",
            Self::Deuteranomaly => "deuteranomaly",
            Self::Tritanomaly => "tritanomaly",
            Self::Achromatopsia => "achromatopsia",
            Self::Achromatomaly => "achromatomaly",
            Self::Cataracts => "cataracts",
            Self::Glaucoma => "glaucoma",
            Self::MacularDegeneration => "macularDegeneration",
            Self::RetinitisPigmentosa => "retinitisPigmentosa",
            Self::DiabeticRetinopathy => "diabeticRetinopathy",
            Self::Hemianopia => "hemianopia",
            Self::Floaters => "floaters",
            Self::Photophobia => "photophobia",
            Self::Halos => "halos",
            Self::Glare => "glare",
            Self::NightBlindness => "nightBlindness",
            Self::Xanthopsia => "xanthopsia",
            Self::Myopia => "myopia",
            Self::Hyperopia => "hyperopia",
            Self::Astigmatism => "astigmatism",
            Self::Presbyopia => "presbyopia",
        }
    }

    /// Shader uniform slot name (`<id>Intensity`).
    pub const fn uniform_name(self) -> &'static str {
        match self {
            Self::Protanopia => "protanopiaIntensity",
            Self::Deuteranopia => "deuteranopiaIntensity",
            Self::Tritanopia => "tritanopiaIntensity",
            Self::Protanomaly => "protanomalyIntensity",
            Self::Deuteranomaly => "deuteranomalyIntensity",
            Self::Tritanomaly => "tritanomalyIntensity",
            Self::Achromatopsia => "achromatopsiaIntensity",
            Self::Achromatomaly => "achromatomalyIntensity",
            Self::Cataracts => "cataractsIntensity",
            Self::Glaucoma => "glaucomaIntensity",
            Self::MacularDegeneration => "macularDegenerationIntensity",
            Self::RetinitisPigmentosa => "retinitisPigmentosaIntensity",
            Self::DiabeticRetinopathy => "diabeticRetinopathyIntensity",
            Self::Hemianopia => "hemianopiaIntensity",
            Self::Floaters => "floatersIntensity",
            Self::Photophobia => "photophobiaIntensity",
            Self::Halos => "halosIntensity",
            Self::Glare => "glareIntensity",
            Self::NightBlindness => "nightBlindnessIntensity",
            Self::Xanthopsia => "xanthopsiaIntensity",
            Self::Myopia => "myopiaIntensity",
            Self::Hyperopia => "hyperopiaIntensity",
            Self::Astigmatism => "astigmatismIntensity",
            Self::Presbyopia => "presbyopiaIntensity",
        }
    }

    /// Clinical category.
    pub const fn category(self) -> Category {
        match self {
            Self::Protanopia | Self::Deuteranopia | Self::Tritanopia => Category::Dichromatic,
            Self::Protanomaly | Self::Deuteranomaly | Self::Tritanomaly => {
                Category::AnomalousTrichromatic
            }
            Self::Achromatopsia | Self::Achromatomaly => Category::Achromatic,
            Self::Cataracts
            | Self::Photophobia
            | Self::Halos
            | Self::Glare
            | Self::NightBlindness
            | Self::Xanthopsia
            | Self::Myopia
            | Self::Hyperopia
            | Self::Astigmatism
            | Self::Presbyopia => Category::Optical,
            Self::Glaucoma
            | Self::MacularDegeneration
            | Self::RetinitisPigmentosa
            | Self::DiabeticRetinopathy
            | Self::Hemianopia => Category::FieldLoss,
            Self::Floaters => Category::SpatialDistortion,
        }
    }

    /// Filter-chain priority family.
    pub const fn family(self) -> ChainFamily {
        match self {
            Self::Protanopia
            | Self::Deuteranopia
            | Self::Tritanopia
            | Self::Protanomaly
            | Self::Deuteranomaly
            | Self::Tritanomaly
            | Self::Achromatopsia
            | Self::Achromatomaly => ChainFamily::ColorVision,
            Self::Cataracts => ChainFamily::OpticalBlur,
            Self::Glaucoma
            | Self::MacularDegeneration
            | Self::RetinitisPigmentosa
            | Self::DiabeticRetinopathy
            | Self::Hemianopia
            | Self::Floaters
            | Self::Photophobia
            | Self::Halos
            | Self::Glare
            | Self::NightBlindness
            | Self::Xanthopsia => ChainFamily::Symptom,
            Self::Myopia | Self::Hyperopia | Self::Astigmatism | Self::Presbyopia => {
                ChainFamily::Refractive
            }
        }
    }

    /// True when the clinical endpoint of the condition is total blindness.
    ///
    /// At intensity >= 1 such a condition forces pure black output on every
    /// backend, superseding all other stages.
    pub const fn is_terminal_blindness(self) -> bool {
        matches!(self, Self::Glaucoma | Self::RetinitisPigmentosa)
    }

    /// Parse a caller identifier. Unknown identifiers return `None` and are
    /// ignored by every compositor.
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.id() == id || c.id().eq_ignore_ascii_case(id))
    }
}

/// Compound named-case namespaces.
///
/// Each case bundles several primitive effects under one identifier prefix,
/// reconstructing a documented historical/clinical syndrome. Handlers live
/// in [`crate::chain::cases`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompoundCase {
    /// Galileo Galilei: chronic uveitis with secondary glaucoma and
    /// cataracts, ending in total blindness.
    Galileo,
    /// Claude Monet: bilateral brunescent cataracts, 1912–1922.
    Monet,
    /// Vincent van Gogh: xanthopsia and coronas attributed to digitalis.
    VanGogh,
}

impl CompoundCase {
    /// Every compound case, in catalog order.
    pub const ALL: &[CompoundCase] = &[
        CompoundCase::Galileo,
        CompoundCase::Monet,
        CompoundCase::VanGogh,
    ];

    /// Identifier namespace prefix for this case.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Galileo => "galileo",
            Self::Monet => "monet",
            Self::VanGogh => "vanGogh",
        }
    }

    /// The aggregate identifier that supersedes the case's constituents
    /// when enabled.
    pub const fn aggregate_id(self) -> &'static str {
        match self {
            Self::Galileo => "galileoComplete",
            Self::Monet => "monetCataractsProgression",
            Self::VanGogh => "vanGoghComplete",
        }
    }

    /// Route an identifier to its case by namespace prefix.
    pub fn for_id(id: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|case| id.starts_with(case.prefix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_ids_roundtrip() {
        for &c in Condition::ALL {
            assert_eq!(Condition::parse(c.id()), Some(c), "{}", c.id());
        }
    }

    #[test]
    fn parse_is_case_insensitive_but_rejects_unknown() {
        assert_eq!(
            Condition::parse("maculardegeneration"),
            Some(Condition::MacularDegeneration)
        );
        assert_eq!(Condition::parse("keratoconus"), None);
        assert_eq!(Condition::parse(""), None);
    }

    #[test]
    fn uniform_names_follow_id_intensity_convention() {
        for &c in Condition::ALL {
            let expected = format!("{}Intensity", c.id());
            assert_eq!(c.uniform_name(), expected);
        }
    }

    #[test]
    fn color_vision_family_matches_family_tags() {
        for &c in Condition::COLOR_VISION {
            assert_eq!(c.family(), ChainFamily::ColorVision);
        }
        let tagged = Condition::ALL
            .iter()
            .filter(|c| c.family() == ChainFamily::ColorVision)
            .count();
        assert_eq!(tagged, Condition::COLOR_VISION.len());
    }

    #[test]
    fn terminal_conditions_are_field_loss() {
        for &c in Condition::ALL {
            if c.is_terminal_blindness() {
                assert_eq!(c.category(), Category::FieldLoss);
            }
        }
    }

    #[test]
    fn compound_prefix_routing() {
        assert_eq!(
            CompoundCase::for_id("galileoGlaucoma"),
            Some(CompoundCase::Galileo)
        );
        assert_eq!(
            CompoundCase::for_id("monetCataractsProgression"),
            Some(CompoundCase::Monet)
        );
        assert_eq!(CompoundCase::for_id("vanGoghXanthopsia"), Some(CompoundCase::VanGogh));
        assert_eq!(CompoundCase::for_id("glaucoma"), None);
    }
}
