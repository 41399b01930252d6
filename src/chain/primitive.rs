//! Declarative filter primitives.
//!
//! A [`FilterChain`] is an ordered list of post-processing stages for the
//! declarative (per-element) renderer backend. Order is significant: the
//! stages do not commute, so the chain preserves exactly the order the
//! compositor appended them in. The contract is the primitive list;
//! [`FilterChain::to_filter_string`] is a convenience encoding for consumers
//! that speak a CSS-like filter syntax.

use crate::color::matrix::ColorMatrix;

/// One declarative post-processing stage.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterPrimitive {
    /// Gaussian blur with the given radius in pixels.
    Blur {
        /// Blur radius in pixels.
        radius_px: f32,
    },
    /// Brightness scale; 100 is identity.
    Brightness {
        /// Percentage, 100 = unchanged.
        pct: f32,
    },
    /// Contrast scale; 100 is identity.
    Contrast {
        /// Percentage, 100 = unchanged.
        pct: f32,
    },
    /// Saturation scale; 100 is identity.
    Saturate {
        /// Percentage, 100 = unchanged.
        pct: f32,
    },
    /// Hue rotation in degrees; 0 is identity.
    HueRotate {
        /// Degrees of rotation.
        deg: f32,
    },
    /// Sepia toning; 0 is identity.
    Sepia {
        /// Percentage, 0 = unchanged.
        pct: f32,
    },
    /// A referenced 3×3 color matrix operator.
    ColorMatrixRef {
        /// The transform to apply.
        matrix: ColorMatrix,
    },
}

impl FilterPrimitive {
    /// True when the stage would not change any pixel.
    pub fn is_identity(&self) -> bool {
        match self {
            Self::Blur { radius_px } => *radius_px == 0.0,
            Self::Brightness { pct } | Self::Contrast { pct } | Self::Saturate { pct } => {
                *pct == 100.0
            }
            Self::HueRotate { deg } => *deg == 0.0,
            Self::Sepia { pct } => *pct == 0.0,
            Self::ColorMatrixRef { matrix } => matrix.is_identity(),
        }
    }

    fn write_filter(&self, out: &mut String) {
        use std::fmt::Write as _;
        match self {
            Self::Blur { radius_px } => {
                let _ = write!(out, "blur({radius_px:.2}px)");
            }
            Self::Brightness { pct } => {
                let _ = write!(out, "brightness({pct:.1}%)");
            }
            Self::Contrast { pct } => {
                let _ = write!(out, "contrast({pct:.1}%)");
            }
            Self::Saturate { pct } => {
                let _ = write!(out, "saturate({pct:.1}%)");
            }
            Self::HueRotate { deg } => {
                let _ = write!(out, "hue-rotate({deg:.1}deg)");
            }
            Self::Sepia { pct } => {
                let _ = write!(out, "sepia({pct:.1}%)");
            }
            Self::ColorMatrixRef { matrix } => {
                out.push_str("color-matrix(");
                for (i, v) in matrix.0.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    let _ = write!(out, "{v:.6}");
                }
                out.push(')');
            }
        }
    }
}

/// An ordered list of filter primitives.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterChain(
    /// Stages in append order.
    pub Vec<FilterPrimitive>,
);

impl FilterChain {
    /// An empty (identity) chain.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// True when applying the chain would not change any pixel: either no
    /// stages at all, or only explicit identity-equivalent stages.
    pub fn is_identity(&self) -> bool {
        self.0.iter().all(FilterPrimitive::is_identity)
    }

    /// The first color-matrix operator in the chain, if any.
    pub fn color_matrix(&self) -> Option<&ColorMatrix> {
        self.0.iter().find_map(|p| match p {
            FilterPrimitive::ColorMatrixRef { matrix } => Some(matrix),
            _ => None,
        })
    }

    /// Encode the chain as a single space-separated filter description
    /// string in appended order.
    pub fn to_filter_string(&self) -> String {
        let mut out = String::new();
        for p in &self.0 {
            if !out.is_empty() {
                out.push(' ');
            }
            p.write_filter(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_detection_per_primitive() {
        assert!(FilterPrimitive::Blur { radius_px: 0.0 }.is_identity());
        assert!(FilterPrimitive::Brightness { pct: 100.0 }.is_identity());
        assert!(FilterPrimitive::Sepia { pct: 0.0 }.is_identity());
        assert!(
            FilterPrimitive::ColorMatrixRef {
                matrix: ColorMatrix::IDENTITY
            }
            .is_identity()
        );
        assert!(!FilterPrimitive::Brightness { pct: 40.0 }.is_identity());
    }

    #[test]
    fn chain_of_identity_stages_is_identity() {
        let chain = FilterChain(vec![
            FilterPrimitive::Saturate { pct: 100.0 },
            FilterPrimitive::Blur { radius_px: 0.0 },
        ]);
        assert!(chain.is_identity());
        assert!(FilterChain::empty().is_identity());
    }

    #[test]
    fn filter_string_preserves_order() {
        let chain = FilterChain(vec![
            FilterPrimitive::Blur { radius_px: 2.5 },
            FilterPrimitive::Brightness { pct: 80.0 },
            FilterPrimitive::HueRotate { deg: -8.0 },
        ]);
        assert_eq!(
            chain.to_filter_string(),
            "blur(2.50px) brightness(80.0%) hue-rotate(-8.0deg)"
        );
    }

    #[test]
    fn color_matrix_encoding_has_nine_cells() {
        let chain = FilterChain(vec![FilterPrimitive::ColorMatrixRef {
            matrix: ColorMatrix::IDENTITY,
        }]);
        let s = chain.to_filter_string();
        assert!(s.starts_with("color-matrix("));
        assert_eq!(s.matches(' ').count(), 8);
    }
}
