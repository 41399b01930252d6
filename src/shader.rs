//! The shader compositor: uniform table, shared per-pixel program, and the
//! CPU/GPU backends that execute it.

pub mod cpu;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod program;
pub mod uniforms;

/// WGSL source of the per-pixel program, mirrored from
/// [`program::shade_pixel`].
pub const IMPAIRMENT_WGSL: &str = include_str!("shader/impairment.wgsl");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::condition::Condition;

    #[test]
    fn wgsl_declares_entry_points_and_uniform_struct() {
        assert!(IMPAIRMENT_WGSL.contains("fn vs_main"));
        assert!(IMPAIRMENT_WGSL.contains("fn fs_main"));
        assert!(IMPAIRMENT_WGSL.contains("struct Uniforms"));
        assert!(IMPAIRMENT_WGSL.contains("var<uniform> u: Uniforms"));
    }

    #[test]
    fn wgsl_has_a_field_for_every_generic_condition() {
        for &c in Condition::ALL {
            let base = c
                .uniform_name()
                .strip_suffix("Intensity")
                .unwrap()
                .chars()
                .map(|ch| {
                    if ch.is_ascii_uppercase() {
                        format!("_{}", ch.to_ascii_lowercase())
                    } else {
                        ch.to_string()
                    }
                })
                .collect::<String>();
            assert!(
                IMPAIRMENT_WGSL.contains(&format!("{base}: f32")),
                "missing WGSL field for '{}'",
                c.id()
            );
        }
    }

    #[test]
    fn wgsl_carries_shared_parameters_and_endpoint_matrices() {
        assert!(IMPAIRMENT_WGSL.contains("time: f32"));
        assert!(IMPAIRMENT_WGSL.contains("diplopia_separation: f32"));
        assert!(IMPAIRMENT_WGSL.contains("diplopia_direction: f32"));
        // Spot-check the protanopia endpoint constants survived verbatim.
        assert!(IMPAIRMENT_WGSL.contains("0.152286"));
        assert!(IMPAIRMENT_WGSL.contains("1.051998"));
    }

    #[test]
    fn wgsl_terminal_override_references_both_terminal_conditions() {
        assert!(IMPAIRMENT_WGSL.contains("u.glaucoma >= 1.0"));
        assert!(IMPAIRMENT_WGSL.contains("u.retinitis_pigmentosa >= 1.0"));
    }
}
