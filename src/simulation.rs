//! Caller state and the one-shot simulation facade.

use crate::chain::compositor::build_chain;
use crate::chain::primitive::FilterChain;
use crate::foundation::core::{DiplopiaSettings, EffectState, Frame};
use crate::foundation::error::{VisimError, VisimResult};
use crate::shader::cpu::CpuBackend;
use crate::shader::uniforms::UniformSet;

fn default_overlay_speed() -> f32 {
    1.0
}

/// The full caller-supplied simulation state.
///
/// This is the JSON interchange surface: an ordered effect list, the shared
/// diplopia scalars, and the overlay animation speed. The engine never
/// mutates it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimulationState {
    /// Ordered condition toggles.
    pub effects: Vec<EffectState>,
    /// Double-vision parameters.
    #[serde(default)]
    pub diplopia: DiplopiaSettings,
    /// Overlay animation speed multiplier.
    #[serde(default = "default_overlay_speed")]
    pub overlay_speed: f32,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            effects: Vec::new(),
            diplopia: DiplopiaSettings::default(),
            overlay_speed: default_overlay_speed(),
        }
    }
}

impl SimulationState {
    /// Validate caller data.
    ///
    /// Unknown condition ids are allowed (and later ignored); what is
    /// rejected is structurally broken data: empty ids, non-finite numbers,
    /// negative speeds.
    pub fn validate(&self) -> VisimResult<()> {
        for (idx, e) in self.effects.iter().enumerate() {
            if e.id.trim().is_empty() {
                return Err(VisimError::validation(format!(
                    "effect #{idx} has an empty id"
                )));
            }
            if !e.intensity.is_finite() {
                return Err(VisimError::validation(format!(
                    "effect '{}' intensity must be finite",
                    e.id
                )));
            }
        }
        self.diplopia.validate()?;
        if !self.overlay_speed.is_finite() || self.overlay_speed < 0.0 {
            return Err(VisimError::validation(
                "overlay_speed must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON state document.
    pub fn from_json_str(json: &str) -> VisimResult<Self> {
        let state: Self = serde_json::from_str(json)
            .map_err(|e| VisimError::validation(format!("state JSON: {e}")))?;
        state.validate()?;
        Ok(state)
    }

    /// The filter chain for this state.
    pub fn to_filter_chain(&self) -> FilterChain {
        build_chain(&self.effects)
    }

    /// The uniform table for this state at `time_secs`.
    pub fn to_uniforms(&self, time_secs: f32) -> UniformSet {
        let mut u = UniformSet::zeroed();
        u.update(&self.effects, self.diplopia, time_secs);
        u
    }
}

/// Validate, compose, and apply the per-pixel program to one frame.
///
/// This is the primary "one-shot" API for producing simulated pixels:
/// 1. [`SimulationState::validate`]
/// 2. [`SimulationState::to_uniforms`]
/// 3. [`CpuBackend::render`]
#[tracing::instrument(skip_all, fields(effects = state.effects.len()))]
pub fn simulate_frame(
    state: &SimulationState,
    time_secs: f32,
    backend: &CpuBackend,
    frame: &mut Frame,
) -> VisimResult<()> {
    state.validate()?;
    let uniforms = state.to_uniforms(time_secs);
    backend.render(&uniforms, frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip_with_defaults() {
        let state = SimulationState::from_json_str(
            r#"{ "effects": [ { "id": "protanopia", "enabled": true, "intensity": 1.0 } ] }"#,
        )
        .unwrap();
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.overlay_speed, 1.0);
        assert_eq!(state.diplopia.separation, 0.0);
    }

    #[test]
    fn validation_rejects_broken_data() {
        let state = SimulationState {
            effects: vec![EffectState::enabled("", 0.5)],
            ..SimulationState::default()
        };
        assert!(state.validate().is_err());

        let state = SimulationState {
            effects: vec![EffectState::enabled("glaucoma", f32::INFINITY)],
            ..SimulationState::default()
        };
        assert!(state.validate().is_err());

        let state = SimulationState {
            overlay_speed: -1.0,
            ..SimulationState::default()
        };
        assert!(state.validate().is_err());
    }

    #[test]
    fn unknown_ids_validate_but_do_not_contribute() {
        let state = SimulationState {
            effects: vec![EffectState::enabled("futureCondition", 0.8)],
            ..SimulationState::default()
        };
        state.validate().unwrap();
        assert!(state.to_filter_chain().is_identity());
    }

    #[test]
    fn simulate_frame_runs_end_to_end() {
        let state = SimulationState {
            effects: vec![EffectState::enabled("deuteranopia", 1.0)],
            ..SimulationState::default()
        };
        let backend = CpuBackend::new().unwrap();
        let mut frame = Frame::new(8, 8).unwrap();
        // Saturated red shifts strongly under deuteranopia.
        for px in frame.data.chunks_exact_mut(4) {
            px[0] = 255;
        }
        simulate_frame(&state, 0.0, &backend, &mut frame).unwrap();
        let px = &frame.data[..4];
        assert!(px[1] > 30, "red leaks into green under deuteranopia");
    }
}
