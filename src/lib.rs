//! visim is a deterministic visual impairment simulation engine.
//!
//! Callers describe what a viewer's vision is like (an ordered list of
//! `(condition id, enabled, intensity)` toggles plus double-vision scalars)
//! and visim turns that state into renderer-ready outputs:
//!
//! 1. **Compose (declarative)**: `SimulationState -> FilterChain`, an
//!    ordered list of post-processing primitives for per-element filtering.
//! 2. **Compose (shader)**: `SimulationState -> UniformSet`, a flat uniform
//!    table driving the shared per-pixel program
//!    ([`shade_pixel`]), executed on the CPU ([`CpuBackend`]) or, with the
//!    `gpu` feature, as a wgpu render pass over the mirrored WGSL program.
//! 3. **Overlay**: [`FloaterSim`] and [`field_mask`] emit animated geometry
//!    for effects that are not a per-pixel color function.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Total and deterministic**: every compositor is defined for all
//!   inputs (unknown ids are ignored, severities clamp) and pure given the
//!   same state (only the overlay clock advances).
//! - **Two backends, one semantic model**: both renderers read the same
//!   condition catalog and tuning tables, and the cross-backend tests hold
//!   them to qualitative agreement.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod catalog;
mod chain;
mod color;
mod foundation;
mod overlay;
mod shader;
mod simulation;

pub use catalog::condition::{Category, ChainFamily, CompoundCase, Condition};
pub use catalog::lookup::EffectIndex;
pub use chain::compositor::build_chain;
pub use chain::primitive::{FilterChain, FilterPrimitive};
pub use color::cvd::{
    matrix_for, matrix_for_condition, ramp_for, DEUTERANOMALY_RAMP, DEUTERANOPIA, LUMA_PROJECTION,
    PROTANOMALY_RAMP, PROTANOPIA, TRITANOMALY_RAMP, TRITANOPIA,
};
pub use color::interpolate::SeverityRamp;
pub use color::matrix::ColorMatrix;
pub use foundation::core::{DiplopiaDirection, DiplopiaSettings, EffectState, Frame};
pub use foundation::error::{VisimError, VisimResult};
pub use overlay::floaters::{FloaterSim, SeverityTier, DEFAULT_TICK_INTERVAL_MS};
pub use overlay::mask::{field_mask, FieldLossDirection};
pub use overlay::{OverlayDescriptor, OverlayPrimitive};
pub use shader::cpu::CpuBackend;
pub use shader::program::shade_pixel;
pub use shader::uniforms::{UniformLayout, UniformSet, UNIFORM_SLOT_COUNT};
pub use shader::IMPAIRMENT_WGSL;
pub use simulation::{simulate_frame, SimulationState};

#[cfg(feature = "gpu")]
pub use shader::gpu::{request_device_blocking, GpuPass};
