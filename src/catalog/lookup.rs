//! O(1) effect lookup.
//!
//! Every compositor probes many independent condition ids per call; building
//! one map up front avoids repeated linear scans over the caller's effect
//! list.

use std::collections::HashMap;

use crate::foundation::core::EffectState;

/// Index from condition id to its current state.
///
/// Borrow-only: the index never clones or mutates the caller's effects.
#[derive(Debug)]
pub struct EffectIndex<'a> {
    by_id: HashMap<&'a str, &'a EffectState>,
}

impl<'a> EffectIndex<'a> {
    /// Build the index in O(n). The input is ordered; for duplicated ids the
    /// first occurrence wins, consistent with the chain compositor's
    /// first-wins policy.
    pub fn build(effects: &'a [EffectState]) -> Self {
        let mut by_id = HashMap::with_capacity(effects.len());
        for e in effects {
            by_id.entry(e.id.as_str()).or_insert(e);
        }
        Self { by_id }
    }

    /// O(1) lookup by id.
    pub fn get(&self, id: &str) -> Option<&'a EffectState> {
        self.by_id.get(id).copied()
    }

    /// Effective intensity for `id`: clamped severity while enabled, else 0.
    /// Unknown ids read as 0.
    pub fn intensity(&self, id: &str) -> f32 {
        self.get(id).map(EffectState::effective_intensity).unwrap_or(0.0)
    }

    /// True when `id` is present and enabled.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.get(id).is_some_and(|e| e.enabled)
    }
}
