//! Drifting floater simulation.

use kurbo::Point;

use crate::foundation::math::clamp01;
use crate::overlay::{OverlayDescriptor, OverlayPrimitive};

/// Documented default cadence for overlay ticks, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: f64 = 100.0;

/// Severity tier buckets for the floater field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeverityTier {
    /// intensity < 0.3
    Mild,
    /// intensity < 0.7
    Moderate,
    /// everything above
    Severe,
}

impl SeverityTier {
    /// Bucket an intensity.
    pub fn for_intensity(intensity: f32) -> Self {
        let i = clamp01(intensity);
        if i < 0.3 {
            Self::Mild
        } else if i < 0.7 {
            Self::Moderate
        } else {
            Self::Severe
        }
    }

    /// Fixed primitive cardinality per tier.
    pub const fn primitive_count(self) -> usize {
        match self {
            Self::Mild => 2,
            Self::Moderate => 3,
            Self::Severe => 6,
        }
    }
}

/// Stateful floater field generator.
///
/// The only state is the private elapsed clock; everything else is a pure
/// function of it. Instances are explicit context objects: two side-by-side
/// simulations each own one and cannot interfere.
#[derive(Clone, Debug, Default)]
pub struct FloaterSim {
    elapsed_ms: f64,
    last_clock_ms: Option<f64>,
}

impl FloaterSim {
    /// A generator with zero elapsed time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed animation time in milliseconds (speed already applied).
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Advance the simulation and produce this tick's overlay.
    ///
    /// `clock_ms` is the caller's monotonic clock. While disabled the
    /// generator returns an empty descriptor immediately and resets, so the
    /// next enable restarts from elapsed 0: two enable/disable/enable
    /// cycles of equal duration reproduce identical primitive positions.
    pub fn tick(
        &mut self,
        enabled: bool,
        intensity: f32,
        speed: f32,
        clock_ms: f64,
    ) -> OverlayDescriptor {
        if !enabled {
            self.elapsed_ms = 0.0;
            self.last_clock_ms = None;
            return OverlayDescriptor::empty();
        }

        let delta = match self.last_clock_ms {
            Some(prev) => (clock_ms - prev).max(0.0),
            None => 0.0,
        };
        let speed = if speed.is_finite() { speed.max(0.0) } else { 1.0 };
        self.elapsed_ms += delta * f64::from(speed);
        self.last_clock_ms = Some(clock_ms);

        let i = clamp01(intensity);
        let tier = SeverityTier::for_intensity(i);
        let t = self.elapsed_ms / 1000.0;

        let primitives = (0..tier.primitive_count())
            .map(|k| floater_at(k, t, i))
            .collect();
        OverlayDescriptor { primitives }
    }
}

/// Position and shape of floater `k` at elapsed time `t` seconds.
///
/// Each primitive drifts on a sum of sines and cosines at distinct
/// frequencies, so the field moves smoothly and never repeats exactly
/// within short observation windows.
fn floater_at(k: usize, t: f64, intensity: f32) -> OverlayPrimitive {
    let kf = k as f64;

    let fx1 = 0.071 + 0.013 * kf;
    let fx2 = 0.023 + 0.007 * kf;
    let fy1 = 0.059 + 0.011 * kf;
    let fy2 = 0.031 + 0.005 * kf;
    let phase = kf * 1.947;

    let x = 0.5
        + 0.28 * (t * fx1 + phase).sin()
        + 0.10 * (t * fx2 + phase * 0.5).cos();
    let y = 0.5
        + 0.26 * (t * fy1 + phase * 1.3).cos()
        + 0.11 * (t * fy2 + phase * 0.7).sin();

    let radius = 0.018 + 0.006 * (kf % 3.0);
    let opacity = (0.20 + 0.40 * intensity) * (0.75 + 0.25 * ((kf * 0.77).sin().abs() as f32));

    OverlayPrimitive {
        center: Point::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)),
        radius,
        opacity: clamp01(opacity),
        color: [0.10, 0.10, 0.12, 1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_tick_is_empty_and_resets() {
        let mut sim = FloaterSim::new();
        sim.tick(true, 0.5, 1.0, 0.0);
        sim.tick(true, 0.5, 1.0, 500.0);
        assert!(sim.elapsed_ms() > 0.0);

        let out = sim.tick(false, 0.5, 1.0, 600.0);
        assert!(out.is_empty());
        assert_eq!(sim.elapsed_ms(), 0.0);
    }

    #[test]
    fn tier_cardinalities_match_contract() {
        assert_eq!(SeverityTier::for_intensity(0.1).primitive_count(), 2);
        assert_eq!(SeverityTier::for_intensity(0.3).primitive_count(), 3);
        assert_eq!(SeverityTier::for_intensity(0.69).primitive_count(), 3);
        assert_eq!(SeverityTier::for_intensity(0.7).primitive_count(), 6);
        assert_eq!(SeverityTier::for_intensity(1.0).primitive_count(), 6);
    }

    #[test]
    fn equal_cycles_reproduce_identical_positions() {
        let run = |start_ms: f64| {
            let mut sim = FloaterSim::new();
            let mut last = OverlayDescriptor::empty();
            for step in 0..5 {
                last = sim.tick(true, 0.8, 1.0, start_ms + step as f64 * 100.0);
            }
            sim.tick(false, 0.8, 1.0, start_ms + 600.0);
            last
        };
        // Same cycle length at different absolute clocks: identical output,
        // because only elapsed time matters.
        assert_eq!(run(0.0), run(12_345.0));
    }

    #[test]
    fn speed_scales_elapsed_time() {
        let mut slow = FloaterSim::new();
        slow.tick(true, 0.5, 0.5, 0.0);
        slow.tick(true, 0.5, 0.5, 1000.0);

        let mut fast = FloaterSim::new();
        fast.tick(true, 0.5, 2.0, 0.0);
        fast.tick(true, 0.5, 2.0, 1000.0);

        assert_eq!(slow.elapsed_ms(), 500.0);
        assert_eq!(fast.elapsed_ms(), 2000.0);
    }

    #[test]
    fn drift_is_smooth_between_adjacent_ticks() {
        let mut sim = FloaterSim::new();
        let a = sim.tick(true, 0.9, 1.0, 0.0);
        let b = sim.tick(true, 0.9, 1.0, DEFAULT_TICK_INTERVAL_MS);
        for (pa, pb) in a.primitives.iter().zip(b.primitives.iter()) {
            let dx = (pa.center.x - pb.center.x).abs();
            let dy = (pa.center.y - pb.center.y).abs();
            assert!(dx < 0.05 && dy < 0.05, "floater teleported: {dx},{dy}");
        }
    }

    #[test]
    fn positions_stay_in_normalized_range() {
        let mut sim = FloaterSim::new();
        for step in 0..200 {
            let out = sim.tick(true, 1.0, 4.0, step as f64 * 100.0);
            for p in &out.primitives {
                assert!((0.0..=1.0).contains(&p.center.x));
                assert!((0.0..=1.0).contains(&p.center.y));
                assert!(p.opacity >= 0.0 && p.opacity <= 1.0);
            }
        }
    }
}
