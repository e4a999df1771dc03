//! Phase-to-radius mapping for the driven bubble.

use std::f64::consts::PI;

use crate::config::BubbleConfig;

/// Fraction of each drive cycle spent expanding.
pub const EXPANSION_FRACTION: f64 = 0.9;
/// Fraction of each drive cycle spent collapsing.
pub const COLLAPSE_FRACTION: f64 = 0.1;

/// Which half of the drive cycle a sample falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclePhase {
    Expansion,
    Collapse,
}

impl CyclePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            CyclePhase::Expansion => "expansion",
            CyclePhase::Collapse => "collapse",
        }
    }
}

/// Bubble radius at one instant, with the phase bookkeeping that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveformSample {
    /// Time since the start of the current drive cycle (seconds)
    pub t_in_period_s: f64,
    /// Drive period (seconds)
    pub period_s: f64,
    pub phase: CyclePhase,
    /// Bubble radius (mm)
    pub radius_mm: f64,
}

/// Trait for anything that can report the bubble radius at a given time.
///
/// The model only needs the radius and the cycle phase; heating and
/// emission are derived from those downstream. A numerical bubble-wall
/// integrator can implement this trait in place of the closed-form curve.
pub trait WaveformProvider {
    fn sample(&self, config: &BubbleConfig, elapsed_s: f64) -> WaveformSample;
}

/// Closed-form periodic radius curve.
///
/// ```text
/// expansion (t < 0.9 T):  R = R0 * (1 + sin(pi * t / T))
/// collapse  (t >= 0.9 T): R = R0 * (1 - 0.5 * sin(pi * (t - 0.9 T) / (0.1 T)))
/// ```
///
/// where `t = elapsed mod T`. The curve is memoryless: it depends only on
/// elapsed time and the configured parameters.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParametricWaveform;

impl WaveformProvider for ParametricWaveform {
    fn sample(&self, config: &BubbleConfig, elapsed_s: f64) -> WaveformSample {
        let period = config.period_s();
        // f64 `%` truncates like C fmod, so the result keeps the sign of elapsed_s
        let t_in_period = elapsed_s % period;
        let r0 = config.ambient_radius_mm;

        if t_in_period < period * EXPANSION_FRACTION {
            WaveformSample {
                t_in_period_s: t_in_period,
                period_s: period,
                phase: CyclePhase::Expansion,
                radius_mm: r0 * (1.0 + (t_in_period / period * PI).sin()),
            }
        } else {
            let collapse_window = period * COLLAPSE_FRACTION;
            let into_collapse = t_in_period - period * EXPANSION_FRACTION;
            WaveformSample {
                t_in_period_s: t_in_period,
                period_s: period,
                phase: CyclePhase::Collapse,
                radius_mm: r0 * (1.0 - 0.5 * (into_collapse / collapse_window * PI).sin()),
            }
        }
    }
}
