//! Bubble dynamics state machine.

use crate::config::{BubbleConfig, ReconfigurePolicy};
use crate::emission::{EmissionModel, ExponentialEmission, collapse_heating};
use crate::error::SimResult;
use crate::waveform::{CyclePhase, ParametricWaveform, WaveformProvider};

/// Fixed simulation step (seconds): one frame at 60 updates per second.
pub const FRAME_DT_S: f64 = 1.0 / 60.0;

/// Mutable state of one bubble.
///
/// Temperature and light are recomputed from scratch on every step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BubbleState {
    /// Elapsed simulation time (seconds)
    pub elapsed_s: f64,
    /// Number of steps taken since the clock last started
    pub steps: u64,
    /// Current bubble radius (mm)
    pub radius_mm: f64,
    /// Peak gas temperature for the current step (K)
    pub peak_temperature_k: f64,
    /// Emitted light for the current step (dimensionless)
    pub light_intensity: f64,
    /// Cycle phase of the last step, `None` before the first step
    pub phase: Option<CyclePhase>,
}

/// Advance a bubble by one fixed frame.
///
/// Pure function of the configuration and the previous state: the only
/// thing carried forward is the clock. Expansion steps are dark and cold;
/// collapse steps heat and emit only when the radius drops below half the
/// rest radius.
pub fn advance<W, E>(
    config: &BubbleConfig,
    state: &BubbleState,
    waveform: &W,
    emission: &E,
) -> BubbleState
where
    W: WaveformProvider + ?Sized,
    E: EmissionModel + ?Sized,
{
    let elapsed_s = state.elapsed_s + FRAME_DT_S;
    let sample = waveform.sample(config, elapsed_s);

    let (peak_temperature_k, light_intensity) = match sample.phase {
        CyclePhase::Expansion => (0.0, 0.0),
        CyclePhase::Collapse => {
            match collapse_heating(config.ambient_radius_mm, sample.radius_mm) {
                Some(t) => (t, emission.intensity(t)),
                None => (0.0, 0.0),
            }
        }
    };

    BubbleState {
        elapsed_s,
        steps: state.steps + 1,
        radius_mm: sample.radius_mm,
        peak_temperature_k,
        light_intensity,
        phase: Some(sample.phase),
    }
}

/// Driven bubble: parameters, state, and the waveform and emission models.
///
/// Built with zeroed parameters; callers configure before stepping. All
/// inputs are accepted by `configure`, including ones that make the
/// arithmetic degenerate (see [`BubbleConfig::validate`] for the strict path).
#[derive(Clone, Debug)]
pub struct BubbleDynamicsModel<W = ParametricWaveform, E = ExponentialEmission> {
    config: BubbleConfig,
    state: BubbleState,
    waveform: W,
    emission: E,
}

impl BubbleDynamicsModel {
    pub fn new() -> Self {
        Self::with_parts(ParametricWaveform, ExponentialEmission::default())
    }
}

impl Default for BubbleDynamicsModel {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: WaveformProvider, E: EmissionModel> BubbleDynamicsModel<W, E> {
    /// Zeroed model using the given waveform and emission models.
    pub fn with_parts(waveform: W, emission: E) -> Self {
        Self {
            config: BubbleConfig::zeroed(),
            state: BubbleState::default(),
            waveform,
            emission,
        }
    }

    /// Store all five parameters and reset the radius to the rest radius.
    ///
    /// Elapsed time is kept.
    pub fn configure(
        &mut self,
        frequency_hz: f64,
        pressure_atm: f64,
        ambient_radius_mm: f64,
        gas: &str,
        liquid: &str,
    ) {
        let config = BubbleConfig::new(frequency_hz, pressure_atm, ambient_radius_mm, gas, liquid);
        self.configure_with(config, ReconfigurePolicy::PreserveClock);
    }

    /// Replace the configuration, restarting the clock if the policy asks for it.
    pub fn configure_with(&mut self, config: BubbleConfig, policy: ReconfigurePolicy) {
        let (elapsed_s, steps) = match policy {
            ReconfigurePolicy::PreserveClock => (self.state.elapsed_s, self.state.steps),
            ReconfigurePolicy::RestartClock => (0.0, 0),
        };
        self.state = BubbleState {
            elapsed_s,
            steps,
            radius_mm: config.ambient_radius_mm,
            peak_temperature_k: 0.0,
            light_intensity: 0.0,
            phase: None,
        };
        self.config = config;
    }

    /// Validate, then configure. The model is untouched on error.
    pub fn try_configure(
        &mut self,
        config: BubbleConfig,
        policy: ReconfigurePolicy,
    ) -> SimResult<()> {
        config.validate()?;
        self.configure_with(config, policy);
        Ok(())
    }

    /// Advance the simulation by one frame of [`FRAME_DT_S`].
    pub fn advance_step(&mut self) {
        self.state = advance(&self.config, &self.state, &self.waveform, &self.emission);
    }

    pub fn radius(&self) -> f64 {
        self.state.radius_mm
    }

    pub fn peak_temperature(&self) -> f64 {
        self.state.peak_temperature_k
    }

    pub fn emitted_light(&self) -> f64 {
        self.state.light_intensity
    }

    pub fn elapsed_time(&self) -> f64 {
        self.state.elapsed_s
    }

    pub fn step_count(&self) -> u64 {
        self.state.steps
    }

    pub fn phase(&self) -> Option<CyclePhase> {
        self.state.phase
    }

    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    pub fn state(&self) -> &BubbleState {
        &self.state
    }

    pub fn waveform(&self) -> &W {
        &self.waveform
    }
}
