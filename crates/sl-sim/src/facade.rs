//! Caller-facing simulator wrapping one bubble model.

use crate::config::{BubbleConfig, ParameterPolicy, ReconfigurePolicy};
use crate::emission::{EmissionModel, ExponentialEmission};
use crate::error::SimResult;
use crate::model::BubbleDynamicsModel;
use crate::waveform::{ParametricWaveform, WaveformProvider};

/// Outputs of the last step, as seen by readers between steps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Snapshot {
    /// Bubble radius (mm)
    pub bubble_radius_mm: f64,
    /// Peak gas temperature (K)
    pub peak_temperature_k: f64,
    /// Emitted light (dimensionless)
    pub light_intensity: f64,
}

/// Owns one [`BubbleDynamicsModel`] and caches its outputs after each step.
///
/// Construction applies [`BubbleConfig::default`], so a new facade can be
/// stepped immediately. The accessors return the cached snapshot rather
/// than reading the model, so values are as fresh as the last `step()`.
#[derive(Clone, Debug)]
pub struct SimulationFacade<W = ParametricWaveform, E = ExponentialEmission> {
    model: BubbleDynamicsModel<W, E>,
    snapshot: Snapshot,
    reconfigure: ReconfigurePolicy,
}

impl SimulationFacade {
    pub fn new() -> Self {
        Self::with_model(BubbleDynamicsModel::new())
    }
}

impl Default for SimulationFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: WaveformProvider, E: EmissionModel> SimulationFacade<W, E> {
    /// Wrap an existing model and apply the default parameter set.
    pub fn with_model(model: BubbleDynamicsModel<W, E>) -> Self {
        let mut facade = Self {
            model,
            snapshot: Snapshot::default(),
            reconfigure: ReconfigurePolicy::default(),
        };
        facade.apply(BubbleConfig::default());
        facade
    }

    pub fn set_reconfigure_policy(&mut self, policy: ReconfigurePolicy) {
        self.reconfigure = policy;
    }

    pub fn reconfigure_policy(&self) -> ReconfigurePolicy {
        self.reconfigure
    }

    /// Forward all five parameters to the model and reset the cached outputs.
    pub fn configure(
        &mut self,
        frequency_hz: f64,
        pressure_atm: f64,
        ambient_radius_mm: f64,
        gas: &str,
        liquid: &str,
    ) {
        self.apply(BubbleConfig::new(
            frequency_hz,
            pressure_atm,
            ambient_radius_mm,
            gas,
            liquid,
        ));
    }

    /// Apply a configuration without validating it.
    pub fn apply(&mut self, config: BubbleConfig) {
        tracing::info!(
            frequency_hz = config.frequency_hz,
            pressure_atm = config.pressure_atm,
            ambient_radius_mm = config.ambient_radius_mm,
            gas = %config.gas,
            liquid = %config.liquid,
            "simulation parameters updated"
        );
        self.snapshot = Snapshot {
            bubble_radius_mm: config.ambient_radius_mm,
            peak_temperature_k: 0.0,
            light_intensity: 0.0,
        };
        self.model.configure_with(config, self.reconfigure);
    }

    /// Validate, then apply. Nothing changes on error.
    pub fn try_apply(&mut self, config: BubbleConfig) -> SimResult<()> {
        config.validate()?;
        self.apply(config);
        Ok(())
    }

    /// Apply under the given parameter policy.
    pub fn apply_with_policy(
        &mut self,
        config: BubbleConfig,
        policy: ParameterPolicy,
    ) -> SimResult<()> {
        match policy {
            ParameterPolicy::Permissive => {
                self.apply(config);
                Ok(())
            }
            ParameterPolicy::Strict => self.try_apply(config),
        }
    }

    /// Advance the model one frame and refresh the snapshot.
    pub fn step(&mut self) {
        self.model.advance_step();
        self.snapshot = Snapshot {
            bubble_radius_mm: self.model.radius(),
            peak_temperature_k: self.model.peak_temperature(),
            light_intensity: self.model.emitted_light(),
        };
        if self.snapshot.light_intensity > 0.0 {
            tracing::debug!(
                step = self.model.step_count(),
                t_s = self.model.elapsed_time(),
                peak_temperature_k = self.snapshot.peak_temperature_k,
                light = self.snapshot.light_intensity,
                "flash"
            );
        }
    }

    pub fn bubble_radius(&self) -> f64 {
        self.snapshot.bubble_radius_mm
    }

    pub fn peak_temperature(&self) -> f64 {
        self.snapshot.peak_temperature_k
    }

    pub fn light_intensity(&self) -> f64 {
        self.snapshot.light_intensity
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
    }

    pub fn elapsed_time(&self) -> f64 {
        self.model.elapsed_time()
    }

    pub fn config(&self) -> &BubbleConfig {
        self.model.config()
    }

    pub fn model(&self) -> &BubbleDynamicsModel<W, E> {
        &self.model
    }
}
