//! Bubble configuration value object and reconfiguration policies.

use sl_core::units::{Frequency, Length, Pressure, Time, atm, hz, mm, s};
use sl_core::{ensure_finite, ensure_positive};

use crate::error::{SimError, SimResult};

/// Physical parameters of one driven bubble.
///
/// Values are held in the units they are quoted in: Hz, atm and mm. The
/// gas and liquid labels are carried as metadata and do not enter the
/// dynamics.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleConfig {
    /// Acoustic drive frequency (Hz)
    pub frequency_hz: f64,
    /// Ambient liquid pressure (atm)
    pub pressure_atm: f64,
    /// Rest-state bubble radius (mm)
    pub ambient_radius_mm: f64,
    /// Gas species label
    pub gas: String,
    /// Liquid species label
    pub liquid: String,
}

impl Default for BubbleConfig {
    /// Argon bubble in water at 20 kHz, 1.35 atm, 5 µm rest radius.
    fn default() -> Self {
        Self {
            frequency_hz: 20_000.0,
            pressure_atm: 1.35,
            ambient_radius_mm: 0.005,
            gas: "Argon".to_string(),
            liquid: "Water".to_string(),
        }
    }
}

impl BubbleConfig {
    pub fn new(
        frequency_hz: f64,
        pressure_atm: f64,
        ambient_radius_mm: f64,
        gas: impl Into<String>,
        liquid: impl Into<String>,
    ) -> Self {
        Self {
            frequency_hz,
            pressure_atm,
            ambient_radius_mm,
            gas: gas.into(),
            liquid: liquid.into(),
        }
    }

    /// All-zero parameters with empty labels, the state of a freshly built model.
    pub fn zeroed() -> Self {
        Self::new(0.0, 0.0, 0.0, String::new(), String::new())
    }

    /// Drive period in seconds. Infinite for a zero frequency.
    pub fn period_s(&self) -> f64 {
        1.0 / self.frequency_hz
    }

    pub fn drive_frequency(&self) -> Frequency {
        hz(self.frequency_hz)
    }

    pub fn drive_period(&self) -> Time {
        s(self.period_s())
    }

    pub fn ambient_radius(&self) -> Length {
        mm(self.ambient_radius_mm)
    }

    pub fn pressure(&self) -> Pressure {
        atm(self.pressure_atm)
    }

    /// Check the parameters the stepping arithmetic divides by.
    ///
    /// Frequency and ambient radius must be finite and strictly positive,
    /// pressure must be finite. Labels are not inspected.
    pub fn validate(&self) -> SimResult<()> {
        positive(self.frequency_hz, "frequency_hz")?;
        positive(self.ambient_radius_mm, "ambient_radius_mm")?;
        ensure_finite(self.pressure_atm, "pressure_atm").map_err(|_| {
            SimError::InvalidParameter {
                what: "pressure_atm",
                value: self.pressure_atm,
            }
        })?;
        Ok(())
    }
}

fn positive(value: f64, what: &'static str) -> SimResult<f64> {
    ensure_positive(value, what).map_err(|_| SimError::InvalidParameter { what, value })
}

/// How parameters that make the stepping arithmetic degenerate are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParameterPolicy {
    /// Accept everything; zero frequency or radius yield infinite or NaN outputs.
    #[default]
    Permissive,
    /// Reject non-finite values and non-positive frequency or radius.
    Strict,
}

/// Whether reconfiguring a running model restarts its clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReconfigurePolicy {
    /// Keep elapsed time, so the new drive picks up at the current phase.
    #[default]
    PreserveClock,
    /// Reset elapsed time and step count to zero.
    RestartClock,
}
