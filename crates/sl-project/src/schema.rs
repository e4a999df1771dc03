//! Scenario schema definitions.

use serde::{Deserialize, Serialize};
use sl_sim::{BubbleConfig, ParameterPolicy, ReconfigurePolicy, RunOptions};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub bubble: BubbleDef,
    #[serde(default)]
    pub run: RunDef,
    #[serde(default)]
    pub policy: PolicyDef,
}

impl Scenario {
    /// Scenario with the default bubble, run length and policies.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            bubble: BubbleDef::default(),
            run: RunDef::default(),
            policy: PolicyDef::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BubbleDef {
    pub frequency_hz: f64,
    pub pressure_atm: f64,
    pub ambient_radius_mm: f64,
    pub gas: String,
    pub liquid: String,
}

impl Default for BubbleDef {
    fn default() -> Self {
        let config = BubbleConfig::default();
        Self {
            frequency_hz: config.frequency_hz,
            pressure_atm: config.pressure_atm,
            ambient_radius_mm: config.ambient_radius_mm,
            gas: config.gas,
            liquid: config.liquid,
        }
    }
}

impl BubbleDef {
    pub fn to_config(&self) -> BubbleConfig {
        BubbleConfig::new(
            self.frequency_hz,
            self.pressure_atm,
            self.ambient_radius_mm,
            self.gas.clone(),
            self.liquid.clone(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunDef {
    pub steps: usize,
    pub record_every: usize,
}

impl Default for RunDef {
    fn default() -> Self {
        let opts = RunOptions::default();
        Self {
            steps: opts.steps,
            record_every: opts.record_every,
        }
    }
}

impl RunDef {
    pub fn to_options(&self) -> RunOptions {
        RunOptions {
            steps: self.steps,
            record_every: self.record_every,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PolicyDef {
    /// Reject zero/negative frequency or radius instead of stepping them silently.
    pub strict_parameters: bool,
    /// Reset the clock when parameters change mid-run.
    pub restart_clock_on_reconfigure: bool,
}

impl PolicyDef {
    pub fn parameter_policy(&self) -> ParameterPolicy {
        if self.strict_parameters {
            ParameterPolicy::Strict
        } else {
            ParameterPolicy::Permissive
        }
    }

    pub fn reconfigure_policy(&self) -> ReconfigurePolicy {
        if self.restart_clock_on_reconfigure {
            ReconfigurePolicy::RestartClock
        } else {
            ReconfigurePolicy::PreserveClock
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = "version: 1\nname: Minimal\n";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.bubble, BubbleDef::default());
        assert_eq!(scenario.run, RunDef::default());
        assert_eq!(scenario.policy, PolicyDef::default());
        assert_eq!(scenario.bubble.to_config(), BubbleConfig::default());
    }

    #[test]
    fn partial_bubble_keeps_other_defaults() {
        let yaml = "version: 1\nname: Xenon\nbubble:\n  gas: Xenon\n  frequency_hz: 26500\n";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.bubble.gas, "Xenon");
        assert_eq!(scenario.bubble.frequency_hz, 26_500.0);
        assert_eq!(scenario.bubble.liquid, "Water");
        assert_eq!(scenario.bubble.ambient_radius_mm, 0.005);
    }

    #[test]
    fn policy_mapping() {
        let policy = PolicyDef {
            strict_parameters: true,
            restart_clock_on_reconfigure: true,
        };
        assert_eq!(policy.parameter_policy(), ParameterPolicy::Strict);
        assert_eq!(policy.reconfigure_policy(), ReconfigurePolicy::RestartClock);

        let policy = PolicyDef::default();
        assert_eq!(policy.parameter_policy(), ParameterPolicy::Permissive);
        assert_eq!(policy.reconfigure_policy(), ReconfigurePolicy::PreserveClock);
    }
}
