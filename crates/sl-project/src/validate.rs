//! Scenario validation logic.

use crate::schema::{BubbleDef, RunDef, Scenario};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing value: {field}")]
    Missing { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "name".to_string(),
        });
    }

    validate_run(&scenario.run)?;
    validate_bubble(&scenario.bubble, scenario.policy.strict_parameters)?;
    Ok(())
}

fn validate_run(run: &RunDef) -> Result<(), ValidationError> {
    if run.steps == 0 {
        return Err(invalid("run.steps", run.steps, "must be positive"));
    }
    if run.record_every == 0 {
        return Err(invalid("run.record_every", run.record_every, "must be positive"));
    }
    Ok(())
}

fn validate_bubble(bubble: &BubbleDef, strict: bool) -> Result<(), ValidationError> {
    if bubble.gas.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "bubble.gas".to_string(),
        });
    }
    if bubble.liquid.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "bubble.liquid".to_string(),
        });
    }

    // Permissive scenarios may carry degenerate numbers on purpose
    if !strict {
        return Ok(());
    }

    if let Err(sl_sim::SimError::InvalidParameter { what, value }) =
        bubble.to_config().validate()
    {
        return Err(invalid(
            &format!("bubble.{what}"),
            value,
            "must be finite and positive under strict_parameters",
        ));
    }
    Ok(())
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_is_valid() {
        let scenario = Scenario::with_defaults("Argon in water");
        assert!(validate_scenario(&scenario).is_ok());
    }

    #[test]
    fn rejects_future_version() {
        let mut scenario = Scenario::with_defaults("future");
        scenario.version = 99;
        assert!(matches!(
            validate_scenario(&scenario),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }

    #[test]
    fn rejects_blank_name_and_labels() {
        let scenario = Scenario::with_defaults("  ");
        assert!(matches!(
            validate_scenario(&scenario),
            Err(ValidationError::Missing { .. })
        ));

        let mut scenario = Scenario::with_defaults("labels");
        scenario.bubble.liquid = String::new();
        let err = validate_scenario(&scenario).unwrap_err();
        assert!(err.to_string().contains("bubble.liquid"));
    }

    #[test]
    fn rejects_zero_steps() {
        let mut scenario = Scenario::with_defaults("empty run");
        scenario.run.steps = 0;
        let err = validate_scenario(&scenario).unwrap_err();
        assert!(err.to_string().contains("run.steps"));
    }

    #[test]
    fn zero_frequency_depends_on_policy() {
        let mut scenario = Scenario::with_defaults("frozen");
        scenario.bubble.frequency_hz = 0.0;
        assert!(validate_scenario(&scenario).is_ok());

        scenario.policy.strict_parameters = true;
        let err = validate_scenario(&scenario).unwrap_err();
        assert!(err.to_string().contains("bubble.frequency_hz"));
    }
}
