//! Scenario loading, saving, validation, and facade construction.

use std::path::Path;

use sl_project::schema::Scenario;
use sl_sim::SimulationFacade;

use crate::error::{AppError, AppResult};

/// Load a scenario from a YAML file (JSON files parse too, YAML being a superset).
///
/// Older schema versions are migrated; the result is validated.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ScenarioFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let scenario: Scenario = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Scenario(format!("Failed to parse scenario YAML: {}", e)))?;
    let scenario = sl_project::migrate_to_latest(scenario)?;
    validate_scenario(&scenario)?;

    tracing::debug!(path = %path.display(), name = %scenario.name, "scenario loaded");
    Ok(scenario)
}

/// Save a scenario to a YAML file.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    validate_scenario(scenario)?;
    let content = serde_yaml::to_string(scenario)
        .map_err(|e| AppError::Scenario(format!("Failed to serialize scenario: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ScenarioFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    sl_project::validate_scenario(scenario)?;
    Ok(())
}

/// Scenario with the documented default bubble.
pub fn default_scenario(name: &str) -> Scenario {
    Scenario::with_defaults(name)
}

/// Facade configured from a scenario, honoring both of its policies.
pub fn build_facade(scenario: &Scenario) -> AppResult<SimulationFacade> {
    let mut facade = SimulationFacade::new();
    facade.set_reconfigure_policy(scenario.policy.reconfigure_policy());
    facade.apply_with_policy(
        scenario.bubble.to_config(),
        scenario.policy.parameter_policy(),
    )?;
    Ok(facade)
}
