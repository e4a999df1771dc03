//! Error types for the sl-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write scenario file: {path}")]
    ScenarioFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sl-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<sl_project::ProjectError> for AppError {
    fn from(err: sl_project::ProjectError) -> Self {
        match err {
            sl_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Scenario(other.to_string()),
        }
    }
}

impl From<sl_project::ValidationError> for AppError {
    fn from(err: sl_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<sl_sim::SimError> for AppError {
    fn from(err: sl_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<sl_results::ResultsError> for AppError {
    fn from(err: sl_results::ResultsError) -> Self {
        match err {
            sl_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
