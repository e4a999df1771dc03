//! Shared application service layer for sonolumi.
//!
//! This crate provides a unified interface for frontends, centralizing
//! scenario management, run execution with caching, and result querying.

pub mod error;
pub mod progress;
pub mod query;
pub mod run_service;
pub mod scenario_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage, SteppingProgress};
pub use query::{extract_series, get_run_summary, RunSummary, SeriesVariable};
pub use run_service::{
    ensure_run, ensure_run_with_progress, list_runs, load_run, RunOptions, RunRequest,
    RunResponse, RunTimingSummary, ENGINE_VERSION,
};
pub use scenario_service::{
    build_facade, default_scenario, load_scenario, save_scenario, validate_scenario,
};
