//! Single-bubble sonoluminescence stepping engine.
//!
//! Provides:
//! - Bubble configuration value object with explicit parameter and reconfigure policies
//! - Replaceable waveform provider mapping drive phase to bubble radius
//! - Thermal emission model converting collapse heating into light output
//! - `BubbleDynamicsModel` state machine advancing at a fixed 60 Hz frame rate
//! - `SimulationFacade` caching the last-stepped outputs for readers
//! - Fixed-count run driver with decimated recording

pub mod config;
pub mod emission;
pub mod error;
pub mod facade;
pub mod model;
pub mod run;
pub mod waveform;

// Re-exports for public API
pub use config::{BubbleConfig, ParameterPolicy, ReconfigurePolicy};
pub use emission::{EmissionModel, ExponentialEmission, collapse_heating};
pub use error::{SimError, SimResult};
pub use facade::{SimulationFacade, Snapshot};
pub use model::{BubbleDynamicsModel, BubbleState, FRAME_DT_S, advance};
pub use run::{RunOptions, RunStats, StepRecord, run_steps, run_steps_with_progress};
pub use waveform::{CyclePhase, ParametricWaveform, WaveformProvider, WaveformSample};
