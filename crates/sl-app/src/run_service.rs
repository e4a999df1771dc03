//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use sl_results::{RunManifest, RunStore, StepSample};
use sl_sim::StepRecord;

use crate::error::AppResult;
use crate::progress::{RunProgressEvent, RunStage, SteppingProgress};
use crate::scenario_service;

/// Version tag folded into run ids; bump when stepping results change.
pub const ENGINE_VERSION: &str = "0.1.0";

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub engine_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: ENGINE_VERSION.to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub scenario_path: &'a Path,
    pub options: RunOptions,
}

/// Concise timing and execution summary for a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub load_time_s: f64,
    pub step_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
    pub steps: usize,
    pub records: usize,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
    stepping: Option<SteppingProgress>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent {
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
            stepping,
        });
    }
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(
        &mut progress_cb,
        RunStage::LoadingScenario,
        started,
        Some("Loading scenario".to_string()),
        None,
    );

    let load_started = Instant::now();
    let scenario = scenario_service::load_scenario(request.scenario_path)?;
    timing.load_time_s = load_started.elapsed().as_secs_f64();

    emit_progress(
        &mut progress_cb,
        RunStage::CheckingCache,
        started,
        Some("Checking run cache".to_string()),
        None,
    );

    let run_id = sl_results::compute_run_id(
        &scenario.bubble,
        &scenario.run,
        &scenario.policy,
        &request.options.engine_version,
    );
    let store = RunStore::for_scenario(request.scenario_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            RunStage::LoadingCachedResult,
            started,
            Some("Loading cached run".to_string()),
            None,
        );

        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();

        emit_progress(
            &mut progress_cb,
            RunStage::Completed,
            started,
            Some("Loaded cached run".to_string()),
            None,
        );
        tracing::info!(run_id = %run_id, "loaded cached run");

        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            timing,
        });
    }

    let mut facade = scenario_service::build_facade(&scenario)?;
    let opts = scenario.run.to_options();
    let period_s = facade.config().period_s();

    let step_started = Instant::now();
    let records = {
        let mut on_step = |done: usize, total: usize| {
            // one event per simulated second keeps callbacks cheap on long runs
            if done % 60 == 0 || done == total {
                let stepping = SteppingProgress {
                    step: done,
                    total_steps: total,
                    sim_time_s: done as f64 * sl_sim::FRAME_DT_S,
                    fraction_complete: done as f64 / total as f64,
                };
                emit_progress(
                    &mut progress_cb,
                    RunStage::Stepping,
                    started,
                    None,
                    Some(stepping),
                );
            }
        };
        sl_sim::run_steps_with_progress(&mut facade, &opts, Some(&mut on_step))?
    };
    timing.step_time_s = step_started.elapsed().as_secs_f64();
    timing.steps = opts.steps;
    timing.records = records.len();

    tracing::info!(
        run_id = %run_id,
        steps = opts.steps,
        drive_period_s = period_s,
        "stepping complete"
    );

    emit_progress(
        &mut progress_cb,
        RunStage::SavingResults,
        started,
        Some("Saving results".to_string()),
        None,
    );

    let save_started = Instant::now();
    let manifest = RunManifest::now(
        run_id.clone(),
        scenario.name.clone(),
        opts.steps,
        opts.record_every,
        request.options.engine_version.clone(),
    );
    let samples = records_to_samples(&records);
    store.save_run(&manifest, &samples)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    emit_progress(
        &mut progress_cb,
        RunStage::Completed,
        started,
        Some("Run complete".to_string()),
        None,
    );

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        timing,
    })
}

fn records_to_samples(records: &[StepRecord]) -> Vec<StepSample> {
    records
        .iter()
        .map(|r| StepSample {
            step: r.step,
            time_s: r.time_s,
            bubble_radius_mm: r.bubble_radius_mm,
            peak_temperature_k: r.peak_temperature_k,
            light_intensity: r.light_intensity,
            phase: r.phase.map(|p| p.as_str().to_string()),
        })
        .collect()
}

/// List cached runs for a scenario, most recent first.
pub fn list_runs(scenario_path: &Path) -> AppResult<Vec<RunManifest>> {
    let scenario = scenario_service::load_scenario(scenario_path)?;
    let store = RunStore::for_scenario(scenario_path)?;

    Ok(store.list_runs(&scenario.name)?)
}

pub fn load_run(scenario_path: &Path, run_id: &str) -> AppResult<(RunManifest, Vec<StepSample>)> {
    let store = RunStore::for_scenario(scenario_path)?;

    let manifest = store.load_manifest(run_id)?;
    let samples = store.load_samples(run_id)?;

    Ok((manifest, samples))
}
