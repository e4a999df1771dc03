//! Fixed-count stepping runs and result recording.

use std::time::Instant;

use crate::emission::EmissionModel;
use crate::error::{SimError, SimResult};
use crate::facade::SimulationFacade;
use crate::waveform::{CyclePhase, WaveformProvider};

/// Options for stepping runs.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Number of frames to advance
    pub steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl Default for RunOptions {
    /// Ten simulated seconds at the 60 Hz frame rate, every step recorded.
    fn default() -> Self {
        Self {
            steps: 600,
            record_every: 1,
        }
    }
}

/// Facade outputs after one step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    pub step: u64,
    pub time_s: f64,
    pub bubble_radius_mm: f64,
    pub peak_temperature_k: f64,
    pub light_intensity: f64,
    /// `None` for the record taken before the first step
    pub phase: Option<CyclePhase>,
}

impl StepRecord {
    fn capture<W: WaveformProvider, E: EmissionModel>(facade: &SimulationFacade<W, E>) -> Self {
        let snapshot = facade.snapshot();
        Self {
            step: facade.model().step_count(),
            time_s: facade.elapsed_time(),
            bubble_radius_mm: snapshot.bubble_radius_mm,
            peak_temperature_k: snapshot.peak_temperature_k,
            light_intensity: snapshot.light_intensity,
            phase: facade.model().phase(),
        }
    }
}

/// Step a configured facade `opts.steps` times, recording its outputs.
///
/// The pre-run snapshot is always recorded first and the final step is
/// always recorded last, whatever the decimation.
pub fn run_steps<W: WaveformProvider, E: EmissionModel>(
    facade: &mut SimulationFacade<W, E>,
    opts: &RunOptions,
) -> SimResult<Vec<StepRecord>> {
    run_steps_with_progress(facade, opts, None)
}

/// As [`run_steps`], calling `progress(done, total)` after every step.
pub fn run_steps_with_progress<W: WaveformProvider, E: EmissionModel>(
    facade: &mut SimulationFacade<W, E>,
    opts: &RunOptions,
    mut progress: Option<&mut dyn FnMut(usize, usize)>,
) -> SimResult<Vec<StepRecord>> {
    if opts.steps == 0 {
        return Err(SimError::InvalidArg {
            what: "steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let started = Instant::now();
    let mut records = Vec::with_capacity(opts.steps / opts.record_every + 2);
    records.push(StepRecord::capture(facade));

    for step in 1..=opts.steps {
        facade.step();

        if step % opts.record_every == 0 {
            records.push(StepRecord::capture(facade));
        }
        if let Some(cb) = progress.as_mut() {
            cb(step, opts.steps);
        }
    }

    // Always record final state
    if opts.steps % opts.record_every != 0 {
        records.push(StepRecord::capture(facade));
    }

    sl_core::timing::STEP_LOOPS.record(started.elapsed(), opts.steps as u64);
    tracing::debug!(steps = opts.steps, recorded = records.len(), "run complete");

    Ok(records)
}

/// Extremes and flash count over a set of records.
#[derive(Clone, Debug, PartialEq)]
pub struct RunStats {
    pub min_radius_mm: f64,
    pub max_radius_mm: f64,
    pub max_peak_temperature_k: f64,
    pub max_light_intensity: f64,
    /// Records with non-zero light
    pub flash_count: usize,
}

impl RunStats {
    /// Returns `None` for an empty slice.
    pub fn from_records(records: &[StepRecord]) -> Option<Self> {
        let first = records.first()?;
        let mut stats = Self {
            min_radius_mm: first.bubble_radius_mm,
            max_radius_mm: first.bubble_radius_mm,
            max_peak_temperature_k: first.peak_temperature_k,
            max_light_intensity: first.light_intensity,
            flash_count: 0,
        };
        for r in records {
            stats.min_radius_mm = stats.min_radius_mm.min(r.bubble_radius_mm);
            stats.max_radius_mm = stats.max_radius_mm.max(r.bubble_radius_mm);
            stats.max_peak_temperature_k = stats.max_peak_temperature_k.max(r.peak_temperature_k);
            stats.max_light_intensity = stats.max_light_intensity.max(r.light_intensity);
            if r.light_intensity > 0.0 {
                stats.flash_count += 1;
            }
        }
        Some(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_options_defaults() {
        let opts = RunOptions::default();
        assert_eq!(opts.steps, 600);
        assert_eq!(opts.record_every, 1);
    }

    #[test]
    fn run_options_invalid() {
        let mut facade = SimulationFacade::new();
        let opts = RunOptions {
            steps: 0,
            record_every: 1,
        };
        assert!(matches!(
            run_steps(&mut facade, &opts),
            Err(SimError::InvalidArg { .. })
        ));

        let opts = RunOptions {
            steps: 10,
            record_every: 0,
        };
        assert!(run_steps(&mut facade, &opts).is_err());
        assert_eq!(facade.elapsed_time(), 0.0);
    }

    #[test]
    fn decimation_keeps_first_and_last() {
        let mut facade = SimulationFacade::new();
        let opts = RunOptions {
            steps: 10,
            record_every: 4,
        };
        let records = run_steps(&mut facade, &opts).unwrap();
        let steps: Vec<u64> = records.iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![0, 4, 8, 10]);
        assert_eq!(records[0].phase, None);
        assert_eq!(records[0].bubble_radius_mm, 0.005);
    }

    #[test]
    fn exact_multiple_does_not_duplicate_final() {
        let mut facade = SimulationFacade::new();
        let opts = RunOptions {
            steps: 6,
            record_every: 3,
        };
        let records = run_steps(&mut facade, &opts).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records.last().map(|r| r.step), Some(6));
    }

    #[test]
    fn progress_reports_every_step() {
        let mut facade = SimulationFacade::new();
        let mut seen = Vec::new();
        let opts = RunOptions {
            steps: 5,
            record_every: 1,
        };
        run_steps_with_progress(&mut facade, &opts, Some(&mut |done, total| {
            seen.push((done, total))
        }))
        .unwrap();
        assert_eq!(seen.len(), 5);
        assert_eq!(seen.last(), Some(&(5, 5)));
    }

    #[test]
    fn stats_track_extremes() {
        let mut facade = SimulationFacade::new();
        let records = run_steps(&mut facade, &RunOptions::default()).unwrap();
        let stats = RunStats::from_records(&records).unwrap();
        assert!(stats.min_radius_mm <= 0.005);
        assert!(stats.max_radius_mm <= 0.010 + 1e-12);
        assert!(stats.min_radius_mm >= 0.0025 - 1e-12);
        assert_eq!(stats.flash_count, 0);
        assert!(RunStats::from_records(&[]).is_none());
    }
}
