//! On-disk run cache.
//!
//! Each run lives in its own directory named by run id:
//!
//! ```text
//! <root>/<run_id>/samples.jsonl   one StepSample per line, initial record first
//! <root>/<run_id>/manifest.json   written last; its presence marks a complete run
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::types::{RunManifest, StepSample};
use crate::{ResultsError, ResultsResult};

const MANIFEST_FILE: &str = "manifest.json";
const SAMPLES_FILE: &str = "samples.jsonl";

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Store next to a scenario file, under `.sonolumi/runs`.
    pub fn for_scenario(scenario_path: &Path) -> ResultsResult<Self> {
        let scenario_dir = scenario_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "scenario path has no parent directory".to_string(),
            })?;
        Self::new(scenario_dir.join(".sonolumi").join("runs"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_file(&self, run_id: &str, name: &str) -> PathBuf {
        self.root_dir.join(run_id).join(name)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_file(run_id, MANIFEST_FILE).exists()
    }

    /// Persist a run. Samples must start with the pre-run record (step 0)
    /// and have strictly increasing step numbers.
    pub fn save_run(&self, manifest: &RunManifest, samples: &[StepSample]) -> ResultsResult<()> {
        check_sample_order(&manifest.run_id, samples)?;

        fs::create_dir_all(self.root_dir.join(&manifest.run_id))?;

        // A stale manifest would make a half-written run look complete
        let manifest_path = self.run_file(&manifest.run_id, MANIFEST_FILE);
        if manifest_path.exists() {
            fs::remove_file(&manifest_path)?;
        }

        let mut writer = BufWriter::new(File::create(
            self.run_file(&manifest.run_id, SAMPLES_FILE),
        )?);
        for sample in samples {
            serde_json::to_writer(&mut writer, sample)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        fs::write(manifest_path, serde_json::to_string_pretty(manifest)?)?;
        tracing::debug!(run_id = %manifest.run_id, samples = samples.len(), "run saved");
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let path = self.run_file(run_id, MANIFEST_FILE);
        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Read back the samples of a complete run.
    pub fn load_samples(&self, run_id: &str) -> ResultsResult<Vec<StepSample>> {
        if !self.has_run(run_id) {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let reader = BufReader::new(File::open(self.run_file(run_id, SAMPLES_FILE))?);
        let mut samples = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let sample = serde_json::from_str(&line).map_err(|e| ResultsError::CorruptRun {
                run_id: run_id.to_string(),
                message: format!("{SAMPLES_FILE} line {}: {e}", index + 1),
            })?;
            samples.push(sample);
        }

        check_sample_order(run_id, &samples)?;
        Ok(samples)
    }

    /// Complete runs recorded for a scenario, newest first.
    pub fn list_runs(&self, scenario_name: &str) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let run_id = entry.file_name().to_string_lossy().into_owned();
            match self.load_manifest(&run_id) {
                Ok(manifest) if manifest.scenario_name == scenario_name => runs.push(manifest),
                Ok(_) | Err(ResultsError::RunNotFound { .. }) => {}
                Err(e) => tracing::warn!(run_id = %run_id, error = %e, "skipping unreadable run"),
            }
        }
        runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.root_dir.join(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

fn check_sample_order(run_id: &str, samples: &[StepSample]) -> ResultsResult<()> {
    if let Some(first) = samples.first()
        && first.step != 0
    {
        return Err(ResultsError::CorruptRun {
            run_id: run_id.to_string(),
            message: format!("first sample is step {}, expected the initial record", first.step),
        });
    }
    if let Some(pair) = samples.windows(2).find(|w| w[1].step <= w[0].step) {
        return Err(ResultsError::CorruptRun {
            run_id: run_id.to_string(),
            message: format!("step {} follows step {}", pair[1].step, pair[0].step),
        });
    }
    Ok(())
}
