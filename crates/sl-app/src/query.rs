//! Query helpers for extracting data from loaded runs.

use std::str::FromStr;

use sl_results::StepSample;

use crate::error::{AppError, AppResult};

/// Summary of a run's time range and extremes.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub record_count: usize,
    pub flash_count: usize,
    pub min_radius_mm: f64,
    pub max_radius_mm: f64,
    pub max_peak_temperature_k: f64,
    pub max_light_intensity: f64,
}

/// Get run summary from step samples.
pub fn get_run_summary(samples: &[StepSample]) -> AppResult<RunSummary> {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(AppError::InvalidInput("No samples in run".to_string())),
    };

    let mut summary = RunSummary {
        time_range: (first.time_s, last.time_s),
        record_count: samples.len(),
        flash_count: 0,
        min_radius_mm: first.bubble_radius_mm,
        max_radius_mm: first.bubble_radius_mm,
        max_peak_temperature_k: first.peak_temperature_k,
        max_light_intensity: first.light_intensity,
    };

    for s in samples {
        summary.min_radius_mm = summary.min_radius_mm.min(s.bubble_radius_mm);
        summary.max_radius_mm = summary.max_radius_mm.max(s.bubble_radius_mm);
        summary.max_peak_temperature_k = summary.max_peak_temperature_k.max(s.peak_temperature_k);
        summary.max_light_intensity = summary.max_light_intensity.max(s.light_intensity);
        if s.light_intensity > 0.0 {
            summary.flash_count += 1;
        }
    }

    Ok(summary)
}

/// Recorded quantities that can be exported as a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesVariable {
    Radius,
    Temperature,
    Light,
}

impl SeriesVariable {
    pub fn column(self) -> &'static str {
        match self {
            SeriesVariable::Radius => "bubble_radius_mm",
            SeriesVariable::Temperature => "peak_temperature_k",
            SeriesVariable::Light => "light_intensity",
        }
    }

    fn value(self, sample: &StepSample) -> f64 {
        match self {
            SeriesVariable::Radius => sample.bubble_radius_mm,
            SeriesVariable::Temperature => sample.peak_temperature_k,
            SeriesVariable::Light => sample.light_intensity,
        }
    }
}

impl FromStr for SeriesVariable {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "radius" | "bubble_radius_mm" => Ok(SeriesVariable::Radius),
            "temperature" | "peak_temperature_k" => Ok(SeriesVariable::Temperature),
            "light" | "light_intensity" => Ok(SeriesVariable::Light),
            _ => Err(AppError::InvalidInput(format!(
                "Unknown variable: {} (expected radius, temperature or light)",
                s
            ))),
        }
    }
}

/// Extract `(time_s, value)` pairs for a variable.
pub fn extract_series(samples: &[StepSample], variable: &str) -> AppResult<Vec<(f64, f64)>> {
    let variable: SeriesVariable = variable.parse()?;
    Ok(samples
        .iter()
        .map(|s| (s.time_s, variable.value(s)))
        .collect())
}
