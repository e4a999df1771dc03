//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub timestamp: String,
    pub steps: usize,
    pub record_every: usize,
    pub engine_version: String,
}

impl RunManifest {
    /// Manifest stamped with the current UTC time.
    pub fn now(
        run_id: impl Into<RunId>,
        scenario_name: impl Into<String>,
        steps: usize,
        record_every: usize,
        engine_version: impl Into<String>,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            scenario_name: scenario_name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            steps,
            record_every,
            engine_version: engine_version.into(),
        }
    }
}

/// Facade outputs recorded after one step.
///
/// Permissive runs can produce NaN or infinite outputs, which plain JSON
/// numbers cannot hold, so every float goes through [`lenient_f64`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepSample {
    pub step: u64,
    #[serde(with = "lenient_f64")]
    pub time_s: f64,
    #[serde(with = "lenient_f64")]
    pub bubble_radius_mm: f64,
    #[serde(with = "lenient_f64")]
    pub peak_temperature_k: f64,
    #[serde(with = "lenient_f64")]
    pub light_intensity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

/// Serde adapter writing finite floats as JSON numbers and non-finite ones
/// as the strings `"NaN"`, `"inf"` and `"-inf"`.
///
/// `null` reads back as NaN, which is how serde_json wrote non-finite
/// values before this encoding existed.
pub mod lenient_f64 {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "inf" } else { "-inf" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(LenientF64)
    }

    struct LenientF64;

    impl<'de> Visitor<'de> for LenientF64 {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or one of \"NaN\", \"inf\", \"-inf\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }
    }
}
