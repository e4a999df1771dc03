use sl_results::*;

fn manifest(run_id: &str, scenario_name: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        scenario_name: scenario_name.to_string(),
        timestamp: timestamp.to_string(),
        steps: 2,
        record_every: 1,
        engine_version: "v1".to_string(),
    }
}

#[test]
fn save_and_load_run() {
    let temp_dir = std::env::temp_dir().join("sl_results_test");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir.clone()).unwrap();
    let manifest = manifest("test_run_123", "Argon in water", "2026-10-19T12:00:00+00:00");

    let samples = vec![
        StepSample {
            step: 0,
            time_s: 0.0,
            bubble_radius_mm: 0.005,
            peak_temperature_k: 0.0,
            light_intensity: 0.0,
            phase: None,
        },
        StepSample {
            step: 1,
            time_s: 0.25,
            bubble_radius_mm: 0.0093,
            peak_temperature_k: 0.0,
            light_intensity: 0.0,
            phase: Some("expansion".to_string()),
        },
    ];

    store.save_run(&manifest, &samples).unwrap();
    assert!(store.has_run("test_run_123"));

    let loaded_manifest = store.load_manifest("test_run_123").unwrap();
    assert_eq!(loaded_manifest, manifest);

    let loaded = store.load_samples("test_run_123").unwrap();
    assert_eq!(loaded, samples);

    store.delete_run("test_run_123").unwrap();
    assert!(!store.has_run("test_run_123"));
}

#[test]
fn missing_run_is_reported() {
    let temp_dir = std::env::temp_dir().join("sl_results_test_missing");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir).unwrap();
    assert!(matches!(
        store.load_manifest("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
    assert!(matches!(
        store.load_samples("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn list_runs_by_scenario() {
    let temp_dir = std::env::temp_dir().join("sl_results_test_list");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir.clone()).unwrap();

    store
        .save_run(&manifest("run1", "argon", "2026-10-19T12:00:00+00:00"), &[])
        .unwrap();
    store
        .save_run(&manifest("run2", "argon", "2026-10-19T13:00:00+00:00"), &[])
        .unwrap();
    store
        .save_run(&manifest("run3", "xenon", "2026-10-19T14:00:00+00:00"), &[])
        .unwrap();

    let argon = store.list_runs("argon").unwrap();
    assert_eq!(argon.len(), 2);
    assert_eq!(argon[0].run_id, "run2");
    assert_eq!(store.list_runs("xenon").unwrap().len(), 1);
    assert!(store.list_runs("helium").unwrap().is_empty());
}

#[test]
fn store_for_scenario_lives_beside_file() {
    let dir = std::env::temp_dir().join("sl_results_test_scenario_dir");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let store = RunStore::for_scenario(&dir.join("bubble.yaml")).unwrap();
    assert_eq!(store.root_dir(), dir.join(".sonolumi").join("runs"));
    assert!(store.root_dir().exists());
}

#[test]
fn fresh_manifest_has_rfc3339_timestamp() {
    let manifest = RunManifest::now("id", "argon", 600, 1, "0.1.0");
    assert!(chrono::DateTime::parse_from_rfc3339(&manifest.timestamp).is_ok());
}

fn sample(step: u64, radius: f64, temperature: f64, light: f64) -> StepSample {
    StepSample {
        step,
        time_s: step as f64 / 60.0,
        bubble_radius_mm: radius,
        peak_temperature_k: temperature,
        light_intensity: light,
        phase: (step > 0).then(|| "collapse".to_string()),
    }
}

#[test]
fn non_finite_outputs_survive_the_store() {
    let temp_dir = std::env::temp_dir().join("sl_results_test_non_finite");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir).unwrap();
    let samples = vec![
        sample(0, 0.005, 0.0, 0.0),
        sample(1, f64::NAN, 0.0, 0.0),
        sample(2, -0.001, 1.0e9, f64::INFINITY),
        sample(3, 0.004, f64::NEG_INFINITY, 0.0),
    ];
    store
        .save_run(&manifest("blowup", "argon", "2026-10-19T12:00:00+00:00"), &samples)
        .unwrap();

    let loaded = store.load_samples("blowup").unwrap();
    assert_eq!(loaded.len(), 4);
    assert!(loaded[1].bubble_radius_mm.is_nan());
    assert_eq!(loaded[2].light_intensity, f64::INFINITY);
    assert_eq!(loaded[3].peak_temperature_k, f64::NEG_INFINITY);
    assert_eq!(loaded[3].bubble_radius_mm, 0.004);
}

#[test]
fn samples_must_start_at_the_initial_record() {
    let temp_dir = std::env::temp_dir().join("sl_results_test_order");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir).unwrap();
    let late_start = [sample(1, 0.005, 0.0, 0.0), sample(2, 0.005, 0.0, 0.0)];
    assert!(matches!(
        store.save_run(&manifest("late", "argon", "t"), &late_start),
        Err(ResultsError::CorruptRun { .. })
    ));
    assert!(!store.has_run("late"));

    let repeated = [
        sample(0, 0.005, 0.0, 0.0),
        sample(2, 0.005, 0.0, 0.0),
        sample(2, 0.005, 0.0, 0.0),
    ];
    assert!(matches!(
        store.save_run(&manifest("repeat", "argon", "t"), &repeated),
        Err(ResultsError::CorruptRun { .. })
    ));
}

#[test]
fn unreadable_sample_line_is_reported_as_corrupt() {
    let temp_dir = std::env::temp_dir().join("sl_results_test_corrupt");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir.clone()).unwrap();
    store
        .save_run(&manifest("broken", "argon", "t"), &[sample(0, 0.005, 0.0, 0.0)])
        .unwrap();
    std::fs::write(temp_dir.join("broken").join("samples.jsonl"), "{not json}\n").unwrap();

    match store.load_samples("broken") {
        Err(ResultsError::CorruptRun { run_id, message }) => {
            assert_eq!(run_id, "broken");
            assert!(message.contains("line 1"));
        }
        other => panic!("expected CorruptRun, got {other:?}"),
    }
}
