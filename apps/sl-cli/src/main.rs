use clap::{Parser, Subcommand};
use sl_app::{
    AppResult, RunOptions, RunProgressEvent, RunRequest, RunStage, query, run_service,
    scenario_service,
};
use sl_core::timing::{self, Timer};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "sl-cli")]
#[command(about = "Sonolumi CLI - Single-bubble sonoluminescence toy simulator", long_about = None)]
struct Cli {
    /// Print stepping loop timings
    #[arg(long, global = true)]
    timing: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a scenario file with the default bubble
    Init {
        /// Path of the scenario YAML file to create
        scenario_path: PathBuf,
        /// Scenario name
        #[arg(long, default_value = "Argon in water")]
        name: String,
    },
    /// Validate scenario file syntax and parameters
    Validate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Step a scenario live and print every frame
    Step {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Number of frames to print (defaults to the scenario's run length)
        #[arg(long)]
        steps: Option<usize>,
    },
    /// Run a scenario and cache its results
    Run {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a scenario
    Runs {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export a time series from a run as CSV
    ExportSeries {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Variable name (radius, temperature, light)
        variable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if cli.timing {
        timing::enable_timing();
    }

    let result = match cli.command {
        Commands::Init {
            scenario_path,
            name,
        } => cmd_init(&scenario_path, &name),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Step {
            scenario_path,
            steps,
        } => cmd_step(&scenario_path, steps),
        Commands::Run {
            scenario_path,
            no_cache,
        } => cmd_run(&scenario_path, !no_cache),
        Commands::Runs { scenario_path } => cmd_runs(&scenario_path),
        Commands::ShowRun {
            scenario_path,
            run_id,
        } => cmd_show_run(&scenario_path, &run_id),
        Commands::ExportSeries {
            scenario_path,
            run_id,
            variable,
            output,
        } => cmd_export_series(&scenario_path, &run_id, &variable, output.as_deref()),
    };

    timing::print_summary();
    result
}

fn cmd_init(scenario_path: &Path, name: &str) -> AppResult<()> {
    let scenario = scenario_service::default_scenario(name);
    scenario_service::save_scenario(scenario_path, &scenario)?;
    println!("✓ Wrote scenario '{}' to {}", name, scenario_path.display());
    Ok(())
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = scenario_service::load_scenario(scenario_path)?;
    let config = scenario.bubble.to_config();

    println!("✓ Scenario is valid");
    println!("  Name: {}", scenario.name);
    println!(
        "  Drive: {:.1} Hz (period {:.3e} s)",
        config.frequency_hz,
        sl_core::to_s(config.drive_period())
    );
    println!("  Pressure: {:.0} Pa", sl_core::to_pa(config.pressure()));
    println!(
        "  Ambient radius: {:.3} um",
        sl_core::to_um(config.ambient_radius())
    );
    println!("  Gas/liquid: {} in {}", config.gas, config.liquid);
    Ok(())
}

fn cmd_step(scenario_path: &Path, steps: Option<usize>) -> AppResult<()> {
    let scenario = scenario_service::load_scenario(scenario_path)?;
    let mut facade = scenario_service::build_facade(&scenario)?;
    let steps = steps.unwrap_or(scenario.run.steps);

    let timer = Timer::start("live stepping");
    println!("step,time_s,radius_um,peak_temperature_k,light");
    for step in 1..=steps {
        facade.step();
        println!(
            "{},{:.6},{:.6},{:.1},{:.6e}",
            step,
            facade.elapsed_time(),
            sl_core::to_um(sl_core::mm(facade.bubble_radius())),
            facade.peak_temperature(),
            facade.light_intensity()
        );
    }
    timer.stop_and_print();
    Ok(())
}

fn cmd_run(scenario_path: &Path, use_cache: bool) -> AppResult<()> {
    println!("Running scenario: {}", scenario_path.display());

    let request = RunRequest {
        scenario_path,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_stage = String::new();
    let response = run_service::ensure_run_with_progress(
        &request,
        Some(&mut |event| {
            let stage_key = format!("{:?}", event.stage);
            let emit_now = stage_key != last_stage || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = stage_key;
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();
    tracing::info!(
        run_id = %response.run_id,
        cached = response.loaded_from_cache,
        total_s = response.timing.total_time_s,
        "run finished"
    );

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }

    print_timing_summary(&response.timing);

    let (_manifest, samples) = run_service::load_run(scenario_path, &response.run_id)?;
    let summary = query::get_run_summary(&samples)?;
    println!("  Records: {}", summary.record_count);
    println!("  Flashes: {}", summary.flash_count);

    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (&event.stage, &event.stepping) {
        (RunStage::Stepping, Some(s)) => {
            let width = 28usize;
            let filled = ((s.fraction_complete * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  t={:.3}s  step={}/{}  elapsed={:.1}s",
                bar,
                s.fraction_complete * 100.0,
                s.sim_time_s,
                s.step,
                s.total_steps,
                event.elapsed_wall_s
            );
            let _ = io::stdout().flush();
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
            let _ = io::stdout().flush();
        }
    }
}

fn print_timing_summary(timing: &sl_app::RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    let load_pct = 100.0 * timing.load_time_s / total;
    let step_pct = 100.0 * timing.step_time_s / total;
    let save_pct = 100.0 * timing.save_time_s / total;

    println!("\nTiming summary:");
    println!("  Load:    {:.3}s ({:.1}%)", timing.load_time_s, load_pct);
    println!("  Step:    {:.3}s ({:.1}%)", timing.step_time_s, step_pct);
    println!("  Save:    {:.3}s ({:.1}%)", timing.save_time_s, save_pct);
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    }
    println!("  Total:   {:.3}s", timing.total_time_s);
    if timing.steps > 0 {
        println!("  Steps:   {} ({} recorded)", timing.steps, timing.records);
    }
}

fn cmd_runs(scenario_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(scenario_path)?;

    if runs.is_empty() {
        println!("No cached runs found for: {}", scenario_path.display());
    } else {
        println!("Cached runs:");
        for manifest in runs {
            println!(
                "  {} ({}, {} steps)",
                manifest.run_id, manifest.timestamp, manifest.steps
            );
        }
    }
    Ok(())
}

fn cmd_show_run(scenario_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, samples) = run_service::load_run(scenario_path, run_id)?;
    let summary = query::get_run_summary(&samples)?;

    println!("\nRun Summary:");
    println!("  Scenario: {}", manifest.scenario_name);
    println!("  Engine: {}", manifest.engine_version);
    println!("  Records: {}", summary.record_count);
    println!(
        "  Time range: {:.3} - {:.3} s",
        summary.time_range.0, summary.time_range.1
    );
    println!(
        "  Radius: {:.3} - {:.3} um",
        sl_core::to_um(sl_core::mm(summary.min_radius_mm)),
        sl_core::to_um(sl_core::mm(summary.max_radius_mm))
    );
    println!("  Peak temperature: {:.1} K", summary.max_peak_temperature_k);
    println!("  Max light: {:.6e}", summary.max_light_intensity);
    println!("  Flashes: {}", summary.flash_count);

    Ok(())
}

fn cmd_export_series(
    scenario_path: &Path,
    run_id: &str,
    variable: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let (_manifest, samples) = run_service::load_run(scenario_path, run_id)?;
    let series = query::extract_series(&samples, variable)?;

    // Build CSV
    let mut csv = String::from("time_s,value\n");
    for (t, val) in &series {
        csv.push_str(&format!("{},{}\n", t, val));
    }

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
