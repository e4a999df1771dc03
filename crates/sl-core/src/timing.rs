//! Opt-in wall-clock timing for stepping loops.
//!
//! Everything here is inert unless timing is switched on with
//! [`enable_timing`] or the `SL_TIMING` environment variable.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

static ENABLED: AtomicBool = AtomicBool::new(false);

pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var_os("SL_TIMING").is_some()
}

/// Labelled stopwatch that prints its reading when timing is enabled.
pub struct Timer {
    label: &'static str,
    started: Option<Instant>,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            started: is_enabled().then(Instant::now),
        }
    }

    pub fn stop_and_print(self) {
        if let Some(started) = self.started {
            println!("[TIMING] {}: {:.3}s", self.label, started.elapsed().as_secs_f64());
        }
    }
}

/// Totals over every stepping loop run in this process.
pub struct StepLoopStats {
    loops: AtomicU64,
    frames: AtomicU64,
    total_ns: AtomicU64,
    slowest_ns: AtomicU64,
}

impl StepLoopStats {
    pub const fn new() -> Self {
        Self {
            loops: AtomicU64::new(0),
            frames: AtomicU64::new(0),
            total_ns: AtomicU64::new(0),
            slowest_ns: AtomicU64::new(0),
        }
    }

    /// Record one loop of `frames` steps. No-op while timing is disabled.
    pub fn record(&self, elapsed: Duration, frames: u64) {
        if !is_enabled() {
            return;
        }
        let ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.loops.fetch_add(1, Ordering::Relaxed);
        self.frames.fetch_add(frames, Ordering::Relaxed);
        self.total_ns.fetch_add(ns, Ordering::Relaxed);
        self.slowest_ns.fetch_max(ns, Ordering::Relaxed);
    }

    pub fn loops(&self) -> u64 {
        self.loops.load(Ordering::Relaxed)
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_ns.load(Ordering::Relaxed) as f64 * 1e-9
    }

    pub fn slowest_seconds(&self) -> f64 {
        self.slowest_ns.load(Ordering::Relaxed) as f64 * 1e-9
    }

    /// Simulated frames per wall-clock second, 0 before anything is recorded.
    pub fn frames_per_second(&self) -> f64 {
        let total = self.total_seconds();
        if total > 0.0 {
            self.frames() as f64 / total
        } else {
            0.0
        }
    }
}

impl Default for StepLoopStats {
    fn default() -> Self {
        Self::new()
    }
}

pub static STEP_LOOPS: StepLoopStats = StepLoopStats::new();

/// Print the [`STEP_LOOPS`] totals when timing is enabled and anything ran.
pub fn print_summary() {
    if !is_enabled() || STEP_LOOPS.loops() == 0 {
        return;
    }
    println!("\n=== Stepping Timing ===");
    println!(
        "{} loops, {} frames in {:.3}s ({:.0} frames/s), slowest loop {:.3}s",
        STEP_LOOPS.loops(),
        STEP_LOOPS.frames(),
        STEP_LOOPS.total_seconds(),
        STEP_LOOPS.frames_per_second(),
        STEP_LOOPS.slowest_seconds()
    );
    println!("=======================\n");
}
