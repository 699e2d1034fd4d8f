//! Microbenchmark Harness
//!
//! Times `repeat_count` back-to-back calls of a zero-argument target between
//! two reads of the monotonic clock and derives per-call averages from the
//! interval. Clock cycles are estimated from an assumed frequency, not read
//! from hardware counters.

use std::hint::black_box;
use std::io::Write;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clock::{Clock, MonotonicClock};
use crate::error::{MathError, Result};
use crate::seed::{self, Seed, SeededRng};

/// Default number of calls inside one timed region
pub const REPEAT_BENCH: u64 = 10_000_000;
/// Default processor frequency used to turn seconds into clock counts
pub const CLK_FREQ_HZ: f64 = 3.0e9;

const SEPARATOR: &str =
    "--------------------------------------------------------------------------------";

/// A zero-argument callable that can be benchmarked.
///
/// Implemented for every `FnMut()`, so plain functions and closures both work.
pub trait BenchTarget {
    fn invoke(&mut self);
}

impl<F: FnMut()> BenchTarget for F {
    #[inline(always)]
    fn invoke(&mut self) {
        self()
    }
}

/// Configuration for a benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    /// Calls per timed region
    pub repeat_count: u64,
    /// Assumed clock frequency in Hz, for display only
    pub clock_hz: f64,
    /// Core to pin the benchmarking thread to before timing
    pub pin_to_core: Option<usize>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            repeat_count: REPEAT_BENCH,
            clock_hz: CLK_FREQ_HZ,
            pin_to_core: None,
        }
    }
}

impl BenchmarkConfig {
    pub fn with_repeat_count(mut self, repeat_count: u64) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    pub fn with_clock_hz(mut self, clock_hz: f64) -> Self {
        self.clock_hz = clock_hz;
        self
    }

    pub fn with_pin_to_core(mut self, core_id: Option<usize>) -> Self {
        self.pin_to_core = core_id;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.repeat_count == 0 {
            return Err(MathError::ConfigError("repeat_count must be > 0".to_string()));
        }
        if !self.clock_hz.is_finite() || self.clock_hz <= 0.0 {
            return Err(MathError::ConfigError(format!(
                "clock_hz must be a positive finite number, got {}",
                self.clock_hz
            )));
        }
        Ok(())
    }
}

/// Report of one harness invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Seed printed at harness entry, if the run went through [`Harness::run`]
    pub seed: Option<Seed>,
    pub repeat_count: u64,
    pub elapsed_secs: f64,
    pub clock_count: f64,
    pub secs_per_call: f64,
    pub clocks_per_call: f64,
}

impl BenchmarkResult {
    /// Derive the four report numbers from a measured interval
    pub fn from_elapsed(elapsed_secs: f64, config: &BenchmarkConfig) -> Self {
        let repeat = config.repeat_count as f64;
        let clock_count = elapsed_secs * config.clock_hz;
        Self {
            seed: None,
            repeat_count: config.repeat_count,
            elapsed_secs,
            clock_count,
            secs_per_call: elapsed_secs / repeat,
            clocks_per_call: clock_count / repeat,
        }
    }

    pub fn nanos_per_call(&self) -> f64 {
        self.secs_per_call * 1e9
    }

    /// The four fixed-precision report lines
    pub fn report(&self) -> String {
        format!(
            "total elapsed time = {:.9} seconds\n\
             total clock count  = {:.9}\n\
             time / call        = {:.15} seconds ( {:.6} ns)\n\
             clocks / call      = {:.15}\n",
            self.elapsed_secs,
            self.clock_count,
            self.secs_per_call,
            self.nanos_per_call(),
            self.clocks_per_call
        )
    }
}

/// Benchmark runner over a monotonic time source
pub struct Harness<C: Clock = MonotonicClock> {
    config: BenchmarkConfig,
    clock: C,
}

impl Harness<MonotonicClock> {
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        Self::with_clock(config, MonotonicClock)
    }
}

impl<C: Clock> Harness<C> {
    pub fn with_clock(config: BenchmarkConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Time `repeat_count` calls of `target` and derive the report numbers.
    ///
    /// The timed region holds the two clock reads and the loop, nothing else.
    pub fn measure<T: BenchTarget + ?Sized>(&self, target: &mut T) -> BenchmarkResult {
        if let Some(core_id) = self.config.pin_to_core {
            if let Err(e) = pin_thread_to_core(core_id) {
                warn!("{}; continuing unpinned", e);
            }
        }
        let repeat = self.config.repeat_count;

        let start = self.clock.now();
        for _ in 0..repeat {
            black_box(&mut *target).invoke();
        }
        let end = self.clock.now();

        debug!(?start, ?end, "timed region finished");
        let result = BenchmarkResult::from_elapsed(end.seconds_since(&start), &self.config);
        info!(
            repeat,
            elapsed_secs = result.elapsed_secs,
            ns_per_call = result.nanos_per_call(),
            "benchmark complete"
        );
        result
    }

    /// Full harness run: header and time-derived seed, timed loop, report.
    ///
    /// Everything written to `out` happens outside the timed region.
    pub fn run<T, W>(&self, target: &mut T, out: &mut W) -> Result<BenchmarkResult>
    where
        T: BenchTarget + ?Sized,
        W: Write,
    {
        let seed = seed::resolve(None, &Local::now()).seed;
        self.run_seeded(seed, target, out)
    }

    /// Like [`Harness::run`], but hands the target a generator seeded with the
    /// printed seed, so randomized targets can be replayed from the report.
    pub fn run_with_rng<F, W>(&self, mut target: F, out: &mut W) -> Result<BenchmarkResult>
    where
        F: FnMut(&mut SeededRng),
        W: Write,
    {
        let seed = seed::resolve(None, &Local::now()).seed;
        let mut rng = SeededRng::new(seed);
        self.run_seeded(seed, &mut || target(&mut rng), out)
    }

    fn run_seeded<T, W>(&self, seed: Seed, target: &mut T, out: &mut W) -> Result<BenchmarkResult>
    where
        T: BenchTarget + ?Sized,
        W: Write,
    {
        writeln!(out, "{}", SEPARATOR)?;
        writeln!(
            out,
            "Performing {} ({}M) Benchmark Tests on selected functions",
            self.config.repeat_count,
            self.config.repeat_count as f64 / 1e6
        )?;
        writeln!(out, "Seed = {}", seed)?;
        writeln!(out, "{}", SEPARATOR)?;
        out.flush()?;

        let mut result = self.measure(target);
        result.seed = Some(seed);

        write!(out, "{}", result.report())?;
        writeln!(out)?;
        Ok(result)
    }
}

/// Pin the current thread to a specific CPU core
#[cfg(target_os = "linux")]
pub fn pin_thread_to_core(core_id: usize) -> Result<()> {
    // CPU_SET indexes a fixed-size mask and panics past its end.
    if core_id >= libc::CPU_SETSIZE as usize {
        return Err(MathError::ConfigError(format!(
            "Core {} is outside the CPU set (max {})",
            core_id,
            libc::CPU_SETSIZE - 1
        )));
    }

    unsafe {
        let mut cpuset: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_SET(core_id, &mut cpuset);

        let ret = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &cpuset);
        if ret != 0 {
            return Err(MathError::ConfigError(format!(
                "Failed to pin thread to core {}",
                core_id
            )));
        }
    }
    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn pin_thread_to_core(core_id: usize) -> Result<()> {
    Err(MathError::ConfigError(format!(
        "Thread pinning to core {} is not supported on this platform",
        core_id
    )))
}
