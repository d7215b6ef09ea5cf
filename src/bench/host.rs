//! The seam between the measurement loop and whatever does the timing.
//!
//! The loop only ever asks a [`BenchHost`] to "run this block repeatedly and
//! time it". Iteration counts, timers and statistics belong to the host:
//! criterion in the bench target, [`TimedHost`] in the binary and the tests.

use std::time::{Duration, Instant};

use tracing::info;

use super::config::{BenchConfig, MB};
use crate::error::CodecError;

/// A block of work the host may run any number of times.
pub type Routine<'r> = dyn FnMut() -> Result<(), CodecError> + 'r;

/// Something that can repeat and time a routine.
pub trait BenchHost {
    /// Run `routine` as many times as the host needs for a stable estimate.
    ///
    /// `bytes` is the amount of input one call processes, for throughput
    /// reporting. The first error aborts the measurement and is returned.
    fn measure(&mut self, id: &str, bytes: u64, routine: &mut Routine<'_>) -> Result<(), CodecError>;
}

// ── Sample ────────────────────────────────────────────────────────────────────

/// Timing summary of one measured block.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: String,
    pub bytes: u64,
    pub iterations: u64,
    pub mean: Duration,
    pub std_dev: Duration,
}

impl Sample {
    fn from_stats(id: &str, bytes: u64, stats: &Stats) -> Self {
        Sample {
            id: id.to_owned(),
            bytes,
            iterations: stats.count,
            mean: Duration::from_nanos(stats.mean as u64),
            std_dev: Duration::from_nanos(stats.std_dev() as u64),
        }
    }

    /// Mean throughput in MB/s (1 MB = 2^20 bytes).
    pub fn throughput_mb_s(&self) -> f64 {
        let secs = self.mean.as_secs_f64();
        if secs == 0.0 {
            return f64::INFINITY;
        }
        self.bytes as f64 / MB as f64 / secs
    }
}

/// Running mean and variance of iteration times (Welford's method).
#[derive(Debug, Default)]
struct Stats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Stats {
    fn push(&mut self, d: Duration) {
        let x = d.as_nanos() as f64;
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Population standard deviation.
    fn std_dev(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.m2 / self.count as f64).sqrt()
    }
}

// ── TimedHost ─────────────────────────────────────────────────────────────────

/// Wall-clock host: repeats each routine until both the time budget and the
/// minimum iteration count are met, timing every call separately.
#[derive(Debug)]
pub struct TimedHost {
    budget: Duration,
    min_iterations: u64,
    samples: Vec<Sample>,
}

impl TimedHost {
    pub fn new(budget: Duration, min_iterations: u64) -> Self {
        TimedHost { budget, min_iterations: min_iterations.max(1), samples: Vec::new() }
    }

    pub fn from_config(config: &BenchConfig) -> Self {
        TimedHost::new(
            Duration::from_secs(u64::from(config.nb_seconds)),
            u64::from(config.min_iterations),
        )
    }

    /// Samples recorded so far, in measurement order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

impl BenchHost for TimedHost {
    fn measure(&mut self, id: &str, bytes: u64, routine: &mut Routine<'_>) -> Result<(), CodecError> {
        let mut stats = Stats::default();
        let started = Instant::now();
        loop {
            let t = Instant::now();
            routine()?;
            stats.push(t.elapsed());

            if stats.count >= self.min_iterations && started.elapsed() >= self.budget {
                break;
            }
        }

        let sample = Sample::from_stats(id, bytes, &stats);
        info!(
            "{}: {} iterations, {:?}/op (± {:?}), {:.2} MB/s",
            sample.id,
            sample.iterations,
            sample.mean,
            sample.std_dev,
            sample.throughput_mb_s(),
        );
        self.samples.push(sample);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
