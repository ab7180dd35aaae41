//! Timing harness for flow kernels
//!
//! Invokes a computation back to back, timing each call with the monotonic
//! clock, and reduces the samples to a mean in microseconds. Bandwidth is a
//! derived figure: bytes touched by one call divided by its mean duration.

use std::hint::black_box;
use std::time::Instant;

use log::info;

use crate::error::Result;

/// Timing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Timed calls
    pub iterations: usize,
    /// Untimed calls before the timed ones
    pub warmup: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            warmup: 1,
        }
    }
}

/// Timings of one benchmarked computation
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Per-call durations in microseconds
    pub samples_us: Vec<f64>,
    /// Arithmetic mean of the samples
    pub mean_us: f64,
    /// Fastest sample
    pub min_us: f64,
}

impl Measurement {
    /// Reduces raw samples; an empty sample set yields zeros
    pub fn from_samples(samples_us: Vec<f64>) -> Self {
        if samples_us.is_empty() {
            return Self {
                samples_us,
                mean_us: 0.0,
                min_us: 0.0,
            };
        }
        let mean_us = samples_us.iter().sum::<f64>() / samples_us.len() as f64;
        let min_us = samples_us.iter().copied().fold(f64::INFINITY, f64::min);
        Self {
            samples_us,
            mean_us,
            min_us,
        }
    }

    /// Bandwidth at the mean duration
    pub fn bandwidth_gbps(&self, bytes: usize) -> f64 {
        bandwidth_gbps(self.mean_us, bytes)
    }
}

/// Times `f` according to `config`
///
/// The first error returned by `f`, warmup included, aborts the measurement.
pub fn measure<F, R>(config: &BenchConfig, mut f: F) -> Result<Measurement>
where
    F: FnMut() -> Result<R>,
{
    for _ in 0..config.warmup {
        black_box(f()?);
    }

    let mut samples = Vec::with_capacity(config.iterations);
    for _ in 0..config.iterations {
        let start = Instant::now();
        let out = f()?;
        let elapsed = start.elapsed();
        black_box(out);
        samples.push(elapsed.as_secs_f64() * 1e6);
    }

    let measurement = Measurement::from_samples(samples);
    info!(
        "{} runs: mean {:.2} µs, min {:.2} µs",
        measurement.samples_us.len(),
        measurement.mean_us,
        measurement.min_us
    );
    Ok(measurement)
}

/// Bytes one flow computation touches
///
/// `stored_entries · (size_of T + size_of usize)` for values and column
/// indices, plus `2 · vertices · size_of T` for the flow vector (written, then
/// read back by the caller).
///
/// The weight vector adds another `vertices · size_of T` on top of that
/// traffic model, since every kernel gathers from it. Reported bandwidth is
/// therefore higher than a figure that leaves the weights out, by
/// `vertices · size_of T / (1000 · mean_us)` GB/s.
pub fn bytes_moved<T>(stored_entries: usize, vertices: usize) -> usize {
    let value = std::mem::size_of::<T>();
    let index = std::mem::size_of::<usize>();
    stored_entries * (value + index) + vertices * value + 2 * vertices * value
}

/// Gigabytes per second for `bytes` moved in `mean_us` microseconds
///
/// `bytes / (1000 * mean_us)`; a zero duration gives infinity.
pub fn bandwidth_gbps(mean_us: f64, bytes: usize) -> f64 {
    bytes as f64 / (1000.0 * mean_us)
}
