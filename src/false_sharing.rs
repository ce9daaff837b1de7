//! False sharing: threads summing disjoint chunks into nearby result slots.
//!
//! Every thread owns its result slot exclusively, yet when slots sit closer
//! than a cache line the line ping-pongs between cores on every write.
//! Spacing the slots `offset` floats apart shows where that stops.

use std::hint::black_box;
use std::thread;

use log::debug;
use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::driver::time_micros;
use crate::error::{BenchError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct FalseSharingConfig {
    /// Number of floats summed per run.
    pub length: usize,
    pub threads: usize,
    /// Distances, in `f32` slots, between consecutive thread results.
    pub offsets: Vec<usize>,
    pub seed: Option<u64>,
}

impl Default for FalseSharingConfig {
    fn default() -> Self {
        Self {
            length: 10_000,
            threads: 16,
            offsets: vec![1, 2, 4, 8, 16, 32, 64, 128],
            seed: None,
        }
    }
}

impl FalseSharingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(BenchError::InvalidConfig("thread count must be positive".into()));
        }
        if self.offsets.is_empty() {
            return Err(BenchError::InvalidConfig("no slot offsets given".into()));
        }
        if self.offsets.contains(&0) {
            return Err(BenchError::InvalidConfig("slot offsets must be positive".into()));
        }
        if let Some(pair) = self.offsets.windows(2).find(|w| w[0] >= w[1]) {
            return Err(BenchError::InvalidConfig(format!(
                "slot offsets must be strictly ascending, got {} before {}",
                pair[0], pair[1]
            )));
        }
        Ok(())
    }
}

/// Array of `length` floats drawn uniformly from [-1.0, 1.0).
pub fn random_array<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Vec<f32> {
    let dist = Uniform::new(-1.0f32, 1.0f32);
    (0..length).map(|_| dist.sample(rng)).collect()
}

/// Sum `values` on `threads` threads, each writing its running total to a
/// slot `offset` floats after the previous thread's slot.
///
/// Chunks hold `ceil(len / threads)` elements, so trailing threads may get
/// fewer (or none). A single thread sums directly without spawning.
///
/// # Panics
///
/// Panics if `threads` or `offset` is zero.
///
/// # Example
///
/// ```
/// use cachebench::false_sharing::parallel_sum;
///
/// let values: Vec<f32> = (1..=100).map(|i| i as f32).collect();
/// assert_eq!(parallel_sum(&values, 4, 16), 5050.0);
/// ```
pub fn parallel_sum(values: &[f32], threads: usize, offset: usize) -> f32 {
    assert!(threads > 0, "at least one thread is required");
    assert!(offset > 0, "slot offset must be positive");

    if threads == 1 {
        let mut slot = [0.0f32];
        accumulate(values, &mut slot[0]);
        return slot[0];
    }

    let chunk_len = values.len().div_ceil(threads).max(1);
    let mut results = vec![0.0f32; threads * offset];

    thread::scope(|scope| {
        for (chunk, slots) in values.chunks(chunk_len).zip(results.chunks_mut(offset)) {
            scope.spawn(move || accumulate(chunk, &mut slots[0]));
        }
    });

    results.iter().step_by(offset).sum()
}

/// Add every value into `slot`, forcing a store per element.
fn accumulate(values: &[f32], slot: &mut f32) {
    for &x in values {
        *slot += x;
        black_box(&mut *slot);
    }
}

/// Time [`parallel_sum`] once per configured offset on a fresh random array.
///
/// Returns `(offset, micros)` pairs in ascending offset order.
pub fn run_false_sharing<R: Rng + ?Sized>(
    config: &FalseSharingConfig,
    rng: &mut R,
) -> Result<Vec<(usize, u128)>> {
    config.validate()?;

    let timings = config
        .offsets
        .iter()
        .map(|&offset| {
            let values = random_array(config.length, rng);
            let mut total = 0.0;
            let micros = time_micros(|| total = parallel_sum(&values, config.threads, offset));
            debug!("offset {}: {} us (sum {})", offset, micros, total);
            (offset, micros)
        })
        .collect();

    Ok(timings)
}

/// Write `Offset,Duration,` followed by one `offset,micros` row per run.
pub fn write_csv<W: std::io::Write>(timings: &[(usize, u128)], mut out: W) -> std::io::Result<()> {
    writeln!(out, "Offset,Duration,")?;
    for (offset, micros) in timings {
        writeln!(out, "{},{}", offset, micros)?;
    }
    Ok(())
}
