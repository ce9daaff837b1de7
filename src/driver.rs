//! Timing every strategy over a range of matrix sizes.

use std::collections::HashSet;
use std::hint::black_box;
use std::io::{self, Write};
use std::time::Instant;

use log::{debug, info};
use rand::Rng;

use crate::compare::{VALIDATION_SIDE, compare};
use crate::error::{BenchError, Result};
use crate::matrix::Matrix;
use crate::strategy::Strategy;

/// Default sweep of matrix sides.
pub const DEFAULT_SIZES: [usize; 6] = [4, 32, 64, 128, 256, 512];

#[derive(Debug, Clone, PartialEq)]
pub struct MatmulConfig {
    /// Matrix sides to benchmark, strictly ascending.
    pub sizes: Vec<usize>,
    /// Strategies to time, in column order.
    pub strategies: Vec<Strategy>,
    /// Side of the operands used to validate each strategy against the baseline.
    pub validation_side: usize,
    /// Fixed RNG seed; entropy-seeded when `None`.
    pub seed: Option<u64>,
}

impl Default for MatmulConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            strategies: Strategy::ALL.to_vec(),
            validation_side: VALIDATION_SIDE,
            seed: None,
        }
    }
}

impl MatmulConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(BenchError::InvalidConfig("no matrix sizes given".into()));
        }
        if let Some(pair) = self.sizes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(BenchError::InvalidConfig(format!(
                "matrix sizes must be strictly ascending, got {} before {}",
                pair[0], pair[1]
            )));
        }
        if self.strategies.is_empty() {
            return Err(BenchError::InvalidConfig("no strategies given".into()));
        }
        let mut seen = HashSet::new();
        if let Some(strategy) = self.strategies.iter().find(|&&s| !seen.insert(s)) {
            return Err(BenchError::InvalidConfig(format!(
                "strategy {} listed more than once",
                strategy
            )));
        }
        Ok(())
    }
}

/// Elapsed microseconds per (size, strategy), filled after all runs finish.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    strategies: Vec<Strategy>,
    rows: Vec<(usize, Vec<u128>)>,
}

impl Report {
    pub fn new(strategies: Vec<Strategy>) -> Self {
        Self {
            strategies,
            rows: Vec::new(),
        }
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// `(size, micros per strategy)` rows in run order.
    pub fn rows(&self) -> &[(usize, Vec<u128>)] {
        &self.rows
    }

    /// Timing for one (strategy, size) pair.
    pub fn micros(&self, strategy: Strategy, size: usize) -> Option<u128> {
        let column = self.strategies.iter().position(|&s| s == strategy)?;
        self.rows
            .iter()
            .find(|(n, _)| *n == size)
            .map(|(_, timings)| timings[column])
    }

    fn push_row(&mut self, size: usize, timings: Vec<u128>) {
        debug_assert_eq!(timings.len(), self.strategies.len());
        self.rows.push((size, timings));
    }

    /// Write the report as `N,<strategy>,...,` followed by one row per size.
    ///
    /// Every line keeps a trailing comma, matching the plotting scripts that
    /// consume this output.
    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "N,")?;
        for strategy in &self.strategies {
            write!(out, "{},", strategy)?;
        }
        writeln!(out)?;

        for (size, timings) in &self.rows {
            write!(out, "{},", size)?;
            for micros in timings {
                write!(out, "{},", micros)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Run `f` once and return the elapsed wall-clock time in microseconds.
pub fn time_micros<F: FnOnce()>(f: F) -> u128 {
    let start = Instant::now();
    f();
    start.elapsed().as_micros()
}

/// Check every configured strategy against [`Strategy::Vanilla`].
pub fn validate_strategies<R: Rng + ?Sized>(config: &MatmulConfig, rng: &mut R) -> Result<()> {
    for &strategy in &config.strategies {
        if strategy == Strategy::Vanilla {
            continue;
        }
        compare(Strategy::Vanilla, strategy, config.validation_side, rng)?;
        info!(
            "{} validated against {} on {}x{}",
            strategy,
            Strategy::Vanilla,
            config.validation_side,
            config.validation_side
        );
    }
    Ok(())
}

/// Validate, then time every strategy at every size.
///
/// Operands are generated once per size; each strategy receives fresh
/// copies so a transposed B never leaks into the next measurement. Only the
/// multiplication itself is timed. Returns before timing anything if
/// validation fails.
pub fn run_benchmark<R: Rng + ?Sized>(config: &MatmulConfig, rng: &mut R) -> Result<Report> {
    run_benchmark_with(config, rng, validate_strategies)
}

/// [`run_benchmark`] with a caller-supplied validation step in place of
/// [`validate_strategies`]. Nothing is timed unless `validate` succeeds.
pub fn run_benchmark_with<R, V>(config: &MatmulConfig, rng: &mut R, validate: V) -> Result<Report>
where
    R: Rng + ?Sized,
    V: FnOnce(&MatmulConfig, &mut R) -> Result<()>,
{
    config.validate()?;
    validate(config, rng)?;

    let mut report = Report::new(config.strategies.clone());

    for &n in &config.sizes {
        let a = Matrix::random(n, rng);
        let b = Matrix::random(n, rng);

        let timings = config
            .strategies
            .iter()
            .map(|&strategy| {
                let mut b_copy = b.clone();
                let mut c = Matrix::zeros(n);
                let micros = time_micros(|| strategy.run(&a, &mut b_copy, &mut c));
                black_box(&c);
                debug!("{}x{} {}: {} us", n, n, strategy, micros);
                micros
            })
            .collect();

        info!("finished {}x{}", n, n);
        report.push_row(n, timings);
    }

    Ok(report)
}
