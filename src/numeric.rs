//! Relative cost of add, multiply and divide across numeric types.

use std::fmt;
use std::hint::black_box;
use std::io::{self, Write};

use log::debug;
use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::driver::time_micros;
use crate::error::{BenchError, Result};

/// Scalar type whose arithmetic is being measured.
///
/// Integer implementations wrap on overflow: products of millions of values
/// overflow almost immediately and that is part of what is measured.
pub trait Element: Copy + fmt::Display + Send + Sync + 'static {
    const NAME: &'static str;
    const ZERO: Self;
    const ONE: Self;

    fn add(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn div(self, rhs: Self) -> Self;

    /// Value drawn uniformly from [-10, 10) for floats or [-10, 10] for
    /// integers, with zero replaced by one.
    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

macro_rules! impl_float_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const NAME: &'static str = stringify!($t);
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn add(self, rhs: Self) -> Self { self + rhs }
            #[inline]
            fn mul(self, rhs: Self) -> Self { self * rhs }
            #[inline]
            fn div(self, rhs: Self) -> Self { self / rhs }

            fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
                let value = Uniform::new(-10.0 as $t, 10.0 as $t).sample(rng);
                if value == 0.0 { 1.0 } else { value }
            }
        }
    )*};
}

macro_rules! impl_int_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const NAME: &'static str = stringify!($t);
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn add(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
            #[inline]
            fn mul(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
            #[inline]
            fn div(self, rhs: Self) -> Self { self.wrapping_div(rhs) }

            fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
                let value = Uniform::new_inclusive(-10 as $t, 10 as $t).sample(rng);
                if value == 0 { 1 } else { value }
            }
        }
    )*};
}

impl_float_element!(f32, f64);
impl_int_element!(i16, i32, i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Multiply, Operation::Divide];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Add => "Add",
            Operation::Multiply => "Multiply",
            Operation::Divide => "Divide",
        })
    }
}

/// Sum of every element.
pub fn sum<T: Element>(values: &[T]) -> T {
    values.iter().fold(T::ZERO, |acc, &x| acc.add(x))
}

/// Product of every element except the last, starting from one.
pub fn product<T: Element>(values: &[T]) -> T {
    let body = values.split_last().map_or(&[][..], |(_, rest)| rest);
    body.iter().fold(T::ONE, |acc, &x| acc.mul(x))
}

/// One divided successively by every element except the last.
pub fn quotient<T: Element>(values: &[T]) -> T {
    let body = values.split_last().map_or(&[][..], |(_, rest)| rest);
    body.iter().fold(T::ONE, |acc, &x| acc.div(x))
}

pub fn random_values<T: Element, R: Rng + ?Sized>(length: usize, rng: &mut R) -> Vec<T> {
    (0..length).map(|_| T::sample(rng)).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericTiming {
    pub type_name: &'static str,
    pub operation: Operation,
    pub micros: u128,
    /// Final value, rendered so the computation is observable.
    pub result: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericConfig {
    /// Elements per array.
    pub length: usize,
    /// How many times the Add benchmark sums the array.
    pub repeats: usize,
    pub seed: Option<u64>,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            length: 10_000_000,
            repeats: 1000,
            seed: None,
        }
    }
}

impl NumericConfig {
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(BenchError::InvalidConfig("array length must be positive".into()));
        }
        if self.repeats == 0 {
            return Err(BenchError::InvalidConfig("repeat count must be positive".into()));
        }
        Ok(())
    }
}

/// Time `operation` on a fresh random array of `T`.
pub fn bench_operation<T: Element, R: Rng + ?Sized>(
    operation: Operation,
    config: &NumericConfig,
    rng: &mut R,
) -> NumericTiming {
    let values: Vec<T> = random_values(config.length, rng);
    let mut result = T::ZERO;

    let micros = time_micros(|| {
        result = match operation {
            Operation::Add => {
                let mut total = T::ZERO;
                for _ in 0..config.repeats {
                    total = sum(black_box(&values));
                }
                total
            }
            Operation::Multiply => product(&values),
            Operation::Divide => quotient(&values),
        };
    });

    debug!("{} {}: {} us", T::NAME, operation, micros);
    NumericTiming {
        type_name: T::NAME,
        operation,
        micros,
        result: result.to_string(),
    }
}

/// Every operation for every supported type, grouped by operation.
pub fn run_numeric<R: Rng + ?Sized>(config: &NumericConfig, rng: &mut R) -> Result<Vec<NumericTiming>> {
    config.validate()?;

    let mut timings = Vec::with_capacity(Operation::ALL.len() * 5);
    for operation in Operation::ALL {
        timings.push(bench_operation::<f32, _>(operation, config, rng));
        timings.push(bench_operation::<f64, _>(operation, config, rng));
        timings.push(bench_operation::<i16, _>(operation, config, rng));
        timings.push(bench_operation::<i32, _>(operation, config, rng));
        timings.push(bench_operation::<i64, _>(operation, config, rng));
    }
    Ok(timings)
}

/// Write `Type,Operation,Duration,Result,` followed by one row per timing.
pub fn write_csv<W: Write>(timings: &[NumericTiming], mut out: W) -> io::Result<()> {
    writeln!(out, "Type,Operation,Duration,Result,")?;
    for t in timings {
        writeln!(out, "{},{},{},{},", t.type_name, t.operation, t.micros, t.result)?;
    }
    Ok(())
}
