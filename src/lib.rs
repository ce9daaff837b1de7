//! Micro-benchmarks for the memory hierarchy, built from scratch.
//!
//! The main course is square matrix multiplication four ways, from the
//! textbook triple loop to a cache-oblivious recursive decomposition. Two
//! smaller programs ride along: false sharing between threads, and the cost
//! of arithmetic across numeric types.
//!
//! ## Usage
//!
//! ```
//! use cachebench::{Matrix, Strategy};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let a = Matrix::random(100, &mut rng);
//! let mut b = Matrix::random(100, &mut rng);
//! let mut c = Matrix::zeros(100);
//!
//! Strategy::CacheOblivious.run(&a, &mut b, &mut c);
//! ```
//!
//! To time every strategy over a sweep of sizes:
//!
//! ```
//! use cachebench::{MatmulConfig, rng_from_seed, run_benchmark};
//!
//! let config = MatmulConfig {
//!     sizes: vec![8, 16, 33],
//!     validation_side: 40,
//!     ..MatmulConfig::default()
//! };
//! let mut rng = rng_from_seed(Some(1));
//! let report = run_benchmark(&config, &mut rng).unwrap();
//!
//! report.write_csv(std::io::stdout()).unwrap();
//! ```
//!
//! ## What's inside
//!
//! - Naive i-j-k baseline
//! - Transpose-then-multiply, with a plain or a recursive cache-aware transpose
//! - Cache-oblivious 2×2 block-recursive multiply
//! - A comparator that rejects any strategy drifting more than 1e-4 from the baseline

pub mod blocked;
pub mod compare;
pub mod driver;
pub mod error;
pub mod false_sharing;
pub mod matrix;
pub mod numeric;
pub mod strategy;

use rand::SeedableRng;
use rand::rngs::StdRng;

pub use blocked::oblivious::matmul_cache_oblivious;
pub use blocked::recursive_transpose::transpose_recursive;
pub use compare::{EPSILON, compare};
pub use driver::{MatmulConfig, Report, run_benchmark};
pub use error::{BenchError, Result};
pub use matrix::Matrix;
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::transpose::transpose_in_place;
pub use strategy::Strategy;

/// Seeded RNG for reproducible runs, entropy-seeded when `seed` is `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
