//! Named multiplication strategies.

use std::fmt;
use std::str::FromStr;

use crate::blocked::oblivious::matmul_cache_oblivious;
use crate::error::BenchError;
use crate::matrix::Matrix;
use crate::matrix::naive_ijk::matmul_naive_ijk;
use crate::matrix::transposed::{matmul_cache_aware_transposed, matmul_transposed};

/// One of the four multiplication strategies being compared.
///
/// Variants are declared in report order; the numeric prefix of each name
/// keeps that order when the CSV columns are sorted by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    /// Textbook i-j-k loops, no cache awareness.
    Vanilla,
    /// Plain in-place transpose of B, then row-by-row dot products.
    Transposition,
    /// Recursive cache-aware transpose of B, then row-by-row dot products.
    CacheAwareTransposition,
    /// Recursive 2×2 block decomposition of the whole product.
    CacheOblivious,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Vanilla,
        Strategy::Transposition,
        Strategy::CacheAwareTransposition,
        Strategy::CacheOblivious,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Vanilla => "1_vanilla",
            Strategy::Transposition => "2_vanilla_transposition",
            Strategy::CacheAwareTransposition => "3_cache_optimized_transposition",
            Strategy::CacheOblivious => "4_cache_oblivious",
        }
    }

    /// Whether running this strategy leaves B transposed.
    pub fn mutates_b(self) -> bool {
        matches!(
            self,
            Strategy::Transposition | Strategy::CacheAwareTransposition
        )
    }

    /// Compute C = A * B on raw row-major buffers.
    pub fn run_slices(self, a: &[f32], b: &mut [f32], c: &mut [f32], n: usize) {
        match self {
            Strategy::Vanilla => matmul_naive_ijk(a, b, c, n),
            Strategy::Transposition => matmul_transposed(a, b, c, n),
            Strategy::CacheAwareTransposition => matmul_cache_aware_transposed(a, b, c, n),
            Strategy::CacheOblivious => matmul_cache_oblivious(a, b, c, n),
        }
    }

    /// Compute C = A * B.
    ///
    /// B is left transposed when [`Strategy::mutates_b`] is true.
    ///
    /// # Panics
    ///
    /// Panics if the three matrices don't share the same side.
    ///
    /// # Example
    ///
    /// ```
    /// use cachebench::{Matrix, Strategy};
    ///
    /// let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
    /// let mut b = Matrix::from_vec(vec![5.0, 6.0, 7.0, 8.0], 2).unwrap();
    /// let mut c = Matrix::zeros(2);
    ///
    /// Strategy::Transposition.run(&a, &mut b, &mut c);
    ///
    /// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    /// assert_eq!(b.as_slice(), &[5.0, 7.0, 6.0, 8.0]);
    /// ```
    pub fn run(self, a: &Matrix, b: &mut Matrix, c: &mut Matrix) {
        let n = a.side();
        assert_eq!(b.side(), n, "B: expected side {}, got {}", n, b.side());
        assert_eq!(c.side(), n, "C: expected side {}, got {}", n, c.side());

        self.run_slices(a.as_slice(), b.as_mut_slice(), c.as_mut_slice(), n);
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = BenchError;

    /// Accepts the report name (`4_cache_oblivious`) or the bare name
    /// (`cache_oblivious`, `cache-oblivious`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Strategy::ALL
            .into_iter()
            .find(|strategy| {
                let name = strategy.name();
                name == key || name.split_once('_').is_some_and(|(_, bare)| bare == key)
            })
            .ok_or_else(|| BenchError::UnknownStrategy(s.to_string()))
    }
}
