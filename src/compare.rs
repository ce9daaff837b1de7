//! Cross-checking two strategies on identical operands.

use log::debug;
use rand::Rng;

use crate::error::{BenchError, Result};
use crate::matrix::Matrix;
use crate::strategy::Strategy;

/// Largest absolute per-cell difference tolerated between two strategies.
pub const EPSILON: f32 = 1e-4;

/// Side length used by the benchmark driver when validating strategies.
pub const VALIDATION_SIDE: usize = 64;

/// First cell where `expected` and `actual` differ by more than [`EPSILON`].
///
/// Returns `(row, col, expected, actual)`.
pub fn first_mismatch(expected: &Matrix, actual: &Matrix) -> Option<(usize, usize, f32, f32)> {
    let n = expected.side();
    assert_eq!(actual.side(), n, "side mismatch: {} vs {}", n, actual.side());

    expected
        .as_slice()
        .iter()
        .zip(actual.as_slice())
        // NaN never compares within tolerance.
        .position(|(x, y)| !((x - y).abs() <= EPSILON))
        .map(|idx| (idx / n, idx % n, expected.as_slice()[idx], actual.as_slice()[idx]))
}

/// Run `left` and `right` on the same random `n × n` operands and compare
/// every output cell.
///
/// Both strategies get their own copy of B, taken before either one runs,
/// so a strategy that transposes B cannot skew the other's input.
pub fn compare<R: Rng + ?Sized>(
    left: Strategy,
    right: Strategy,
    n: usize,
    rng: &mut R,
) -> Result<()> {
    let a = Matrix::random(n, rng);
    let b = Matrix::random(n, rng);
    compare_on(left, right, &a, &b)
}

/// [`compare`] on caller-supplied operands.
pub fn compare_on(left: Strategy, right: Strategy, a: &Matrix, b: &Matrix) -> Result<()> {
    let n = a.side();

    let mut b_left = b.clone();
    let mut b_right = b.clone();
    let mut c_left = Matrix::zeros(n);
    let mut c_right = Matrix::zeros(n);

    left.run(a, &mut b_left, &mut c_left);
    right.run(a, &mut b_right, &mut c_right);

    match first_mismatch(&c_left, &c_right) {
        None => {
            debug!("{} matches {} on {}x{}", right, left, n, n);
            Ok(())
        }
        Some((row, col, expected, actual)) => Err(BenchError::Mismatch {
            left: left.name(),
            right: right.name(),
            row,
            col,
            expected,
            actual,
        }),
    }
}
