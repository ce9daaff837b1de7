//! Cache-oblivious recursive matrix multiplication.
//!
//! Splits A, B and C into quadrants until a block fits comfortably in L1,
//! then falls back to a plain triple loop. No parameter depends on the cache
//! size: each level of recursion halves the working set, so some level fits
//! every cache in the hierarchy.

use crate::matrix::view::{BlockView, BlockViewMut};

/// Blocks at or below this side are multiplied with a direct triple loop.
pub const MATMUL_BASE_CASE: usize = 32;

/// Cache-oblivious matrix multiply: C = A * B
///
/// C is cleared before the recursion starts, so any buffer can be passed.
/// Use [`matmul_oblivious_accumulate`] to add into an existing C instead.
///
/// # Example
///
/// ```
/// use cachebench::blocked::oblivious::matmul_cache_oblivious;
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [5.0, 6.0, 7.0, 8.0];
/// let mut c = [100.0; 4];
///
/// matmul_cache_oblivious(&a, &b, &mut c, 2);
///
/// assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
/// ```
pub fn matmul_cache_oblivious(a: &[f32], b: &[f32], c: &mut [f32], n: usize) {
    c.fill(0.0);
    matmul_oblivious_accumulate(a, b, c, n);
}

/// Cache-oblivious matrix multiply accumulating into C: C += A * B
///
/// # Panics
///
/// Panics if any slice does not hold exactly `n * n` elements.
pub fn matmul_oblivious_accumulate(a: &[f32], b: &[f32], c: &mut [f32], n: usize) {
    assert_eq!(a.len(), n * n, "A: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(b.len(), n * n, "B: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(c.len(), n * n, "C: expected {}x{}={} elements", n, n, n * n);

    matmul_block(BlockView::new(a, n), BlockView::new(b, n), BlockViewMut::new(c, n));
}

fn matmul_block(a: BlockView<'_>, b: BlockView<'_>, mut c: BlockViewMut<'_>) {
    let n = c.side();

    if n <= MATMUL_BASE_CASE {
        for i in 0..n {
            for j in 0..n {
                let mut sum = 0.0f32;
                for p in 0..n {
                    sum += a.get(i, p) * b.get(p, j);
                }
                c.add(i, j, sum);
            }
        }
        return;
    }

    let k = n / 2;
    let (a00, a01, a10, a11) = (
        a.quadrant(0, 0, k),
        a.quadrant(0, 1, k),
        a.quadrant(1, 0, k),
        a.quadrant(1, 1, k),
    );
    let (b00, b01, b10, b11) = (
        b.quadrant(0, 0, k),
        b.quadrant(0, 1, k),
        b.quadrant(1, 0, k),
        b.quadrant(1, 1, k),
    );

    matmul_block(a00, b00, c.quadrant(0, 0, k));
    matmul_block(a01, b10, c.quadrant(0, 0, k));
    matmul_block(a00, b01, c.quadrant(0, 1, k));
    matmul_block(a01, b11, c.quadrant(0, 1, k));
    matmul_block(a10, b00, c.quadrant(1, 0, k));
    matmul_block(a11, b10, c.quadrant(1, 0, k));
    matmul_block(a10, b01, c.quadrant(1, 1, k));
    matmul_block(a11, b11, c.quadrant(1, 1, k));

    if n % 2 == 1 {
        // The quadrants cover rows, columns and the reduction up to n - 1.
        // Inside that core only the last reduction term is missing; the last
        // row and column need the full sum.
        let last = n - 1;
        for i in 0..n {
            for j in 0..n {
                let start = if i < last && j < last { last } else { 0 };
                let mut sum = 0.0f32;
                for p in start..n {
                    sum += a.get(i, p) * b.get(p, j);
                }
                c.add(i, j, sum);
            }
        }
    }
}
