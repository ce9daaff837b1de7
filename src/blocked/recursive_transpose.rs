//! Cache-aware in-place transpose by recursive quadrant splitting.

use crate::matrix::view::BlockViewMut;

/// Blocks at or below this side are transposed with a direct swap loop.
///
/// A 32×32 `f32` block is 4 KiB, small enough that both halves of every
/// swap stay resident in L1.
pub const TRANSPOSE_BASE_CASE: usize = 32;

/// Transpose a square matrix in place using divide-and-conquer.
///
/// Performs exactly the same swaps as
/// [`transpose_in_place`](crate::matrix::transpose::transpose_in_place),
/// but in an order that keeps the working set of each step inside the cache.
///
/// # Example
///
/// ```
/// use cachebench::blocked::recursive_transpose::transpose_recursive;
/// use cachebench::matrix::transpose::transpose_in_place;
///
/// let n = 67;
/// let original: Vec<f32> = (0..n * n).map(|i| i as f32).collect();
///
/// let mut fast = original.clone();
/// let mut slow = original.clone();
/// transpose_recursive(&mut fast, n);
/// transpose_in_place(&mut slow, n);
///
/// assert_eq!(fast, slow);
/// ```
pub fn transpose_recursive(m: &mut [f32], n: usize) {
    assert_eq!(m.len(), n * n, "M: expected {}x{}={} elements", n, n, n * n);

    transpose_block(BlockViewMut::new(m, n));
}

fn transpose_block(mut block: BlockViewMut<'_>) {
    let n = block.side();

    if n <= TRANSPOSE_BASE_CASE {
        for i in 0..n {
            for j in 0..i {
                block.swap((i, j), (j, i));
            }
        }
        return;
    }

    let k = n / 2;
    transpose_block(block.quadrant(0, 0, k));
    transpose_block(block.quadrant(1, 1, k));

    // Off-diagonal quadrants: transposing and exchanging them is one swap per
    // pair across the diagonal.
    for i in 0..k {
        for j in 0..k {
            block.swap((i, k + j), (k + j, i));
        }
    }

    if n % 2 == 1 {
        let last = n - 1;
        for i in 0..last {
            block.swap((i, last), (last, i));
        }
    }
}
