/// Transpose a square matrix in place: M = M^T
///
/// Swaps every element below the diagonal with its mirror above it. No
/// blocking, so for large `n` the column-wise half of each swap walks the
/// matrix with stride `n` and misses the cache.
///
/// Applying it twice restores the original matrix exactly.
///
/// # Arguments
///
/// * `m` - Matrix (n × n), row-major, transposed in place
/// * `n` - Side length
///
/// # Example
///
/// ```
/// use cachebench::matrix::transpose::transpose_in_place;
///
/// let mut m = vec![1.0, 2.0, 3.0,
///                  4.0, 5.0, 6.0,
///                  7.0, 8.0, 9.0];
///
/// transpose_in_place(&mut m, 3);
///
/// assert_eq!(m, vec![1.0, 4.0, 7.0,
///                    2.0, 5.0, 8.0,
///                    3.0, 6.0, 9.0]);
/// ```
pub fn transpose_in_place(m: &mut [f32], n: usize) {
    assert_eq!(m.len(), n * n, "M: expected {}x{}={} elements", n, n, n * n);

    for i in 0..n {
        for j in 0..i {
            m.swap(i * n + j, j * n + i);
        }
    }
}
