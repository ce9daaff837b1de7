use super::transpose::transpose_in_place;
use crate::blocked::recursive_transpose::transpose_recursive;

/// Multiplication with an already transposed B matrix.
///
/// When B is stored as B^T, the reduction reads `bt[j * n + p]`, so both
/// operands of the inner loop are walked row-major with stride 1.
///
/// # Arguments
///
/// * `a` - Matrix A (n × n), row-major
/// * `bt` - Transposed matrix B^T (n × n), row-major
/// * `c` - Matrix C (n × n), overwritten with A * B
pub fn matmul_pretransposed(a: &[f32], bt: &[f32], c: &mut [f32], n: usize) {
    for i in 0..n {
        let a_row = &a[i * n..(i + 1) * n];
        for j in 0..n {
            let b_row = &bt[j * n..(j + 1) * n];
            let mut sum = 0.0f32;
            for p in 0..n {
                sum += a_row[p] * b_row[p];
            }
            c[i * n + j] = sum;
        }
    }
}

/// Transpose B in place with the plain swap loop, then multiply.
///
/// B is left transposed when this returns; copy it first if the original
/// orientation is still needed.
pub fn matmul_transposed(a: &[f32], b: &mut [f32], c: &mut [f32], n: usize) {
    transpose_in_place(b, n);
    matmul_pretransposed(a, b, c, n);
}

/// Transpose B in place with the recursive cache-aware transpose, then multiply.
///
/// Same side effect as [`matmul_transposed`]: B is left transposed.
pub fn matmul_cache_aware_transposed(a: &[f32], b: &mut [f32], c: &mut [f32], n: usize) {
    transpose_recursive(b, n);
    matmul_pretransposed(a, b, c, n);
}
