//! Recursive, cache-friendly implementations.
//!
//! These functions break the matrix into quadrants until a block fits in
//! L1, working on borrowed [`BlockView`](crate::matrix::view::BlockView)s
//! so no sub-matrix is ever copied.
//!
//! Available implementations:
//! - `recursive_transpose`: Cache-aware in-place transpose
//! - `oblivious`: Cache-oblivious 2×2 block-recursive multiply

pub mod oblivious;
pub mod recursive_transpose;
