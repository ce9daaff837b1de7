//! Square matrices and the naive baselines.
//!
//! These provide the correctness baseline and the layout helpers used by
//! the recursive implementations in [`crate::blocked`].

pub mod naive_ijk;
pub mod transpose;
pub mod transposed;
pub mod view;

use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::error::{BenchError, Result};
use view::{BlockView, BlockViewMut};

/// Square `f32` matrix stored row-major: element (i, j) is at `i * side + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    side: usize,
}

impl Matrix {
    pub fn zeros(side: usize) -> Self {
        Self {
            data: vec![0.0; side * side],
            side,
        }
    }

    /// Wrap an existing row-major buffer of `side * side` elements.
    pub fn from_vec(data: Vec<f32>, side: usize) -> Result<Self> {
        if data.len() != side * side {
            return Err(BenchError::DimensionMismatch {
                side,
                got: data.len(),
            });
        }
        Ok(Self { data, side })
    }

    /// Matrix with every element drawn uniformly from [-1.0, 1.0).
    ///
    /// ```
    /// use cachebench::Matrix;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let m = Matrix::random(8, &mut rng);
    /// assert_eq!(m.as_slice().len(), 64);
    /// assert!(m.as_slice().iter().all(|&x| (-1.0..1.0).contains(&x)));
    /// ```
    pub fn random<R: Rng + ?Sized>(side: usize, rng: &mut R) -> Self {
        let dist = Uniform::new(-1.0f32, 1.0f32);
        let data = (0..side * side).map(|_| dist.sample(rng)).collect();
        Self { data, side }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.side + j]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn view(&self) -> BlockView<'_> {
        BlockView::new(&self.data, self.side)
    }

    pub fn view_mut(&mut self) -> BlockViewMut<'_> {
        BlockViewMut::new(&mut self.data, self.side)
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}
