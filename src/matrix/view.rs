//! Borrowed square sub-blocks of a row-major buffer.
//!
//! The recursive routines address quadrants through an offset and the row
//! stride of the full matrix, so splitting a block never copies data.

/// Read-only square block: element (i, j) lives at `offset + i * stride + j`.
#[derive(Debug, Clone, Copy)]
pub struct BlockView<'a> {
    data: &'a [f32],
    offset: usize,
    stride: usize,
    side: usize,
}

impl<'a> BlockView<'a> {
    /// View a whole `side × side` row-major buffer.
    ///
    /// # Panics
    ///
    /// Panics if `data` holds fewer than `side * side` elements.
    pub fn new(data: &'a [f32], side: usize) -> Self {
        assert!(
            data.len() >= side * side,
            "block view: expected {}x{}={} elements, got {}",
            side,
            side,
            side * side,
            data.len()
        );
        Self {
            data,
            offset: 0,
            stride: side,
            side,
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[self.offset + i * self.stride + j]
    }

    /// Quadrant `(row, col)` with `row, col ∈ {0, 1}` of side `half`.
    ///
    /// `half` is passed explicitly because odd blocks split into two
    /// `side / 2` halves plus a leftover row and column.
    #[inline]
    pub fn quadrant(&self, row: usize, col: usize, half: usize) -> BlockView<'a> {
        debug_assert!(row < 2 && col < 2 && 2 * half <= self.side);
        BlockView {
            data: self.data,
            offset: self.offset + row * half * self.stride + col * half,
            stride: self.stride,
            side: half,
        }
    }
}

/// Mutable square block over a row-major buffer.
#[derive(Debug)]
pub struct BlockViewMut<'a> {
    data: &'a mut [f32],
    offset: usize,
    stride: usize,
    side: usize,
}

impl<'a> BlockViewMut<'a> {
    /// # Panics
    ///
    /// Panics if `data` holds fewer than `side * side` elements.
    pub fn new(data: &'a mut [f32], side: usize) -> Self {
        assert!(
            data.len() >= side * side,
            "block view: expected {}x{}={} elements, got {}",
            side,
            side,
            side * side,
            data.len()
        );
        Self {
            data,
            offset: 0,
            stride: side,
            side,
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        self.offset + i * self.stride + j
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[self.index(i, j)]
    }

    #[inline]
    pub fn add(&mut self, i: usize, j: usize, value: f32) {
        let idx = self.index(i, j);
        self.data[idx] += value;
    }

    /// Swap elements (i1, j1) and (i2, j2) of this block.
    #[inline]
    pub fn swap(&mut self, (i1, j1): (usize, usize), (i2, j2): (usize, usize)) {
        let a = self.index(i1, j1);
        let b = self.index(i2, j2);
        self.data.swap(a, b);
    }

    /// Mutable quadrant, reborrowing this block for the lifetime of the result.
    #[inline]
    pub fn quadrant(&mut self, row: usize, col: usize, half: usize) -> BlockViewMut<'_> {
        debug_assert!(row < 2 && col < 2 && 2 * half <= self.side);
        BlockViewMut {
            offset: self.offset + row * half * self.stride + col * half,
            stride: self.stride,
            side: half,
            data: &mut *self.data,
        }
    }
}
