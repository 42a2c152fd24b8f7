//! Addressing for a grid padded with a one-cell ghost ring.
//!
//! Every field of the solver shares one [`GridLayout`]. Widths and heights
//! reported here include the ring; the simulated domain is
//! `[1, width - 2] x [1, height - 2]`.

use crate::error::{FluidError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    width: usize,
    height: usize,
}

impl GridLayout {
    /// Builds the layout for an `inner_width x inner_height` domain.
    pub fn new(inner_width: usize, inner_height: usize) -> Result<Self> {
        if inner_width == 0 || inner_height == 0 {
            return Err(FluidError::ZeroDimension {
                width: inner_width,
                height: inner_height,
            });
        }

        Ok(Self {
            width: inner_width + 2,
            height: inner_height + 2,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn inner_width(&self) -> usize {
        self.width - 2
    }

    pub fn inner_height(&self) -> usize {
        self.height - 2
    }

    /// Number of cells in a field, ghost ring included.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false: construction rejects zero interior dimensions, so the
    /// ghost ring alone keeps `len() >= 9`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index, no bounds check. Caller keeps `x < width`, `y < height`.
    #[inline(always)]
    pub fn ix(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// Flat index with both coordinates clamped onto the stored grid.
    #[inline]
    pub fn ix_clamped(&self, x: usize, y: usize) -> usize {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.ix(x, y)
    }

    pub fn ix_checked(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| self.ix(x, y))
    }

    pub fn is_boundary(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    /// Interior cells in row-major order (`y` outer, `x` inner).
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (w, h) = (self.width, self.height);
        (1..h - 1).flat_map(move |y| (1..w - 1).map(move |x| (x, y)))
    }

    /// Index of a bilinear lattice point produced by advection.
    ///
    /// Uses the same `x + y * width` formula as [`ix`](Self::ix); the
    /// backtrace clamp allows points one column/row past the ring, so the
    /// result is pinned to the last cell when it runs off the buffer.
    #[inline]
    pub(crate) fn lattice(&self, x: usize, y: usize) -> usize {
        self.ix(x, y).min(self.len() - 1)
    }
}
