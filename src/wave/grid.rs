use std::num::NonZeroU32;

use crate::wave::cell::SEED_STEP;

/// Dense row-major 2D grid of optional arrival steps.
///
/// `None` means the cell has never been reached; `Some(step)` is the 1-based
/// step at which the wave first arrived. Keeping the step optional instead
/// of reserving zero as a sentinel makes "unvisited" and the valid step
/// range disjoint by construction.
///
/// The grid is allocated up front and never resized; the propagation only
/// rewrites cell values, and each cell goes from `None` to `Some` at most
/// once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Box<[Option<NonZeroU32>]>,
}

impl Grid {
    /// Creates a `rows x cols` grid with every cell unvisited.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true when `(row, col)` lies within the grid.
    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(self.in_bounds(row, col));
        row * self.cols + col
    }

    /// Arrival step of a cell, or `None` when it was never reached.
    ///
    /// Panics when `(row, col)` is out of bounds; bounds are a precondition
    /// for direct cell access, only neighbor expansion gets a silent skip.
    #[inline]
    pub fn arrival(&self, row: usize, col: usize) -> Option<NonZeroU32> {
        self.cells[self.index(row, col)]
    }

    /// Returns true when the cell has been reached.
    #[inline]
    pub fn is_visited(&self, row: usize, col: usize) -> bool {
        self.arrival(row, col).is_some()
    }

    /// Claims an unvisited cell with the given arrival step.
    ///
    /// Returns true when the cell transitioned from unvisited to visited,
    /// false when some earlier wave already claimed it. The first claim is
    /// permanent, which is what makes multi-source arrival steps minimal.
    #[inline]
    pub fn claim(&mut self, row: usize, col: usize, step: NonZeroU32) -> bool {
        let slot = &mut self.cells[self.index(row, col)];
        match slot {
            Some(_) => false,
            None => {
                *slot = Some(step);
                true
            }
        }
    }

    /// Positions of every cell currently marked with the seed step.
    ///
    /// This is the single enumeration pass a grid provider relies on when
    /// seeds arrive pre-marked in the input rather than as a coordinate
    /// list.
    pub fn seed_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Some(SEED_STEP))
            .map(|(index, _)| (index / self.cols, index % self.cols))
    }

    /// Iterator over all cells as `(row, col, arrival)` triples in row-major
    /// order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Option<NonZeroU32>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (index / self.cols, index % self.cols, *cell))
    }

    /// Number of cells reached so far.
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}
