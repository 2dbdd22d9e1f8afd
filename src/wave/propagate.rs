use log::debug;
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::queue::linked::LinkedQueue;
use crate::wave::cell::{CellStep, SEED_STEP};
use crate::wave::grid::Grid;
use crate::wave::observer::{NullObserver, WaveObserver};

/// The 8-connected neighborhood, row offset then column offset.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Level-synchronized multi-source wave propagation.
///
/// The frontier is a FIFO [`LinkedQueue`] of [`CellStep`] records. A record
/// dequeued with step `k` only ever enqueues records with step `k + 1`, so
/// FIFO order keeps the queue sorted by non-decreasing step: every step-`k`
/// record is enqueued strictly before any step-`k + 1` record is dequeued.
/// The first claim of a cell is therefore the minimum number of propagation
/// rounds from the nearest seed, and cells are claimed exactly once.
///
/// `WavePropagation` is an [`Iterator`] whose items are the consumed waves,
/// one `Vec<CellStep>` per step value, starting with the seed wave.
/// Iterating to exhaustion (or calling [`WavePropagation::run`]) leaves the
/// grid holding the complete arrival map; running again performs no further
/// mutation.
#[derive(Debug)]
pub struct WavePropagation<'g> {
    grid: &'g mut Grid,
    frontier: LinkedQueue<CellStep>,
}

/// Totals for a propagation driven to completion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WaveStats {
    /// Number of waves expanded, including the seed wave.
    pub waves: usize,
    /// Cells reached by the propagation, seeds included.
    pub cells_reached: usize,
    /// Highest arrival step recorded, zero when there were no seeds.
    pub max_step: u32,
}

impl<'g> WavePropagation<'g> {
    /// Claims every seed with step 1 and queues it for expansion.
    ///
    /// Seeds are validated up front: a position outside the grid is
    /// [`Error::SeedOutOfBounds`] and leaves the grid untouched. Duplicate
    /// seeds, or seeds on cells already visited by an earlier run, are
    /// claimed once and queued once.
    pub fn new(grid: &'g mut Grid, seeds: impl IntoIterator<Item = (usize, usize)>) -> Result<Self> {
        let seeds: Vec<(usize, usize)> = seeds.into_iter().collect();
        for &(row, col) in &seeds {
            if !grid.in_bounds(row, col) {
                return Err(Error::SeedOutOfBounds {
                    row,
                    col,
                    rows: grid.rows(),
                    cols: grid.cols(),
                });
            }
        }

        let mut frontier = LinkedQueue::new();
        for (row, col) in seeds {
            if grid.claim(row, col, SEED_STEP) {
                frontier.enqueue(CellStep::new(row, col, SEED_STEP));
            }
        }

        debug_assert!(frontier.iter().all(|cell| cell.step == SEED_STEP));

        Ok(Self { grid, frontier })
    }

    /// Builds a propagation from seeds already marked in the grid.
    ///
    /// One pass over the grid collects every cell carrying the seed step.
    /// This is the initialization helper for grid providers that mark seeds
    /// directly in the input instead of passing a coordinate list.
    pub fn from_marked(grid: &'g mut Grid) -> Self {
        let seeds: Vec<(usize, usize)> = grid.seed_positions().collect();

        let mut frontier = LinkedQueue::new();
        for (row, col) in seeds {
            frontier.enqueue(CellStep::new(row, col, SEED_STEP));
        }

        Self { grid, frontier }
    }

    /// The grid being propagated into.
    #[inline]
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Number of records currently queued for expansion.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Expands one wave headlessly. See [`WavePropagation::step_with`].
    #[inline]
    pub fn step(&mut self) -> Option<Vec<CellStep>> {
        self.step_with(&mut NullObserver)
    }

    /// Expands the wave at the front of the frontier and returns it.
    ///
    /// Dequeues every record carrying the current lowest step value and
    /// claims the eligible part of each record's 8-connected neighborhood:
    /// a neighbor is eligible iff it lies within bounds and is unvisited.
    /// Claimed neighbors are enqueued with the next step value and reported
    /// to the observer, in claim order. Offsets falling outside the grid
    /// are silently rejected; there is no wraparound.
    ///
    /// Returns `None` when the frontier is empty, in which case nothing is
    /// mutated and the call is free to repeat.
    pub fn step_with<O: WaveObserver>(&mut self, observer: &mut O) -> Option<Vec<CellStep>> {
        let current = self.frontier.peek()?.step;

        let mut wave = Vec::new();
        while self.frontier.peek().is_some_and(|cell| cell.step == current) {
            let Some(cell) = self.frontier.dequeue() else {
                break;
            };
            self.expand(cell, observer);
            wave.push(cell);
        }

        // Invariants: the wave is one step level with no duplicate cells,
        // and everything left queued belongs to the next level.
        debug_assert!(wave.iter().all(|cell| cell.step == current));
        debug_assert!({
            let mut seen = FxHashSet::default();
            wave.iter().all(|cell| seen.insert(cell.position()))
        });
        debug_assert!(
            self.frontier
                .iter()
                .all(|cell| cell.step == current.saturating_add(1))
        );

        debug!(
            "wave {current}: expanded {} cells, {} queued for next wave",
            wave.len(),
            self.frontier.len()
        );
        observer.wave_complete(current, self.frontier.len());

        Some(wave)
    }

    fn expand<O: WaveObserver>(&mut self, cell: CellStep, observer: &mut O) {
        let next_step = cell.step.saturating_add(1);

        for (row_offset, col_offset) in NEIGHBOR_OFFSETS {
            let (Some(row), Some(col)) = (
                cell.row.checked_add_signed(row_offset),
                cell.col.checked_add_signed(col_offset),
            ) else {
                continue;
            };
            if !self.grid.in_bounds(row, col) {
                continue;
            }
            if self.grid.claim(row, col, next_step) {
                let claimed = CellStep::new(row, col, next_step);
                observer.cell_claimed(claimed);
                self.frontier.enqueue(claimed);
            }
        }
    }

    /// Runs to completion headlessly. See [`WavePropagation::run_with`].
    pub fn run(&mut self) -> WaveStats {
        self.run_with(&mut NullObserver)
    }

    /// Expands waves until the frontier can no longer grow.
    ///
    /// Terminates because each cell is claimed at most once and only
    /// claimed cells are enqueued: the count of unvisited cells strictly
    /// decreases on every claim.
    pub fn run_with<O: WaveObserver>(&mut self, observer: &mut O) -> WaveStats {
        let mut stats = WaveStats::default();

        while let Some(wave) = self.step_with(observer) {
            stats.waves += 1;
            stats.cells_reached += wave.len();
            if let Some(cell) = wave.first() {
                stats.max_step = stats.max_step.max(cell.step.get());
            }
        }

        stats
    }
}

impl Iterator for WavePropagation<'_> {
    type Item = Vec<CellStep>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

/// Convenience wrapper: seeds `grid`, runs to completion and returns the
/// totals. The arrival map is left in `grid`.
pub fn propagate(grid: &mut Grid, seeds: impl IntoIterator<Item = (usize, usize)>) -> Result<WaveStats> {
    let mut propagation = WavePropagation::new(grid, seeds)?;
    Ok(propagation.run())
}
