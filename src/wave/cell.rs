use std::num::NonZeroU32;

/// Arrival step of every seed cell.
pub const SEED_STEP: NonZeroU32 = NonZeroU32::MIN;

/// A frontier record: a grid position annotated with its arrival step.
///
/// Immutable once enqueued; the propagation only ever reads it back out of
/// the frontier to expand its neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellStep {
    pub row: usize,
    pub col: usize,
    /// 1-based arrival step: seeds carry [`SEED_STEP`], cells claimed while
    /// expanding a step-`k` record carry `k + 1`.
    pub step: NonZeroU32,
}

impl CellStep {
    pub fn new(row: usize, col: usize, step: NonZeroU32) -> Self {
        Self { row, col, step }
    }

    /// The position without the step annotation.
    #[inline]
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}
