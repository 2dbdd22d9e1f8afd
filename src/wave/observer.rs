use std::num::NonZeroU32;

use crate::wave::cell::CellStep;

/// Hook into the propagation for rendering or instrumentation.
///
/// The core calls these at well defined points and otherwise stays free of
/// presentation concerns; an animated console front end claims cells and
/// paces waves here, while headless runs use [`NullObserver`].
pub trait WaveObserver {
    /// Called once per successful cell claim, in claim order.
    fn cell_claimed(&mut self, cell: CellStep) {
        let _ = cell;
    }

    /// Called after every wave has been fully expanded. `frontier_len` is
    /// the number of records queued for the next wave.
    fn wave_complete(&mut self, step: NonZeroU32, frontier_len: usize) {
        let _ = (step, frontier_len);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl WaveObserver for NullObserver {}

/// Collects claimed cells in claim order. Mostly useful in tests and small
/// tools that want the full claim history.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub claims: Vec<CellStep>,
}

impl WaveObserver for RecordingObserver {
    fn cell_claimed(&mut self, cell: CellStep) {
        self.claims.push(cell);
    }
}
