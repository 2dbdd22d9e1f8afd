//! Multi-source breadth-first wave propagation over dense 2D grids.
//!
//! Starting from one or more seed cells, a wave expands to the 8-connected
//! neighborhood in discrete synchronized steps, recording for every cell the
//! step at which it was first reached. The frontier is a strictly FIFO
//! linked queue, which is what makes the traversal level synchronized: all
//! records of step `k` are enqueued before any record of step `k + 1` is
//! dequeued, so the first write to a cell is always the minimum over all
//! seeds.
//!
//! The crate splits into:
//! - [`queue`]: the generic owning FIFO container used as the frontier,
//! - [`wave`]: the grid, the propagation loop, and the observer seam for
//!   rendering or instrumentation.

pub mod error;
pub mod queue;
pub mod wave;

pub use error::Error;
pub use queue::linked::LinkedQueue;
pub use wave::cell::CellStep;
pub use wave::grid::Grid;
pub use wave::observer::{NullObserver, WaveObserver};
pub use wave::propagate::{WavePropagation, WaveStats, propagate};
