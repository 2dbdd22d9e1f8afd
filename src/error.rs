use thiserror::Error;

/// Errors surfaced by the propagation setup.
///
/// The propagation loop itself has no failure modes: emptiness of the
/// frontier is the `None` arm of [`crate::LinkedQueue::dequeue`], and
/// neighbor coordinates outside the grid are silently rejected by the
/// eligibility check. Only caller-supplied seeds can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("seed ({row}, {col}) is outside the {rows}x{cols} grid")]
    SeedOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
