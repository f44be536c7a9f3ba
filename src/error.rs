//! Error types surfaced by the engine. The core never logs or swallows an
//! error; every fallible operation propagates one of these to the caller.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong calling into this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// `assert_invariants` found duplicate handles, overlapping tiles, or an
    /// area mismatch between tile coverage and the bounding box.
    #[error("grid invariants violated: {0:?}")]
    InvariantViolation(crate::grid::InvariantErrors),

    /// An internal logic guard tripped; this indicates a bug in the engine,
    /// not a caller mistake.
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// `get_tile_by_handle` was called with a handle that isn't present.
    #[error("no tile with handle {0}")]
    NotFound(u64),

    /// A precondition on the arguments failed (e.g. negative proximity).
    #[error("unsupported: {0}")]
    Unsupported(String),
}
