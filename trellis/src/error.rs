//! Layout configuration error types.

use thiserror::Error;

/// Errors raised by invalid layout configuration.
///
/// These are authoring mistakes, not runtime conditions: parsing surfaces
/// return them as `Result`, while layout entry points that encounter one
/// fail fast (panic with the display text) rather than silently clamp.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("unknown sizing policy: {0:?}")]
    UnknownSizingPolicy(String),

    #[error("unknown track policy: {0:?}")]
    UnknownTrackPolicy(String),

    #[error("aspect ratio requires at least one non-fixed axis")]
    FixedAspect,

    #[error("grid item at ({row}, {col}) is outside the declared {nrows}x{ncols} bounds")]
    ItemOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    #[error("fixed track at index {0} has no size")]
    FixedTrackWithoutSize(usize),

    #[error("track key {0:?} is not an index or \"*\"")]
    InvalidTrackKey(String),
}
