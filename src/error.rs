use thiserror::Error;

/// Failures reported by the checked cursor surfaces.
///
/// Unchecked traversal never produces these: reading an exhausted cursor or mixing cursors of two
/// different sequences through the plain [`Cursor`](crate::Cursor) API is a precondition violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Invalid position {index} for a sequence of length {len}")]
    OutOfBounds { index: isize, len: usize },

    #[error("Cannot create a subrange, length would be negative")]
    NegativeSpan,

    #[error("Cannot relate cursors that refer to two different sequences")]
    ForeignCursor,

    #[error("Cannot execute seek, would overflow position")]
    SeekOverflow,

    #[error("Reached the end of the sequence")]
    Exhausted,
}
