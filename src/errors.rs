//! # Error Types

use crate::base::Idx;

/// Errors from token index operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum T2IError {
    /// An index has no token in the backward mapping.
    #[error("index {0} is not in the vocabulary")]
    UnknownIndex(Idx),

    /// A seed mapping's indices are not exactly `0..len`.
    #[error("seed index {0} is duplicated or out of range")]
    SparseSeed(Idx),

    /// Sentences cannot be split on an empty delimiter.
    #[error("empty delimiter")]
    EmptyDelimiter,
}

/// Result type for token index operations.
pub type T2IResult<T> = core::result::Result<T, T2IError>;
