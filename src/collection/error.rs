//! Error types for collection operations.
//!
//! Almost every collection operation is total over well-typed input. The
//! errors below only arise where the shape of the data is decided at runtime
//! (dynamic [`Value`](super::Value)s, named method dispatch) or where a caller
//! explicitly asks for an error instead of the empty-collection sentinel.

use thiserror::Error;

/// Represents errors that can occur in collection operations.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::CollectionError;
///
/// let error = CollectionError::invalid_argument("expected a sequence or a mapping, found number");
/// assert_eq!(
///     format!("{error}"),
///     "invalid argument: expected a sequence or a mapping, found number"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The argument has an unsupported shape (not a sequence or a mapping,
    /// or a method name the element does not understand).
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human readable description of what was wrong.
        reason: String,
    },
    /// A reduction without an initial value was asked for a result on an
    /// empty collection.
    #[error("cannot reduce an empty collection without an initial value")]
    EmptyCollection,
}

impl CollectionError {
    /// Creates an [`CollectionError::InvalidArgument`] with the given reason.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
