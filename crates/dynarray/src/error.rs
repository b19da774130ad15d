use thiserror::Error;

/// An error where an index or range does not satisfy the preconditions of an operation.
///
/// The container is left unchanged whenever one of these is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// The index does not name a slot of the container.
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    /// The inclusive range is reversed or extends past the end of the container.
    #[error("range {first}..={last} is invalid for length {len}")]
    InvalidRange { first: usize, last: usize, len: usize },
    /// The same slot was requested twice for exclusive access.
    #[error("index {index} was selected more than once")]
    AliasedIndex { index: usize },
    /// The value at this index cannot be represented by the target type.
    #[error("value at index {index} cannot be represented by the target type")]
    CastFailed { index: usize },
}
