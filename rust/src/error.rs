//! Error handling and result types for container operations.
//!
//! Every fallible operation in this crate reports one of two error kinds:
//! an out-of-range access (bad position, bad bucket count, a cursor pushed past
//! its bound) or an invalid iterator (end, foreign or stale cursor handed to an
//! operation that needs a live element). Errors are raised before any mutation.

use crate::types::NodeId;

/// Error type for container operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Position, bucket count, or cursor movement outside its valid range.
    OutOfRange(String),
    /// Cursor denotes the end sentinel, belongs to another container, or is stale.
    InvalidIterator(String),
}

impl ContainerError {
    /// Create an OutOfRange error for a positional access.
    pub fn position_out_of_range(pos: usize, len: usize) -> Self {
        if len == 0 {
            Self::OutOfRange(format!("position {} on an empty container", pos))
        } else {
            Self::OutOfRange(format!(
                "position {} is outside [0, {}]",
                pos,
                len - 1
            ))
        }
    }

    /// Create an OutOfRange error for an invalid initial bucket count.
    pub fn invalid_bucket_count(count: usize, min: usize, max: usize) -> Self {
        Self::OutOfRange(format!(
            "bucket count {} must be a power of two in [{}, {}]",
            count, min, max
        ))
    }

    /// Create an OutOfRange error for a cursor moved past its bound.
    pub fn cursor_exhausted(operation: &str) -> Self {
        Self::OutOfRange(format!("cannot {}: cursor is at its bound", operation))
    }

    /// Create an OutOfRange error for dereferencing the end position.
    pub fn end_dereference() -> Self {
        Self::OutOfRange("cannot dereference the end position".to_string())
    }

    /// Create an InvalidIterator error for an end cursor passed where an element is required.
    pub fn end_cursor(operation: &str) -> Self {
        Self::InvalidIterator(format!("cannot {} at the end position", operation))
    }

    /// Create an InvalidIterator error for a cursor produced by another container.
    pub fn foreign_cursor(owner: u64, expected: u64) -> Self {
        Self::InvalidIterator(format!(
            "cursor belongs to container {}, not {}",
            owner, expected
        ))
    }

    /// Create an InvalidIterator error for a cursor outlived by a structural change.
    pub fn stale_cursor(node: NodeId, stamp: u64, current: u64) -> Self {
        Self::InvalidIterator(format!(
            "cursor at node {} was taken at stamp {}, container is at stamp {}",
            node, stamp, current
        ))
    }

    /// Check if this error is an out-of-range error
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange(_))
    }

    /// Check if this error is an invalid-iterator error
    pub fn is_invalid_iterator(&self) -> bool {
        matches!(self, Self::InvalidIterator(_))
    }
}

impl std::fmt::Display for ContainerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerError::OutOfRange(msg) => write!(f, "Out of range: {}", msg),
            ContainerError::InvalidIterator(msg) => write!(f, "Invalid iterator: {}", msg),
        }
    }
}

impl std::error::Error for ContainerError {}

/// Public result type for container operations that may fail
pub type ContainerResult<T> = Result<T, ContainerError>;

/// Result type for positional access
pub type PositionResult<T> = Result<T, ContainerError>;

/// Result type for cursor navigation and dereference
pub type CursorResult<T> = Result<T, ContainerError>;

/// Result type for container construction
pub type InitResult<T> = Result<T, ContainerError>;

/// Result extension trait for attaching the failing operation to an error.
pub trait ContainerResultExt<T> {
    /// Prefix the error message with the given context.
    fn with_context(self, context: &str) -> ContainerResult<T>;
}

impl<T> ContainerResultExt<T> for Result<T, ContainerError> {
    fn with_context(self, context: &str) -> ContainerResult<T> {
        self.map_err(|e| match e {
            ContainerError::OutOfRange(msg) => {
                ContainerError::OutOfRange(format!("{}: {}", context, msg))
            }
            ContainerError::InvalidIterator(msg) => {
                ContainerError::InvalidIterator(format!("{}: {}", context, msg))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_message_mentions_bounds() {
        let err = ContainerError::position_out_of_range(7, 3);
        assert!(err.is_out_of_range());
        assert_eq!(err.to_string(), "Out of range: position 7 is outside [0, 2]");

        let empty = ContainerError::position_out_of_range(0, 0);
        assert!(empty.to_string().contains("empty container"));
    }

    #[test]
    fn test_iterator_errors_are_classified() {
        assert!(ContainerError::end_cursor("erase").is_invalid_iterator());
        assert!(ContainerError::foreign_cursor(1, 2).is_invalid_iterator());
        assert!(ContainerError::stale_cursor(4, 1, 2).is_invalid_iterator());
        assert!(ContainerError::end_dereference().is_out_of_range());
    }

    #[test]
    fn test_with_context_keeps_kind() {
        let res: ContainerResult<()> = Err(ContainerError::cursor_exhausted("advance"));
        let err = res.with_context("OrderedMap::move_next").unwrap_err();
        assert!(err.is_out_of_range());
        assert!(err.to_string().starts_with("Out of range: OrderedMap::move_next"));
    }
}
