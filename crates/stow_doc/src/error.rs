use alloc::string::String;

use thiserror::Error;

use crate::TagId;

// -----------------------------------------------------------------------------
// Error

/// Errors raised by typed document access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocError {
    #[error("tag `{key}` holds a {found}, expected a {expected}")]
    TagMismatch {
        key: String,
        expected: TagId,
        found: TagId,
    },

    #[error("list holds {expected} elements, cannot add a {found}")]
    ListTypeMismatch { expected: TagId, found: TagId },
}
