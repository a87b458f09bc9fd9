use alloc::string::String;

use stow_doc::DocError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Errors surfaced by registries, handlers and the storage engine.
///
/// None of these are recovered from internally. A failed decode may leave
/// the target partially written.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum StoreError {
    /// A handler chain that must be non-empty resolved to nothing.
    #[error("no handler found for `{type_path}` (field `{name}`)")]
    NoHandlerFound {
        type_path: &'static str,
        name: String,
    },

    /// A field's explicit handler override does not accept the field's type.
    #[error("handler `{handler}` does not match `{type_path}` (field `{name}`)")]
    HandlerMismatch {
        handler: &'static str,
        type_path: &'static str,
        name: String,
    },

    /// Every handler in a chain declined a non-null value.
    #[error("no handler in the chain for `{type_path}` accepted `{name}`")]
    ChainExhausted {
        type_path: &'static str,
        name: String,
    },

    /// The type has no usable factory.
    #[error("cannot instantiate `{type_path}`: {reason}")]
    InstantiationFailure {
        type_path: &'static str,
        reason: &'static str,
    },

    /// The document is present but not shaped like the handler expects.
    #[error("malformed document at `{name}`: {reason}")]
    MalformedDocument { name: String, reason: String },

    /// A typed document accessor failed.
    #[error(transparent)]
    Document(#[from] DocError),

    /// A decoded value could not be assigned to its destination.
    #[error("decoded a `{found}` where a `{expected}` was expected")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Object storage was requested for a type that is not a reflected struct.
    #[error("`{type_path}` is not a reflected struct")]
    NotAStruct { type_path: &'static str },

    /// A base delegation handler returned a replacement instead of updating in place.
    #[error("delegation handler for base `{type_path}` returned a replacement")]
    DelegateReplaced { type_path: &'static str },
}

impl StoreError {
    #[cold]
    pub(crate) fn malformed(name: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
