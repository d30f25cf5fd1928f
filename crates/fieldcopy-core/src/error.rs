//! Error types for the fieldcopy core library
//!
//! Two families live here. [`Error`] is propagated to the caller and aborts the
//! copy: it covers data-meaning failures such as a bad textual value or a
//! destination list whose element type cannot be recovered. [`AccessError`] is
//! the slot-level mechanical failure; executors never propagate it but collect
//! it into the [`CopyReport`](crate::copy::CopyReport) and move on to the next
//! entry.

use crate::types::ValueKind;
use thiserror::Error;

/// Main error type for fieldcopy operations
#[derive(Error, Debug)]
pub enum Error {
    /// A destination record list carries no element type witness
    #[error("Element type unknown: destination list of `{collection}` has no element type witness")]
    ElementTypeUnknown {
        collection: String,
    },

    /// A destination mapping list carries no value type witness
    #[error("Value type unknown: destination mapping list has no value type witness")]
    ValueTypeUnknown,

    /// Parsing a textual value into a numeric or char slot failed
    #[error("Coercion failed: cannot convert {from} to {to} for value {value:?} at `{slot}`")]
    Coercion {
        from: ValueKind,
        to: ValueKind,
        value: String,
        slot: String,
    },

    /// A destination element could not be constructed
    #[error("Instantiation failed: cannot construct `{type_name}` for element {index}")]
    Instantiation {
        type_name: String,
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// Invalid copy configuration
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// A catalogued slot could not be read or written
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    /// The slot is not part of the subject's catalog
    #[error("unknown slot `{slot}` on {owner}")]
    UnknownSlot { owner: String, slot: String },

    /// The slot rejects writes
    #[error("slot `{slot}` on {owner} is read-only")]
    ReadOnly { owner: String, slot: String },

    /// The value handed to the slot does not have its declared type
    #[error("slot `{slot}` on {owner} expects {expected}, got {found}")]
    TypeMismatch {
        owner: String,
        slot: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

impl AccessError {
    /// Name of the slot the failure refers to
    pub fn slot(&self) -> &str {
        match self {
            AccessError::UnknownSlot { slot, .. }
            | AccessError::ReadOnly { slot, .. }
            | AccessError::TypeMismatch { slot, .. } => slot,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
