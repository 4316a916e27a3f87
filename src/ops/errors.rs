//! Ops error types
//!
//! Error codes:
//! - KEYPLANE_NOT_IMPLEMENTED (operation unsupported by the store mapping)
//! - KEYPLANE_MISSING_KEY (point operation lacks a usable primary key)
//! - codec failures pass through with their own codes

use thiserror::Error;

use crate::codec::CodecError;

/// Result type for request building
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors raised while building native request descriptors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpsError {
    /// The store mapping does not support this operation
    #[error("operation '{operation}' is not implemented")]
    NotImplemented { operation: &'static str },

    /// Point updates and deletes need equality predicates on every
    /// primary key attribute
    #[error("missing equality predicate on key attribute '{attribute}'")]
    MissingKey { attribute: String },

    /// Record normalization failed
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl OpsError {
    pub fn not_implemented(operation: &'static str) -> Self {
        Self::NotImplemented { operation }
    }

    pub fn missing_key(attribute: impl Into<String>) -> Self {
        Self::MissingKey {
            attribute: attribute.into(),
        }
    }

    /// Returns the stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            OpsError::NotImplemented { .. } => "KEYPLANE_NOT_IMPLEMENTED",
            OpsError::MissingKey { .. } => "KEYPLANE_MISSING_KEY",
            OpsError::Codec(inner) => inner.code(),
        }
    }
}
