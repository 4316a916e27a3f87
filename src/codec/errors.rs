//! Codec error types
//!
//! Error codes:
//! - KEYPLANE_MALFORMED_RECORD (write aborted)
//! - KEYPLANE_SET_TYPE_MISMATCH (write aborted)

use thiserror::Error;

use crate::schema::NativeType;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while normalizing records to native items
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Records must be JSON objects
    #[error("record for table '{table}' is not an object")]
    MalformedRecord { table: String },

    /// A set-typed attribute's value is not a homogeneous array
    #[error("attribute '{attribute}' is {expected:?}-typed but its value is not a matching array")]
    SetTypeMismatch {
        attribute: String,
        expected: NativeType,
    },
}

impl CodecError {
    pub fn malformed_record(table: impl Into<String>) -> Self {
        Self::MalformedRecord {
            table: table.into(),
        }
    }

    pub fn set_type_mismatch(attribute: impl Into<String>, expected: NativeType) -> Self {
        Self::SetTypeMismatch {
            attribute: attribute.into(),
            expected,
        }
    }

    /// Returns the stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::MalformedRecord { .. } => "KEYPLANE_MALFORMED_RECORD",
            CodecError::SetTypeMismatch { .. } => "KEYPLANE_SET_TYPE_MISMATCH",
        }
    }
}
