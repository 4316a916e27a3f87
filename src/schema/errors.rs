//! Schema error types
//!
//! Error codes:
//! - KEYPLANE_MISSING_HASH_KEY (fatal, aborts registration for the table)
//! - KEYPLANE_UNKNOWN_TYPE (fatal, aborts registration for the table)

use thiserror::Error;

/// Result type for schema compilation
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while compiling a model definition into a table schema
///
/// Both variants are fatal for the table being compiled: registration must
/// abort and nothing is retried. Compilation mutates no external state, so
/// a failed compile leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Every table needs exactly one hash-tagged attribute
    #[error("table '{table}' must declare a hash key attribute")]
    MissingHashKey { table: String },

    /// Declared semantic type has no native mapping
    #[error("attribute '{attribute}' declares unknown type '{declared}'")]
    UnknownType { attribute: String, declared: String },
}

impl SchemaError {
    pub fn missing_hash_key(table: impl Into<String>) -> Self {
        Self::MissingHashKey {
            table: table.into(),
        }
    }

    pub fn unknown_type(attribute: impl Into<String>, declared: impl Into<String>) -> Self {
        Self::UnknownType {
            attribute: attribute.into(),
            declared: declared.into(),
        }
    }

    /// Returns the stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::MissingHashKey { .. } => "KEYPLANE_MISSING_HASH_KEY",
            SchemaError::UnknownType { .. } => "KEYPLANE_UNKNOWN_TYPE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SchemaError::missing_hash_key("devices").code(),
            "KEYPLANE_MISSING_HASH_KEY"
        );
        assert_eq!(
            SchemaError::unknown_type("payload", "blob").code(),
            "KEYPLANE_UNKNOWN_TYPE"
        );
    }

    #[test]
    fn test_error_display() {
        let err = SchemaError::unknown_type("payload", "blob");
        let display = format!("{}", err);
        assert!(display.contains("payload"));
        assert!(display.contains("blob"));
    }
}
