//! Registry error types
//!
//! Error codes:
//! - KEYPLANE_DATASTORE_ALREADY_REGISTERED (consistency violation)
//! - KEYPLANE_UNREGISTERED_DATASTORE (consistency violation)
//! - KEYPLANE_UNREGISTERED_TABLE (consistency violation)
//! - schema compile failures pass through with their own codes
//!
//! Consistency violations indicate a caller lifecycle bug. They surface
//! immediately and are never retried.

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised by datastore registration and lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A datastore name can register only once
    #[error("datastore '{0}' is already registered")]
    DatastoreAlreadyRegistered(String),

    /// Lookup against a datastore that never registered
    #[error("datastore '{0}' is not registered")]
    UnregisteredDatastore(String),

    /// Lookup against a table the datastore's models never declared
    #[error("no table '{table}' registered in datastore '{datastore}'")]
    UnregisteredTable { datastore: String, table: String },

    /// Schema compilation failed during registration
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl RegistryError {
    pub fn unregistered_table(
        datastore: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self::UnregisteredTable {
            datastore: datastore.into(),
            table: table.into(),
        }
    }

    /// Returns the stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::DatastoreAlreadyRegistered(_) => {
                "KEYPLANE_DATASTORE_ALREADY_REGISTERED"
            }
            RegistryError::UnregisteredDatastore(_) => "KEYPLANE_UNREGISTERED_DATASTORE",
            RegistryError::UnregisteredTable { .. } => "KEYPLANE_UNREGISTERED_TABLE",
            RegistryError::Schema(inner) => inner.code(),
        }
    }
}
