//! Datastore Registry subsystem for keyplane
//!
//! # Design Principles
//!
//! - The registry is an explicit value owned by the caller, never a
//!   hidden process global
//! - Single-writer at registration, read-only ever after
//! - Registration is all-or-nothing per datastore
//! - Lookup failures are consistency violations: surfaced immediately,
//!   never retried

mod errors;
mod registry;

pub use errors::{RegistryError, RegistryResult};
pub use registry::DatastoreRegistry;
