//! Schema Compiler subsystem for keyplane
//!
//! Compiles model attribute metadata into a physical table definition:
//! key schema, native type codes, and secondary index declarations.
//!
//! # Design Principles
//!
//! - Compilation runs once per table at registration time
//! - Compiled schemas are immutable
//! - Unknown types are errors, never defaults
//! - Index names are fixed at compile time and consumed verbatim by the
//!   planner

mod compiler;
mod create;
mod errors;
mod mapper;
mod types;

pub use compiler::{compile, CompiledTable};
pub use create::{
    AttributeDefinition, CreateTableRequest, GlobalSecondaryIndex, KeySchemaElement, KeyType,
    LocalSecondaryIndex, Projection, ProvisionedThroughput, DEFAULT_CAPACITY_UNITS,
};
pub use errors::{SchemaError, SchemaResult};
pub use mapper::resolve_native_type;
pub use types::{
    AttributeDescriptor, AttributeSpec, GlobalIndex, KeyRole, LocalIndex, ModelDefinition,
    NativeType, TableSchema,
};
