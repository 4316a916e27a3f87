//! Ops subsystem for keyplane
//!
//! Pure construction of the native request descriptors a store client
//! executes: reads compiled from access plans, writes from encoded items,
//! point updates and deletes from extracted primary keys.
//!
//! # Design Principles
//!
//! - Builders never talk to a store; they only shape requests
//! - Read requests follow the planner's strategy exactly
//! - Unsupported native operations fail explicitly, never silently

mod builders;
mod errors;
mod requests;

pub use builders::{
    build_batch_put, build_delete, build_join, build_put, build_read, build_update,
};
pub use errors::{OpsError, OpsResult};
pub use requests::{
    AttributeUpdate, BatchWriteRequest, DeleteRequest, Key, PutRequest, QueryRequest, ReadRequest,
    ScanRequest, UpdateAction, UpdateRequest,
};
