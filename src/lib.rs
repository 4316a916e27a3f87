//! keyplane - schema compiler and access-pattern planner for
//! partition/sort-key wide-column stores
//!
//! Compiles model attribute metadata into physical table definitions and
//! plans each query onto the cheapest valid retrieval strategy: primary
//! key, local index, global index, or full scan.

pub mod codec;
pub mod observability;
pub mod ops;
pub mod planner;
pub mod registry;
pub mod schema;
