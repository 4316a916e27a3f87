//! Observability subsystem for keyplane
//!
//! # Design Principles
//!
//! - Structured logs (JSON)
//! - Deterministic key ordering
//! - One log line = one event
//! - Synchronous, no buffering

mod logger;

pub use logger::{Logger, Severity};
