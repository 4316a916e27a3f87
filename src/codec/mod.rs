//! Item Codec subsystem for keyplane
//!
//! Record normalization for writes and reads, plus write batching.
//!
//! # Design Principles
//!
//! - Empty values never reach the store (absent, null, empty string)
//! - Set-typed attributes travel as native sets, never plain lists
//! - decode(encode(record)) round-trips set values without loss
//! - Batches are bounded and order-preserving

mod batch;
mod errors;
mod item;

pub use batch::{pack_batches, PutUnit, WriteUnit, MAX_BATCH_ITEMS};
pub use errors::{CodecError, CodecResult};
pub use item::{decode_item, encode_item, Item, ItemValue};
