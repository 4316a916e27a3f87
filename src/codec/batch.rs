//! Batch packetizer
//!
//! Slices an ordered item list into bounded write batches. Order is
//! preserved across batch boundaries and only the final batch may be
//! short, so concatenating the batches reproduces the input exactly.

use serde::Serialize;

use super::item::Item;

/// Store protocol limit on items per batch write request.
///
/// Callers may pass a smaller bound to `pack_batches`; this is the
/// ceiling the protocol accepts.
pub const MAX_BATCH_ITEMS: usize = 25;

/// A single put wrapped for a batch write
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutUnit {
    pub item: Item,
}

/// One write unit of a batch request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WriteUnit {
    pub put_request: PutUnit,
}

impl WriteUnit {
    pub fn put(item: Item) -> Self {
        Self {
            put_request: PutUnit { item },
        }
    }
}

/// Packs items into batches of at most `max_batch` put units.
///
/// Produces ceil(N / max_batch) batches. `max_batch` of zero is a caller
/// bug.
pub fn pack_batches(items: Vec<Item>, max_batch: usize) -> Vec<Vec<WriteUnit>> {
    debug_assert!(max_batch > 0, "batch bound must be positive");
    let max_batch = max_batch.max(1);

    let mut batches = Vec::with_capacity(items.len().div_ceil(max_batch));
    let mut current = Vec::with_capacity(max_batch.min(items.len()));

    for item in items {
        current.push(WriteUnit::put(item));
        if current.len() == max_batch {
            batches.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}
