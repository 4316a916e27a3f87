//! Native request descriptors
//!
//! The wire-shaped outputs handed to the store client collaborator. All
//! types serialize with the store's PascalCase field names. keyplane
//! builds these; issuing them (and handling their failures) is the
//! surrounding adapter's job.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::codec::{Item, ItemValue, WriteUnit};
use crate::planner::Condition;

/// Primary key of one item: attribute name to plain value
pub type Key = BTreeMap<String, Value>;

/// An indexed read against a table or secondary index
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryRequest {
    pub table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    pub key_conditions: BTreeMap<String, Condition>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub query_filter: BTreeMap<String, Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_get: Option<Vec<String>>,
}

/// A full-table read with post-hoc filters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanRequest {
    pub table_name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scan_filter: BTreeMap<String, Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_get: Option<Vec<String>>,
}

/// The read request a plan compiles into
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReadRequest {
    Query(QueryRequest),
    Scan(ScanRequest),
}

impl ReadRequest {
    pub fn table_name(&self) -> &str {
        match self {
            ReadRequest::Query(q) => &q.table_name,
            ReadRequest::Scan(s) => &s.table_name,
        }
    }
}

/// A single-item write
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutRequest {
    pub table_name: String,
    pub item: Item,
}

/// One bounded group of write units, keyed by table name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteRequest {
    pub request_items: BTreeMap<String, Vec<WriteUnit>>,
}

impl BatchWriteRequest {
    pub fn for_table(table_name: impl Into<String>, units: Vec<WriteUnit>) -> Self {
        let mut request_items = BTreeMap::new();
        request_items.insert(table_name.into(), units);
        Self { request_items }
    }
}

/// Update action applied per attribute. Only PUT is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateAction {
    Put,
}

/// One attribute update, always a full-value replacement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeUpdate {
    pub action: UpdateAction,
    pub value: ItemValue,
}

impl AttributeUpdate {
    pub fn put(value: ItemValue) -> Self {
        Self {
            action: UpdateAction::Put,
            value,
        }
    }
}

/// A point update of one item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRequest {
    pub table_name: String,
    pub key: Key,
    pub attribute_updates: BTreeMap<String, AttributeUpdate>,
}

/// A point delete of one item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRequest {
    pub table_name: String,
    pub key: Key,
}
