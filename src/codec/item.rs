//! Item codec
//!
//! Normalizes application records to and from the store's native item
//! representation. Writes elide absent and empty-string values and wrap
//! set-typed attributes as native sets; reads unwrap those sets back to
//! plain sequences. The two directions round-trip.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::schema::{NativeType, TableSchema};

use super::errors::{CodecError, CodecResult};

/// One attribute value in native item form
#[derive(Debug, Clone, PartialEq)]
pub enum ItemValue {
    /// Scalar, list, or map value carried as-is
    Plain(Value),
    /// Native string set
    StringSet(Vec<String>),
    /// Native number set
    NumberSet(Vec<Number>),
}

impl ItemValue {
    /// Returns the plain JSON representation (sets become arrays)
    pub fn to_plain(&self) -> Value {
        match self {
            ItemValue::Plain(value) => value.clone(),
            ItemValue::StringSet(items) => {
                Value::Array(items.iter().map(|s| Value::String(s.clone())).collect())
            }
            ItemValue::NumberSet(items) => {
                Value::Array(items.iter().map(|n| Value::Number(n.clone())).collect())
            }
        }
    }
}

// Wire shape: sets wrap as {"SS": [...]} / {"NS": [...]}, everything else
// serializes as the plain value.
impl Serialize for ItemValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ItemValue::Plain(value) => value.serialize(serializer),
            ItemValue::StringSet(items) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("SS", items)?;
                map.end()
            }
            ItemValue::NumberSet(items) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("NS", items)?;
                map.end()
            }
        }
    }
}

/// A native item: attribute name to value, deterministically ordered
pub type Item = BTreeMap<String, ItemValue>;

/// Encodes a record into a native item.
///
/// Attributes whose value is null or the empty string are omitted.
/// Attributes the schema types as SS or NS are wrapped as native sets.
/// Attributes unknown to the schema pass through as plain values.
///
/// # Errors
///
/// - [`CodecError::MalformedRecord`] when the record is not an object
/// - [`CodecError::SetTypeMismatch`] when a set-typed attribute's value is
///   not an array of the matching scalar kind
pub fn encode_item(schema: &TableSchema, record: &Value) -> CodecResult<Item> {
    let fields = record
        .as_object()
        .ok_or_else(|| CodecError::malformed_record(&schema.table_name))?;

    let mut item = Item::new();
    for (name, value) in fields {
        if value.is_null() {
            continue;
        }
        if matches!(value, Value::String(s) if s.is_empty()) {
            continue;
        }

        let encoded = match schema.native_type_of(name) {
            Some(NativeType::SS) => ItemValue::StringSet(string_set(name, value)?),
            Some(NativeType::NS) => ItemValue::NumberSet(number_set(name, value)?),
            _ => ItemValue::Plain(value.clone()),
        };
        item.insert(name.clone(), encoded);
    }
    Ok(item)
}

/// Decodes a native item back into a plain record.
///
/// Set values unwrap to ordered sequences; everything else is untouched.
pub fn decode_item(item: &Item) -> Value {
    let mut record = serde_json::Map::new();
    for (name, value) in item {
        record.insert(name.clone(), value.to_plain());
    }
    Value::Object(record)
}

fn string_set(attribute: &str, value: &Value) -> CodecResult<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| CodecError::set_type_mismatch(attribute, NativeType::SS))?;
    items
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| CodecError::set_type_mismatch(attribute, NativeType::SS))
        })
        .collect()
}

fn number_set(attribute: &str, value: &Value) -> CodecResult<Vec<Number>> {
    let items = value
        .as_array()
        .ok_or_else(|| CodecError::set_type_mismatch(attribute, NativeType::NS))?;
    items
        .iter()
        .map(|v| match v {
            Value::Number(n) => Ok(n.clone()),
            _ => Err(CodecError::set_type_mismatch(attribute, NativeType::NS)),
        })
        .collect()
}
