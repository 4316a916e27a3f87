//! Semantic type to native type mapping
//!
//! Pure lookup from model-layer semantic types to the store's type codes.
//! Unknown types are an error, never a silent default.

use super::errors::{SchemaError, SchemaResult};
use super::types::NativeType;

/// Maps a semantic type name to its native code
fn lookup(semantic: &str) -> Option<NativeType> {
    match semantic {
        "string" => Some(NativeType::S),
        "number" => Some(NativeType::N),
        "json" | "map" => Some(NativeType::M),
        "array" | "list" => Some(NativeType::L),
        "stringSet" => Some(NativeType::SS),
        "numberSet" => Some(NativeType::NS),
        "boolean" => Some(NativeType::Bool),
        "binary" => Some(NativeType::B),
        _ => None,
    }
}

/// Storage column types carry a leading underscore in some model layers
/// (`_string`, `_json`). Strip it before lookup.
fn normalize_column_type(column_type: &str) -> &str {
    column_type.strip_prefix('_').unwrap_or(column_type)
}

/// Resolves the native type of one attribute.
///
/// The declared semantic type decides, with two storage-layer overrides:
/// a `json` declaration yields to the storage column type when that column
/// type itself maps to a native code, and a `string` declaration with a
/// `binary` storage column is stored as binary.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownType`] when the declared type (after
/// overrides) has no native mapping.
pub fn resolve_native_type(
    attribute: &str,
    declared: &str,
    column_type: Option<&str>,
) -> SchemaResult<NativeType> {
    let column = column_type.map(normalize_column_type);

    if declared == "json" {
        if let Some(native) = column.and_then(lookup) {
            return Ok(native);
        }
    }
    if declared == "string" && column == Some("binary") {
        return Ok(NativeType::B);
    }

    lookup(declared).ok_or_else(|| SchemaError::unknown_type(attribute, declared))
}
