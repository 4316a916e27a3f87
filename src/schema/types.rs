//! Schema type definitions
//!
//! A model definition (attribute name, semantic type, storage column type,
//! role tag) compiles into an immutable [`TableSchema`]: the hash/range
//! attributes, every attribute's native type code, and the deterministic
//! names of all secondary indexes. The planner reads this structure and
//! nothing else.

use serde::{Deserialize, Serialize};

/// Native attribute type codes of the target wide-column store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NativeType {
    /// UTF-8 string
    S,
    /// Arbitrary-precision number
    N,
    /// Nested map
    M,
    /// Heterogeneous list
    L,
    /// Set of strings
    SS,
    /// Set of numbers
    NS,
    /// Boolean
    #[serde(rename = "BOOL")]
    Bool,
    /// Binary blob
    B,
}

impl NativeType {
    /// Returns the wire code for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            NativeType::S => "S",
            NativeType::N => "N",
            NativeType::M => "M",
            NativeType::L => "L",
            NativeType::SS => "SS",
            NativeType::NS => "NS",
            NativeType::Bool => "BOOL",
            NativeType::B => "B",
        }
    }

    /// Returns true for the native set types (SS, NS)
    pub fn is_set(&self) -> bool {
        matches!(self, NativeType::SS | NativeType::NS)
    }
}

/// Key role of an attribute within its table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyRole {
    /// Plain attribute, not part of any key
    None,
    /// Partition key (exactly one per table)
    Hash,
    /// Sort key (at most one per table)
    Range,
    /// Alternate sort key sharing the table's hash key
    LocalSecondary,
    /// Independent index hash key, optionally with its own range attribute
    GlobalSecondary { range_key: Option<String> },
}

impl KeyRole {
    /// Parses a model role tag.
    ///
    /// Recognized tags: `hash`, `range`, `local-secondary`,
    /// `global-secondary` and `global-secondary##<rangeAttr>`. Anything
    /// else (or no tag) leaves the attribute without a key role.
    pub fn parse(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return KeyRole::None;
        };
        match tag {
            "hash" => KeyRole::Hash,
            "range" => KeyRole::Range,
            "local-secondary" => KeyRole::LocalSecondary,
            _ => {
                let mut parts = tag.splitn(2, "##");
                if parts.next() == Some("global-secondary") {
                    KeyRole::GlobalSecondary {
                        range_key: parts.next().map(str::to_string),
                    }
                } else {
                    KeyRole::None
                }
            }
        }
    }
}

/// Model-layer description of one attribute, as supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct AttributeSpec {
    /// Declared semantic type (`string`, `number`, `json`, ...)
    pub semantic_type: String,
    /// Storage-layer column type, which may override the declared type
    pub column_type: Option<String>,
    /// Key role tag (`hash`, `range`, `local-secondary`,
    /// `global-secondary[##rangeAttr]`), absent for plain attributes
    pub role_tag: Option<String>,
}

impl AttributeSpec {
    pub fn new(semantic_type: impl Into<String>) -> Self {
        Self {
            semantic_type: semantic_type.into(),
            column_type: None,
            role_tag: None,
        }
    }

    pub fn with_column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = Some(column_type.into());
        self
    }

    pub fn with_role_tag(mut self, tag: impl Into<String>) -> Self {
        self.role_tag = Some(tag.into());
        self
    }
}

/// A full model definition for one table: ordered attribute specs
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    pub table_name: String,
    /// Attribute name -> spec, in declaration order
    pub attributes: Vec<(String, AttributeSpec)>,
}

impl ModelDefinition {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, spec: AttributeSpec) -> Self {
        self.attributes.push((name.into(), spec));
        self
    }
}

/// One compiled attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub column_name: String,
    pub native_type: NativeType,
    pub key_role: KeyRole,
}

/// A compiled local secondary index (hash = table hash, range = attribute)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalIndex {
    /// The attribute serving as the index's range key
    pub attribute: String,
    pub index_name: String,
}

/// A compiled global secondary index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalIndex {
    /// The attribute serving as the index's hash key
    pub hash_attribute: String,
    /// Composite range attribute, when the model declared one
    pub range_attribute: Option<String>,
    pub index_name: String,
}

/// Compiled, immutable schema for one table
///
/// Built once at registration time and read-only thereafter. Index names
/// are fixed here; the planner looks them up and never re-derives them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table_name: String,
    pub hash_attribute: String,
    pub range_attribute: Option<String>,
    /// All attributes, in model declaration order
    pub attributes: Vec<AttributeDescriptor>,
    pub local_indexes: Vec<LocalIndex>,
    pub global_indexes: Vec<GlobalIndex>,
}

impl TableSchema {
    /// Looks up an attribute by column name
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.column_name == name)
    }

    /// Returns the key role of an attribute, `None` role for unknown names
    pub fn key_role_of(&self, name: &str) -> KeyRole {
        self.attribute(name)
            .map(|a| a.key_role.clone())
            .unwrap_or(KeyRole::None)
    }

    /// Returns the native type of an attribute, if the attribute exists
    pub fn native_type_of(&self, name: &str) -> Option<NativeType> {
        self.attribute(name).map(|a| a.native_type)
    }

    /// Returns the compiled local index whose range key is `attribute`
    pub fn local_index_for(&self, attribute: &str) -> Option<&LocalIndex> {
        self.local_indexes.iter().find(|i| i.attribute == attribute)
    }

    /// Returns the compiled global index whose hash key is `attribute`
    pub fn global_index_for(&self, attribute: &str) -> Option<&GlobalIndex> {
        self.global_indexes
            .iter()
            .find(|i| i.hash_attribute == attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tag_parsing() {
        assert_eq!(KeyRole::parse(Some("hash")), KeyRole::Hash);
        assert_eq!(KeyRole::parse(Some("range")), KeyRole::Range);
        assert_eq!(
            KeyRole::parse(Some("local-secondary")),
            KeyRole::LocalSecondary
        );
        assert_eq!(
            KeyRole::parse(Some("global-secondary")),
            KeyRole::GlobalSecondary { range_key: None }
        );
        assert_eq!(
            KeyRole::parse(Some("global-secondary##siteId")),
            KeyRole::GlobalSecondary {
                range_key: Some("siteId".into())
            }
        );
        assert_eq!(KeyRole::parse(None), KeyRole::None);
        assert_eq!(KeyRole::parse(Some("unique")), KeyRole::None);
    }

    #[test]
    fn test_native_type_codes() {
        assert_eq!(NativeType::S.as_str(), "S");
        assert_eq!(NativeType::Bool.as_str(), "BOOL");
        assert!(NativeType::SS.is_set());
        assert!(NativeType::NS.is_set());
        assert!(!NativeType::L.is_set());
    }

    #[test]
    fn test_bool_serializes_to_wire_code() {
        let json = serde_json::to_string(&NativeType::Bool).unwrap();
        assert_eq!(json, "\"BOOL\"");
    }
}
