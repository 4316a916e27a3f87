//! Schema compiler
//!
//! Turns one model definition into an immutable [`TableSchema`] plus the
//! CreateTable-shaped descriptor for the physical table. Compilation is a
//! pure transformation: on error nothing is registered and nothing retries.
//!
//! Index naming is fixed here and consumed verbatim by the planner:
//! - local:  `{hash_attribute}_{column_name}_local_index`
//! - global: `{column_name}_global_index`, or
//!           `{column_name}_{range_key}_global_index` for composite keys

use std::collections::HashSet;

use super::create::{
    AttributeDefinition, CreateTableRequest, GlobalSecondaryIndex, KeySchemaElement,
    LocalSecondaryIndex, Projection, ProvisionedThroughput,
};
use super::errors::{SchemaError, SchemaResult};
use super::mapper::resolve_native_type;
use super::types::{
    AttributeDescriptor, GlobalIndex, KeyRole, LocalIndex, ModelDefinition, TableSchema,
};

/// A compiled table: the planner-facing schema and the store-facing
/// CreateTable descriptor, built together so they can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTable {
    pub schema: TableSchema,
    pub create_table: CreateTableRequest,
}

/// Compiles a model definition into a [`CompiledTable`].
///
/// # Errors
///
/// - [`SchemaError::UnknownType`] when an attribute's semantic type has no
///   native mapping
/// - [`SchemaError::MissingHashKey`] when no attribute carries the hash tag
pub fn compile(model: &ModelDefinition) -> SchemaResult<CompiledTable> {
    let mut attributes = Vec::with_capacity(model.attributes.len());
    let mut hash_attribute: Option<String> = None;
    let mut range_attribute: Option<String> = None;

    for (name, spec) in &model.attributes {
        let native_type =
            resolve_native_type(name, &spec.semantic_type, spec.column_type.as_deref())?;
        let key_role = KeyRole::parse(spec.role_tag.as_deref());

        match &key_role {
            KeyRole::Hash => hash_attribute = Some(name.clone()),
            KeyRole::Range => range_attribute = Some(name.clone()),
            _ => {}
        }

        attributes.push(AttributeDescriptor {
            column_name: name.clone(),
            native_type,
            key_role,
        });
    }

    let hash_attribute =
        hash_attribute.ok_or_else(|| SchemaError::missing_hash_key(&model.table_name))?;

    let mut key_schema = vec![KeySchemaElement::hash(&hash_attribute)];
    if let Some(range) = &range_attribute {
        key_schema.push(KeySchemaElement::range(range));
    }

    let mut local_indexes = Vec::new();
    let mut local_secondary_indexes = Vec::new();
    let mut global_indexes = Vec::new();
    let mut global_secondary_indexes = Vec::new();

    for attr in &attributes {
        match &attr.key_role {
            KeyRole::LocalSecondary => {
                let index_name =
                    format!("{}_{}_local_index", hash_attribute, attr.column_name);
                local_secondary_indexes.push(LocalSecondaryIndex {
                    index_name: index_name.clone(),
                    key_schema: vec![
                        KeySchemaElement::hash(&hash_attribute),
                        KeySchemaElement::range(&attr.column_name),
                    ],
                    projection: Projection::all(),
                });
                local_indexes.push(LocalIndex {
                    attribute: attr.column_name.clone(),
                    index_name,
                });
            }
            KeyRole::GlobalSecondary { range_key } => {
                let (index_name, key_schema) = match range_key {
                    Some(range) => (
                        format!("{}_{}_global_index", attr.column_name, range),
                        vec![
                            KeySchemaElement::hash(&attr.column_name),
                            KeySchemaElement::range(range),
                        ],
                    ),
                    None => (
                        format!("{}_global_index", attr.column_name),
                        vec![KeySchemaElement::hash(&attr.column_name)],
                    ),
                };
                global_secondary_indexes.push(GlobalSecondaryIndex {
                    index_name: index_name.clone(),
                    key_schema,
                    projection: Projection::all(),
                    provisioned_throughput: ProvisionedThroughput::default(),
                });
                global_indexes.push(GlobalIndex {
                    hash_attribute: attr.column_name.clone(),
                    range_attribute: range_key.clone(),
                    index_name,
                });
            }
            _ => {}
        }
    }

    let attribute_definitions =
        collect_attribute_definitions(&attributes, &global_indexes);

    let schema = TableSchema {
        table_name: model.table_name.clone(),
        hash_attribute,
        range_attribute,
        attributes,
        local_indexes,
        global_indexes,
    };

    let create_table = CreateTableRequest {
        table_name: model.table_name.clone(),
        attribute_definitions,
        key_schema,
        local_secondary_indexes,
        global_secondary_indexes,
        provisioned_throughput: ProvisionedThroughput::default(),
    };

    Ok(CompiledTable {
        schema,
        create_table,
    })
}

/// Collects the attribute-definitions list: every attribute referenced by
/// the primary key schema or any index key schema, each exactly once.
///
/// Dedup by attribute name is unconditional. Composite global-index range
/// attributes get an entry even when they carry no key tag of their own.
fn collect_attribute_definitions(
    attributes: &[AttributeDescriptor],
    global_indexes: &[GlobalIndex],
) -> Vec<AttributeDefinition> {
    let mut referenced: Vec<&AttributeDescriptor> = attributes
        .iter()
        .filter(|a| !matches!(a.key_role, KeyRole::None))
        .collect();

    // Composite range attributes referenced by a global index but not
    // key-tagged themselves still need a definition entry.
    for index in global_indexes {
        if let Some(range) = &index.range_attribute {
            if let Some(attr) = attributes.iter().find(|a| &a.column_name == range) {
                referenced.push(attr);
            }
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    referenced
        .into_iter()
        .filter(|a| seen.insert(a.column_name.as_str()))
        .map(|a| AttributeDefinition {
            attribute_name: a.column_name.clone(),
            attribute_type: a.native_type,
        })
        .collect()
}
