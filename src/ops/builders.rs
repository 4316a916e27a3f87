//! Request builders
//!
//! Pure constructors mapping a compiled schema plus caller inputs onto the
//! native request descriptors. Reads go through the access planner; writes
//! go through the item codec and batch packetizer.

use crate::codec::{encode_item, pack_batches};
use crate::observability::{Logger, Severity};
use crate::planner::{
    build_filter_conditions, build_key_conditions, AccessPlanner, PredicateMap,
};
use crate::schema::TableSchema;
use serde_json::Value;

use super::errors::{OpsError, OpsResult};
use super::requests::{
    AttributeUpdate, BatchWriteRequest, DeleteRequest, Key, PutRequest, QueryRequest, ReadRequest,
    ScanRequest, UpdateRequest,
};

/// Builds the read request for a predicate map.
///
/// The planner picks the strategy; indexed strategies become queries with
/// key conditions, everything else becomes a scan. `select` passes through
/// untouched.
pub fn build_read(
    schema: &TableSchema,
    predicates: &PredicateMap,
    select: Option<Vec<String>>,
) -> ReadRequest {
    let plan = AccessPlanner::new(schema).plan(predicates);

    Logger::log(
        Severity::Trace,
        "plan_selected",
        &[
            ("table", &schema.table_name),
            ("strategy", plan.strategy.as_str()),
            ("index", plan.index_name.as_deref().unwrap_or("-")),
        ],
    );

    if plan.strategy.is_indexed() {
        ReadRequest::Query(QueryRequest {
            table_name: schema.table_name.clone(),
            index_name: plan.index_name.clone(),
            key_conditions: build_key_conditions(&plan, predicates),
            query_filter: build_filter_conditions(&plan, predicates),
            attributes_to_get: select,
        })
    } else {
        ReadRequest::Scan(ScanRequest {
            table_name: schema.table_name.clone(),
            scan_filter: build_filter_conditions(&plan, predicates),
            attributes_to_get: select,
        })
    }
}

/// Builds a single-item put
pub fn build_put(schema: &TableSchema, record: &Value) -> OpsResult<PutRequest> {
    let item = encode_item(schema, record)?;
    Ok(PutRequest {
        table_name: schema.table_name.clone(),
        item,
    })
}

/// Builds the bounded batch-write requests for a record list.
///
/// Each batch holds at most `max_batch` put units; record order is
/// preserved across batches.
pub fn build_batch_put(
    schema: &TableSchema,
    records: &[Value],
    max_batch: usize,
) -> OpsResult<Vec<BatchWriteRequest>> {
    let items = records
        .iter()
        .map(|record| encode_item(schema, record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(pack_batches(items, max_batch)
        .into_iter()
        .map(|units| BatchWriteRequest::for_table(&schema.table_name, units))
        .collect())
}

/// Builds a point update: `{TableName, Key, AttributeUpdates}` with every
/// item attribute wrapped as a PUT action.
pub fn build_update(
    schema: &TableSchema,
    key_predicates: &PredicateMap,
    record: &Value,
) -> OpsResult<UpdateRequest> {
    let key = extract_key(schema, key_predicates)?;
    let item = encode_item(schema, record)?;

    let attribute_updates = item
        .into_iter()
        .map(|(name, value)| (name, AttributeUpdate::put(value)))
        .collect();

    Ok(UpdateRequest {
        table_name: schema.table_name.clone(),
        key,
        attribute_updates,
    })
}

/// Builds a point delete: `{TableName, Key}`
pub fn build_delete(
    schema: &TableSchema,
    key_predicates: &PredicateMap,
) -> OpsResult<DeleteRequest> {
    Ok(DeleteRequest {
        table_name: schema.table_name.clone(),
        key: extract_key(schema, key_predicates)?,
    })
}

/// Native joins are not part of the store mapping
pub fn build_join() -> OpsResult<ReadRequest> {
    Err(OpsError::not_implemented("join"))
}

/// Extracts the full primary key from a predicate map.
///
/// Every key attribute of the table (hash, plus range when declared) must
/// appear as a bare equality.
fn extract_key(schema: &TableSchema, predicates: &PredicateMap) -> OpsResult<Key> {
    let mut key = Key::new();

    let mut require = |attribute: &str| -> OpsResult<()> {
        let value = predicates
            .get(attribute)
            .and_then(|p| p.as_equality())
            .ok_or_else(|| OpsError::missing_key(attribute))?;
        key.insert(attribute.to_string(), value.clone());
        Ok(())
    };

    require(&schema.hash_attribute)?;
    if let Some(range) = &schema.range_attribute {
        require(range)?;
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{compile, AttributeSpec, ModelDefinition};
    use serde_json::json;

    fn device_schema() -> TableSchema {
        let model = ModelDefinition::new("datadevices")
            .with_attribute(
                "deviceId",
                AttributeSpec::new("string").with_role_tag("hash"),
            )
            .with_attribute("siteId", AttributeSpec::new("string").with_role_tag("range"))
            .with_attribute("timestamp", AttributeSpec::new("string"))
            .with_attribute("tags", AttributeSpec::new("stringSet"));
        compile(&model).unwrap().schema
    }

    fn predicates(pairs: &[(&str, Value)]) -> PredicateMap {
        PredicateMap::from_conjuncts(
            pairs
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone())),
        )
        .unwrap()
    }

    #[test]
    fn test_indexed_read_builds_query() {
        let schema = device_schema();
        let request = build_read(
            &schema,
            &predicates(&[("deviceId", json!("a")), ("siteId", json!("s1"))]),
            None,
        );

        let ReadRequest::Query(query) = request else {
            panic!("expected a query");
        };
        assert_eq!(query.table_name, "datadevices");
        assert!(query.index_name.is_none());
        assert_eq!(query.key_conditions.len(), 2);
        assert!(query.query_filter.is_empty());
    }

    #[test]
    fn test_unindexed_read_builds_scan() {
        let schema = device_schema();
        let request = build_read(&schema, &predicates(&[("timestamp", json!("5"))]), None);

        let ReadRequest::Scan(scan) = request else {
            panic!("expected a scan");
        };
        assert_eq!(scan.scan_filter.len(), 1);
        assert!(scan.scan_filter.contains_key("timestamp"));
    }

    #[test]
    fn test_select_passes_through() {
        let schema = device_schema();
        let request = build_read(
            &schema,
            &predicates(&[("deviceId", json!("a"))]),
            Some(vec!["timestamp".into()]),
        );

        let ReadRequest::Query(query) = request else {
            panic!("expected a query");
        };
        assert_eq!(query.attributes_to_get, Some(vec!["timestamp".to_string()]));
    }

    #[test]
    fn test_build_put_encodes_item() {
        let schema = device_schema();
        let put = build_put(
            &schema,
            &json!({ "deviceId": "a", "siteId": "s1", "tags": ["x"], "empty": "" }),
        )
        .unwrap();

        assert_eq!(put.table_name, "datadevices");
        assert!(put.item.contains_key("tags"));
        assert!(!put.item.contains_key("empty"));
    }

    #[test]
    fn test_build_batch_put_bounds_batches() {
        let schema = device_schema();
        let records: Vec<Value> = (0..5)
            .map(|n| json!({ "deviceId": format!("d{n}"), "siteId": "s" }))
            .collect();

        let batches = build_batch_put(&schema, &records, 2).unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].request_items["datadevices"].len(), 2);
        assert_eq!(batches[2].request_items["datadevices"].len(), 1);
    }

    #[test]
    fn test_build_update_wraps_put_actions() {
        let schema = device_schema();
        let update = build_update(
            &schema,
            &predicates(&[("deviceId", json!("a")), ("siteId", json!("s1"))]),
            &json!({ "timestamp": "99" }),
        )
        .unwrap();

        assert_eq!(update.key["deviceId"], json!("a"));
        assert_eq!(update.key["siteId"], json!("s1"));
        let wire = serde_json::to_value(&update.attribute_updates).unwrap();
        assert_eq!(wire["timestamp"]["Action"], "PUT");
        assert_eq!(wire["timestamp"]["Value"], "99");
    }

    #[test]
    fn test_update_requires_full_primary_key() {
        let schema = device_schema();
        let err = build_update(
            &schema,
            &predicates(&[("deviceId", json!("a"))]),
            &json!({ "timestamp": "99" }),
        )
        .unwrap_err();

        assert_eq!(err.code(), "KEYPLANE_MISSING_KEY");
        assert!(format!("{}", err).contains("siteId"));
    }

    #[test]
    fn test_key_predicates_must_be_equalities() {
        let schema = device_schema();
        let err = build_delete(
            &schema,
            &predicates(&[("deviceId", json!("a")), ("siteId", json!({ ">": "s" }))]),
        )
        .unwrap_err();

        assert_eq!(err.code(), "KEYPLANE_MISSING_KEY");
    }

    #[test]
    fn test_build_delete() {
        let schema = device_schema();
        let delete = build_delete(
            &schema,
            &predicates(&[("deviceId", json!("a")), ("siteId", json!("s1"))]),
        )
        .unwrap();

        assert_eq!(delete.table_name, "datadevices");
        assert_eq!(delete.key.len(), 2);
    }

    #[test]
    fn test_join_not_implemented() {
        let err = build_join().unwrap_err();
        assert_eq!(err.code(), "KEYPLANE_NOT_IMPLEMENTED");
    }
}
