//! Access pattern planner
//!
//! Classifies a predicate map against a compiled table schema and picks the
//! cheapest valid retrieval strategy, in strict preference order:
//!
//! 1. Hash + range present: primary key query
//! 2. Hash + local-secondary present: local index query
//! 3. Global-secondary present: global index query
//! 4. Hash alone: primary key query on the hash only
//! 5. Otherwise: full scan with every predicate as a filter
//!
//! First match wins. Planning is deterministic and total: the same schema
//! and predicates always produce the same plan, and no input fails.

use crate::schema::{KeyRole, TableSchema};

use super::predicate::PredicateMap;

/// Retrieval strategy chosen for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Query against the table's own key schema
    PrimaryKeyQuery,
    /// Query against a local secondary index
    LocalIndexQuery,
    /// Query against a global secondary index
    GlobalIndexQuery,
    /// Full-table scan, predicates applied as post-hoc filters
    Scan,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::PrimaryKeyQuery => "PRIMARY_KEY",
            Strategy::LocalIndexQuery => "LOCAL_INDEX",
            Strategy::GlobalIndexQuery => "GLOBAL_INDEX",
            Strategy::Scan => "SCAN",
        }
    }

    /// Scans read the whole table; everything else drives an index
    pub fn is_indexed(&self) -> bool {
        !matches!(self, Strategy::Scan)
    }
}

/// The hash/range attribute names the chosen index consumes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexKeys {
    pub hash: Option<String>,
    pub range: Option<String>,
}

impl IndexKeys {
    /// Attribute names in hash-then-range order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hash
            .iter()
            .chain(self.range.iter())
            .map(String::as_str)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.names().any(|n| n == attribute)
    }
}

/// A transient query plan: built, consumed to construct a request, dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub strategy: Strategy,
    pub index_keys: IndexKeys,
    /// Predicate attributes not consumed by the index, in predicate order
    pub filter_keys: Vec<String>,
    /// Set for local and global index strategies
    pub index_name: Option<String>,
}

/// Plans queries against one compiled table schema
pub struct AccessPlanner<'a> {
    schema: &'a TableSchema,
}

impl<'a> AccessPlanner<'a> {
    pub fn new(schema: &'a TableSchema) -> Self {
        Self { schema }
    }

    /// Produces the plan for a predicate map.
    ///
    /// Total and deterministic: every predicate map yields a plan, the
    /// worst case being a full scan.
    pub fn plan(&self, predicates: &PredicateMap) -> QueryPlan {
        let mut hash_match: Option<&str> = None;
        let mut range_match: Option<&str> = None;
        let mut local_match: Option<&str> = None;
        let mut global_match: Option<&str> = None;

        for name in predicates.attribute_names() {
            match self.schema.key_role_of(name) {
                KeyRole::Hash => hash_match = hash_match.or(Some(name)),
                KeyRole::Range => range_match = range_match.or(Some(name)),
                KeyRole::LocalSecondary => local_match = local_match.or(Some(name)),
                KeyRole::GlobalSecondary { .. } => global_match = global_match.or(Some(name)),
                KeyRole::None => {}
            }
        }

        let (strategy, index_keys, index_name) = match (hash_match, range_match) {
            (Some(hash), Some(range)) => (
                Strategy::PrimaryKeyQuery,
                IndexKeys {
                    hash: Some(hash.to_string()),
                    range: Some(range.to_string()),
                },
                None,
            ),
            (Some(hash), None) if local_match.is_some() => {
                let secondary = local_match.expect("guard checked");
                let index = self
                    .schema
                    .local_index_for(secondary)
                    .expect("compiled schema has an index per local-secondary attribute");
                (
                    Strategy::LocalIndexQuery,
                    IndexKeys {
                        hash: Some(hash.to_string()),
                        range: Some(secondary.to_string()),
                    },
                    Some(index.index_name.clone()),
                )
            }
            _ if global_match.is_some() => {
                let hash = global_match.expect("guard checked");
                let index = self
                    .schema
                    .global_index_for(hash)
                    .expect("compiled schema has an index per global-secondary attribute");
                // The index's own range key is satisfied by the index, not
                // by a post-filter, when the query constrains it.
                let range = index
                    .range_attribute
                    .as_ref()
                    .filter(|r| predicates.contains(r))
                    .cloned();
                (
                    Strategy::GlobalIndexQuery,
                    IndexKeys {
                        hash: Some(hash.to_string()),
                        range,
                    },
                    Some(index.index_name.clone()),
                )
            }
            (Some(hash), None) => (
                Strategy::PrimaryKeyQuery,
                IndexKeys {
                    hash: Some(hash.to_string()),
                    range: None,
                },
                None,
            ),
            (None, _) => (Strategy::Scan, IndexKeys::default(), None),
        };

        let filter_keys = predicates
            .attribute_names()
            .filter(|name| !index_keys.contains(name))
            .map(str::to_string)
            .collect();

        QueryPlan {
            strategy,
            index_keys,
            filter_keys,
            index_name,
        }
    }
}
