//! Datastore registry
//!
//! An explicit, caller-owned map of datastore name to compiled table
//! schemas. Registration compiles every model up front; lookups after
//! registration are read-only, so a populated registry can be shared
//! freely behind `&self`.

use std::collections::{BTreeMap, HashSet};

use crate::observability::{Logger, Severity};
use crate::schema::{compile, CompiledTable, ModelDefinition};

use super::errors::{RegistryError, RegistryResult};

/// Registry of compiled schemas, keyed by datastore then table name
#[derive(Debug, Default)]
pub struct DatastoreRegistry {
    datastores: BTreeMap<String, BTreeMap<String, CompiledTable>>,
}

impl DatastoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a datastore by compiling all of its models.
    ///
    /// All-or-nothing: the first compile failure aborts registration and
    /// leaves the registry unchanged.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DatastoreAlreadyRegistered`] on a duplicate name
    /// - [`RegistryError::Schema`] when any model fails to compile
    pub fn register_datastore(
        &mut self,
        name: impl Into<String>,
        models: &[ModelDefinition],
    ) -> RegistryResult<()> {
        let name = name.into();
        if self.datastores.contains_key(&name) {
            return Err(RegistryError::DatastoreAlreadyRegistered(name));
        }

        let mut tables = BTreeMap::new();
        for model in models {
            let compiled = compile(model)?;
            Logger::log(
                Severity::Info,
                "table_compiled",
                &[
                    ("datastore", &name),
                    ("table", &compiled.schema.table_name),
                    ("hash", &compiled.schema.hash_attribute),
                ],
            );
            tables.insert(compiled.schema.table_name.clone(), compiled);
        }

        Logger::log(
            Severity::Info,
            "datastore_registered",
            &[("datastore", &name), ("tables", &tables.len().to_string())],
        );
        self.datastores.insert(name, tables);
        Ok(())
    }

    /// Removes a datastore and all of its compiled schemas
    pub fn unregister_datastore(&mut self, name: &str) -> RegistryResult<()> {
        self.datastores
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RegistryError::UnregisteredDatastore(name.to_string()))
    }

    /// Returns the compiled table for (datastore, table)
    pub fn table(&self, datastore: &str, table: &str) -> RegistryResult<&CompiledTable> {
        let tables = self
            .datastores
            .get(datastore)
            .ok_or_else(|| RegistryError::UnregisteredDatastore(datastore.to_string()))?;
        tables
            .get(table)
            .ok_or_else(|| RegistryError::unregistered_table(datastore, table))
    }

    /// Returns just the planner-facing schema for (datastore, table)
    pub fn schema(
        &self,
        datastore: &str,
        table: &str,
    ) -> RegistryResult<&crate::schema::TableSchema> {
        Ok(&self.table(datastore, table)?.schema)
    }

    /// True once the datastore has registered
    pub fn is_registered(&self, datastore: &str) -> bool {
        self.datastores.contains_key(datastore)
    }

    /// Table names registered under a datastore, in name order
    pub fn table_names(&self, datastore: &str) -> RegistryResult<Vec<&str>> {
        let tables = self
            .datastores
            .get(datastore)
            .ok_or_else(|| RegistryError::UnregisteredDatastore(datastore.to_string()))?;
        Ok(tables.keys().map(String::as_str).collect())
    }

    /// Registered tables whose physical counterpart does not exist yet.
    ///
    /// `existing` holds the names of tables already present in the store;
    /// the returned compiled tables carry the CreateTable descriptors the
    /// caller must issue.
    pub fn missing_tables(
        &self,
        datastore: &str,
        existing: &HashSet<String>,
    ) -> RegistryResult<Vec<&CompiledTable>> {
        let tables = self
            .datastores
            .get(datastore)
            .ok_or_else(|| RegistryError::UnregisteredDatastore(datastore.to_string()))?;
        Ok(tables
            .values()
            .filter(|t| !existing.contains(&t.schema.table_name))
            .collect())
    }
}
