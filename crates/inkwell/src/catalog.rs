//! The catalog of one database: its descriptive schema model and compiled
//! mirror, always updated together.

use inkwell_db_schema::Database;

use crate::compiled::{CompiledDatabase, CompiledSchema, CompiledTable};
use crate::reconcile::{self, Change, Plan};
use crate::{Error, RelationShape, Result, WriteTarget};

/// One database, as known to the session.
///
/// Owns both the descriptive [`Database`] and its [`CompiledDatabase`]. The
/// only way to change either is [`Catalog::apply`], which changes both.
#[derive(Debug, Clone)]
pub struct Catalog {
    database: Database,
    compiled: CompiledDatabase,
}

impl Catalog {
    /// Wrap an existing database model, compiling its mirror.
    pub fn new(database: Database) -> Self {
        let compiled = CompiledDatabase::compile(&database);
        Self { database, compiled }
    }

    /// A catalog for a database with no schemas yet.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(Database::new(name))
    }

    pub fn name(&self) -> &str {
        &self.database.name
    }

    /// The descriptive model.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// The compiled mirror.
    pub fn compiled(&self) -> &CompiledDatabase {
        &self.compiled
    }

    /// Compute what writing `shape` into `target` would change.
    pub fn plan(&self, target: &WriteTarget, shape: &RelationShape) -> Result<Plan> {
        reconcile::plan(&self.database, target, shape)
    }

    /// Apply a change to the model and the mirror.
    ///
    /// Every lookup happens before anything is written, so a change that
    /// does not fit this catalog leaves both untouched. A new schema whose
    /// name already exists has its tables merged into the existing one.
    /// Updated tables keep their position.
    pub fn apply(&mut self, change: &Change) -> Result<()> {
        match change {
            Change::CreateSchema(schema) => {
                match (
                    self.database.schemas.get_mut(&schema.name),
                    self.compiled.schema_mut(&schema.name),
                ) {
                    (Some(existing), Some(compiled)) => {
                        for table in schema.iter_tables() {
                            compiled.put_table(CompiledTable::compile(&schema.name, table));
                            existing.put_table(table.clone());
                        }
                    }
                    (None, None) => {
                        self.compiled.put_schema(CompiledSchema::compile(schema));
                        self.database.put_schema(schema.clone());
                    }
                    _ => return Err(self.schema_not_found(&schema.name)),
                }
            }
            Change::CreateTable { schema, table } => {
                let (Some(existing), Some(compiled)) = (
                    self.database.schemas.get_mut(schema),
                    self.compiled.schema_mut(schema),
                ) else {
                    return Err(self.schema_not_found(schema));
                };
                compiled.put_table(CompiledTable::compile(schema, table));
                existing.put_table(table.clone());
            }
            Change::AddColumns {
                schema,
                table,
                columns,
            } => {
                let (Some(existing), Some(compiled)) = (
                    self.database.schemas.get_mut(schema),
                    self.compiled.schema_mut(schema),
                ) else {
                    return Err(self.schema_not_found(schema));
                };
                let (Some(current), Some(_)) = (existing.get_table(table), compiled.table(table))
                else {
                    return Err(Error::TableNotFound {
                        database: self.database.name.clone(),
                        schema: schema.clone(),
                        table: table.clone(),
                    });
                };

                let mut updated = current.clone();
                for col in columns {
                    updated.add_column(col.clone());
                }
                compiled.put_table(CompiledTable::compile(schema, &updated));
                existing.put_table(updated);
            }
        }
        Ok(())
    }

    /// Returns true if the compiled mirror matches a fresh compilation of the
    /// descriptive model.
    pub fn is_consistent(&self) -> bool {
        self.compiled == CompiledDatabase::compile(&self.database)
    }

    fn schema_not_found(&self, schema: &str) -> Error {
        Error::SchemaNotFound {
            database: self.database.name.clone(),
            schema: schema.to_string(),
        }
    }
}
