//! Database schema model for inkwell.
//!
//! This crate contains the descriptive schema model (database → schema →
//! table → column) shared by the reconciler and the compiled metamodel, plus
//! the mapping from the compiler's logical column types to DuckDB storage
//! types.
//!
//! Every collection is an [`IndexMap`] keyed by name: names are unique and
//! insertion order is preserved, which is also the order columns appear in
//! generated `CREATE TABLE` statements.

use indexmap::IndexMap;
use inkwell_sql::{AddColumnStmt, ColumnDef, CreateSchemaStmt, CreateTableStmt};

mod types;
pub use types::*;

/// A database column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Storage type
    pub data_type: StorageType,
    /// Whether the column allows NULL
    pub nullable: bool,
}

impl Column {
    /// Create a nullable column. Every column inkwell creates is nullable, so
    /// later writes with more columns never violate NOT NULL on existing rows.
    pub fn nullable(name: impl Into<String>, data_type: StorageType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    /// The DDL column definition (`name TYPE`).
    pub fn to_column_def(&self) -> ColumnDef {
        ColumnDef::new(self.name.as_str(), self.data_type.to_sql_text())
    }

    /// The `ALTER TABLE ... ADD COLUMN IF NOT EXISTS` statement adding this
    /// column to `schema.table`.
    pub fn to_add_column_stmt(&self, schema: &str, table: &str) -> AddColumnStmt {
        AddColumnStmt::new(schema, table, self.to_column_def()).if_not_exists()
    }
}

/// A database table definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Columns, indexed by name, in creation order
    pub columns: IndexMap<String, Column>,
}

impl Table {
    /// Create a new table with no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
        }
    }

    /// Create a table from columns. When names repeat, the first one wins.
    pub fn with_columns(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = Column>,
    ) -> Self {
        let mut table = Self::new(name);
        for col in columns {
            table.add_column(col);
        }
        table
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Returns true if a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Append a column. Returns false, leaving the table untouched, if a
    /// column with the same name already exists.
    pub fn add_column(&mut self, column: Column) -> bool {
        if self.columns.contains_key(&column.name) {
            return false;
        }
        self.columns.insert(column.name.clone(), column);
        true
    }

    /// Iterate over all columns in order.
    pub fn iter_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Build the `CREATE OR REPLACE TABLE` statement for this table.
    pub fn to_create_table_stmt(&self, schema: &str) -> CreateTableStmt {
        CreateTableStmt::new(schema, self.name.as_str())
            .columns(self.iter_columns().map(Column::to_column_def))
            .or_replace()
    }

}

/// A database schema (namespace of tables).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Schema name
    pub name: String,
    /// Tables in the schema, indexed by name
    pub tables: IndexMap<String, Table>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: IndexMap::new(),
        }
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Insert a table, replacing any table with the same name in place.
    pub fn put_table(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    /// Iterate over all tables.
    pub fn iter_tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Build the `DROP SCHEMA IF EXISTS ...; CREATE SCHEMA ...;` statement.
    pub fn to_create_schema_stmt(&self) -> CreateSchemaStmt {
        CreateSchemaStmt::new(self.name.as_str()).drop_existing()
    }
}

/// A complete database: one configured storage target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    /// Logical path of the database, e.g. `local::DuckDuckDatabase`
    pub name: String,
    /// Schemas in the database, indexed by name
    pub schemas: IndexMap<String, Schema>,
}

impl Database {
    /// Create a new database with no schemas.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schemas: IndexMap::new(),
        }
    }

    /// Get a schema by name.
    pub fn get_schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Get a table by schema and table name.
    pub fn get_table(&self, schema: &str, table: &str) -> Option<&Table> {
        self.get_schema(schema)?.get_table(table)
    }

    /// Insert a schema, replacing any schema with the same name in place.
    pub fn put_schema(&mut self, schema: Schema) {
        self.schemas.insert(schema.name.clone(), schema);
    }

    /// Iterate over all schemas.
    pub fn iter_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }
}

#[cfg(test)]
mod tests;
