//! Compiled metamodel: the typed view of a database that later expressions
//! are checked against.
//!
//! Each compiled element is derived from its descriptive counterpart in
//! [`inkwell_db_schema`]. Columns carry their ordinal and the logical type a
//! reader of the column sees, and tables answer name lookups in constant
//! time.
//!
//! Compiled elements are never edited field by field. A changed table is
//! recompiled from the updated descriptive table and put back in place of
//! the old one, see [`Catalog`](crate::Catalog).

use std::collections::HashMap;

use indexmap::IndexMap;
use inkwell_db_schema::{Column, Database, LogicalType, Schema, StorageType, Table};

/// A compiled column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledColumn {
    pub name: String,
    /// Zero-based position within the table
    pub ordinal: usize,
    pub data_type: StorageType,
    /// The type an expression reading this column has
    pub logical_type: LogicalType,
    pub nullable: bool,
}

impl CompiledColumn {
    fn compile(ordinal: usize, column: &Column) -> Self {
        Self {
            name: column.name.clone(),
            ordinal,
            data_type: column.data_type,
            logical_type: column.data_type.to_logical_type(),
            nullable: column.nullable,
        }
    }
}

/// A compiled table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTable {
    pub name: String,
    /// Owning schema
    pub schema: String,
    columns: Vec<CompiledColumn>,
    by_name: HashMap<String, usize>,
}

impl CompiledTable {
    pub fn compile(schema: &str, table: &Table) -> Self {
        let columns: Vec<CompiledColumn> = table
            .iter_columns()
            .enumerate()
            .map(|(i, c)| CompiledColumn::compile(i, c))
            .collect();
        let by_name = columns
            .iter()
            .map(|c| (c.name.clone(), c.ordinal))
            .collect();
        Self {
            name: table.name.clone(),
            schema: schema.to_string(),
            columns,
            by_name,
        }
    }

    pub fn column(&self, name: &str) -> Option<&CompiledColumn> {
        self.by_name.get(name).map(|&i| &self.columns[i])
    }

    pub fn columns(&self) -> &[CompiledColumn] {
        &self.columns
    }

    /// The relation type produced by reading the whole table.
    pub fn relation_type(&self) -> Vec<(&str, &LogicalType)> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), &c.logical_type))
            .collect()
    }
}

/// A compiled schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSchema {
    pub name: String,
    tables: IndexMap<String, CompiledTable>,
}

impl CompiledSchema {
    pub fn compile(schema: &Schema) -> Self {
        Self {
            name: schema.name.clone(),
            tables: schema
                .iter_tables()
                .map(|t| (t.name.clone(), CompiledTable::compile(&schema.name, t)))
                .collect(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&CompiledTable> {
        self.tables.get(name)
    }

    pub fn iter_tables(&self) -> impl Iterator<Item = &CompiledTable> {
        self.tables.values()
    }

    /// Put a table, replacing a table with the same name at its position.
    pub(crate) fn put_table(&mut self, table: CompiledTable) {
        self.tables.insert(table.name.clone(), table);
    }
}

/// A compiled database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDatabase {
    pub name: String,
    schemas: IndexMap<String, CompiledSchema>,
}

impl CompiledDatabase {
    pub fn compile(database: &Database) -> Self {
        Self {
            name: database.name.clone(),
            schemas: database
                .iter_schemas()
                .map(|s| (s.name.clone(), CompiledSchema::compile(s)))
                .collect(),
        }
    }

    pub fn schema(&self, name: &str) -> Option<&CompiledSchema> {
        self.schemas.get(name)
    }

    pub fn table(&self, schema: &str, table: &str) -> Option<&CompiledTable> {
        self.schema(schema)?.table(table)
    }

    /// Resolve `schema.table.column`.
    pub fn resolve_column(
        &self,
        schema: &str,
        table: &str,
        column: &str,
    ) -> Option<&CompiledColumn> {
        self.table(schema, table)?.column(column)
    }

    pub fn iter_schemas(&self) -> impl Iterator<Item = &CompiledSchema> {
        self.schemas.values()
    }

    pub(crate) fn schema_mut(&mut self, name: &str) -> Option<&mut CompiledSchema> {
        self.schemas.get_mut(name)
    }

    pub(crate) fn put_schema(&mut self, schema: CompiledSchema) {
        self.schemas.insert(schema.name.clone(), schema);
    }
}
