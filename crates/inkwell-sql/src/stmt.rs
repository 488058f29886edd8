//! DDL statements.

use crate::{ColumnName, SchemaName, TableName};

/// A data-definition statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdlStmt {
    CreateSchema(CreateSchemaStmt),
    CreateTable(CreateTableStmt),
    AddColumn(AddColumnStmt),
}

/// A column definition: name plus the dialect text of its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: ColumnName,
    pub sql_type: String,
}

impl ColumnDef {
    pub fn new(name: impl Into<ColumnName>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
        }
    }
}

// ============================================================================
// CREATE SCHEMA
// ============================================================================

/// A CREATE SCHEMA statement.
///
/// With `drop_existing`, renders as the pair
/// `DROP SCHEMA IF EXISTS s; CREATE SCHEMA s;`, executed as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSchemaStmt {
    pub schema: SchemaName,
    pub drop_existing: bool,
}

// ============================================================================
// CREATE TABLE
// ============================================================================

/// A CREATE TABLE statement. Columns render in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableStmt {
    pub schema: SchemaName,
    pub table: TableName,
    pub columns: Vec<ColumnDef>,
    pub or_replace: bool,
}

// ============================================================================
// ALTER TABLE ... ADD COLUMN
// ============================================================================

/// An ALTER TABLE ... ADD COLUMN statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddColumnStmt {
    pub schema: SchemaName,
    pub table: TableName,
    pub column: ColumnDef,
    pub if_not_exists: bool,
}

// ============================================================================
// Builder-style constructors
// ============================================================================

impl CreateSchemaStmt {
    pub fn new(schema: impl Into<SchemaName>) -> Self {
        Self {
            schema: schema.into(),
            drop_existing: false,
        }
    }

    pub fn drop_existing(mut self) -> Self {
        self.drop_existing = true;
        self
    }
}

impl CreateTableStmt {
    pub fn new(schema: impl Into<SchemaName>, table: impl Into<TableName>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            columns: Vec::new(),
            or_replace: false,
        }
    }

    pub fn column(mut self, col: ColumnDef) -> Self {
        self.columns.push(col);
        self
    }

    pub fn columns(mut self, cols: impl IntoIterator<Item = ColumnDef>) -> Self {
        self.columns.extend(cols);
        self
    }

    pub fn or_replace(mut self) -> Self {
        self.or_replace = true;
        self
    }
}

impl AddColumnStmt {
    pub fn new(
        schema: impl Into<SchemaName>,
        table: impl Into<TableName>,
        column: ColumnDef,
    ) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            column,
            if_not_exists: false,
        }
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }
}

impl From<CreateSchemaStmt> for DdlStmt {
    fn from(stmt: CreateSchemaStmt) -> Self {
        DdlStmt::CreateSchema(stmt)
    }
}

impl From<CreateTableStmt> for DdlStmt {
    fn from(stmt: CreateTableStmt) -> Self {
        DdlStmt::CreateTable(stmt)
    }
}

impl From<AddColumnStmt> for DdlStmt {
    fn from(stmt: AddColumnStmt) -> Self {
        DdlStmt::AddColumn(stmt)
    }
}
