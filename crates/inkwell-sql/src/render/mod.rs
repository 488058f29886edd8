//! Render DDL AST to string.

use std::fmt;

use crate::stmt::*;
use crate::{ColumnDef, SchemaIdent};

/// Wrapper for rendering a `Render` type via `Display`.
///
/// Allows using `write!(f, "{}", Fmt(&stmt))` in format strings.
pub struct Fmt<'a, T: Render>(pub &'a T);

impl<T: Render> fmt::Display for Fmt<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f)
    }
}

// ============================================================================
// Render implementations
// ============================================================================

/// Trait for types that can be rendered to SQL.
pub trait Render {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl Render for ColumnDef {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.sql_type)
    }
}

impl Render for CreateSchemaStmt {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schema = SchemaIdent(self.schema.as_str());
        if self.drop_existing {
            write!(f, "DROP SCHEMA IF EXISTS {schema}; ")?;
        }
        write!(f, "CREATE SCHEMA {schema};")
    }
}

impl Render for CreateTableStmt {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schema = SchemaIdent(self.schema.as_str());
        let table = &self.table;
        if self.or_replace {
            write!(f, "CREATE OR REPLACE TABLE {schema}.{table} (")?;
        } else {
            write!(f, "CREATE TABLE {schema}.{table} (")?;
        }
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let col = Fmt(col);
            write!(f, "{col}")?;
        }
        write!(f, ");")
    }
}

impl Render for AddColumnStmt {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schema = SchemaIdent(self.schema.as_str());
        let table = &self.table;
        let column = Fmt(&self.column);
        write!(f, "ALTER TABLE {schema}.{table} ADD COLUMN ")?;
        if self.if_not_exists {
            write!(f, "IF NOT EXISTS ")?;
        }
        write!(f, "{column};")
    }
}

impl Render for DdlStmt {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DdlStmt::CreateSchema(s) => s.render(f),
            DdlStmt::CreateTable(s) => s.render(f),
            DdlStmt::AddColumn(s) => s.render(f),
        }
    }
}

impl fmt::Display for DdlStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

// ============================================================================
// Convenience methods
// ============================================================================

/// Render a statement to SQL.
pub fn render(stmt: &impl Render) -> String {
    format!("{}", Fmt(stmt))
}
