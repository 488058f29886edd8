//! DDL AST and rendering.
//!
//! Build data-definition statements as a typed AST, then render them to the
//! exact DuckDB text that gets executed. The statement shapes are fixed:
//! schema creation, `CREATE OR REPLACE TABLE`, and additive
//! `ALTER TABLE ... ADD COLUMN IF NOT EXISTS`.
//!
//! # Identifier escaping
//!
//! Only schema names are ever quoted, and only when they collide with a
//! reserved word (see [`RESERVED_SCHEMA_NAMES`]). Table and column names are
//! written verbatim: callers are responsible for supplying SQL-safe
//! identifiers.

use strid::braid;

mod render;
pub use render::*;

mod stmt;
pub use stmt::*;

/// The name of a schema.
#[braid]
pub struct SchemaName;

/// The name of a table.
#[braid]
pub struct TableName;

/// The name of a column.
#[braid]
pub struct ColumnName;

/// Schema names that must be quoted wherever they appear in generated SQL.
pub const RESERVED_SCHEMA_NAMES: &[&str] = &["default"];

/// Returns true if `name` is a reserved schema name.
///
/// The comparison is exact: `Default` or `DEFAULT` are not treated as reserved.
pub fn is_reserved_schema_name(name: &str) -> bool {
    RESERVED_SCHEMA_NAMES.contains(&name)
}

/// A quoted identifier wrapper.
///
/// Display writes the value escaped and quoted with double quotes.
///
/// # Example
/// ```
/// use inkwell_sql::Ident;
/// assert_eq!(format!("{}", Ident("default")), "\"default\"");
/// assert_eq!(format!("{}", Ident("bla\"h")), "\"bla\"\"h\"");
/// ```
pub struct Ident<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> std::fmt::Display for Ident<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"")?;
        for c in self.0.as_ref().chars() {
            if c == '"' {
                write!(f, "\"\"")?;
            } else {
                write!(f, "{}", c)?;
            }
        }
        write!(f, "\"")
    }
}

/// A schema name as it appears in generated SQL.
///
/// Reserved names are quoted, everything else is written verbatim.
///
/// # Example
/// ```
/// use inkwell_sql::SchemaIdent;
/// assert_eq!(format!("{}", SchemaIdent("default")), "\"default\"");
/// assert_eq!(format!("{}", SchemaIdent("sales")), "sales");
/// ```
pub struct SchemaIdent<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> std::fmt::Display for SchemaIdent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.0.as_ref();
        if is_reserved_schema_name(name) {
            write!(f, "{}", Ident(name))
        } else {
            write!(f, "{}", name)
        }
    }
}

/// Escape a schema name if it is reserved.
pub fn escape_schema_name(name: &str) -> String {
    format!("{}", SchemaIdent(name))
}

/// Render a schema-qualified table reference, e.g. `"default".trades`.
pub fn qualified_table_name(schema: &str, table: &str) -> String {
    format!("{}.{}", SchemaIdent(schema), table)
}
