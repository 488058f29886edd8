//! Reconciliation - fit a database to the shape of a relation being written.
//!
//! Given a write target and a [`RelationShape`], this module computes the
//! smallest additive [`Change`] that lets the relation be stored, applies it
//! to the [`Catalog`], and executes the matching DDL.
//!
//! Changes only ever add: a new schema (with its table), a new table, or new
//! columns appended to an existing table. Nothing is dropped, renamed or
//! retyped. Columns are matched by name only; when an existing column has a
//! different type than requested, the existing type is kept and the mismatch
//! is reported as a [`TypeConflict`].
//!
//! ## Generated SQL
//!
//! ```sql
//! -- new schema
//! DROP SCHEMA IF EXISTS s1; CREATE SCHEMA s1;
//! CREATE OR REPLACE TABLE s1.t1 (a INTEGER, b VARCHAR(1024));
//!
//! -- new columns on an existing table
//! ALTER TABLE s1.t1 ADD COLUMN IF NOT EXISTS c DOUBLE;
//! ```

use std::fmt;

use inkwell_db_schema::{Column, Database, Schema, StorageType, Table};
use inkwell_sql::{DdlStmt, render};

use crate::traced::{Connection, TracedConn};
use crate::{Catalog, Error, RelationShape, Result, WriteTarget};

/// A single additive schema change.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Create a schema together with its tables.
    CreateSchema(Schema),
    /// Create a table in an existing schema.
    CreateTable { schema: String, table: Table },
    /// Append columns to an existing table, in order.
    AddColumns {
        schema: String,
        table: String,
        columns: Vec<Column>,
    },
}

impl Change {
    /// The DDL statements for this change, in execution order.
    pub fn to_ddl(&self) -> Vec<DdlStmt> {
        match self {
            Change::CreateSchema(schema) => {
                let mut stmts: Vec<DdlStmt> = vec![schema.to_create_schema_stmt().into()];
                stmts.extend(
                    schema
                        .iter_tables()
                        .map(|t| DdlStmt::from(t.to_create_table_stmt(&schema.name))),
                );
                stmts
            }
            Change::CreateTable { schema, table } => {
                vec![table.to_create_table_stmt(schema).into()]
            }
            Change::AddColumns {
                schema,
                table,
                columns,
            } => columns
                .iter()
                .map(|c| DdlStmt::from(c.to_add_column_stmt(schema, table)))
                .collect(),
        }
    }

    /// The rendered SQL for this change, one string per statement.
    pub fn to_sql(&self) -> Vec<String> {
        self.to_ddl().iter().map(render).collect()
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::CreateSchema(schema) => {
                write!(f, "+ schema {}", schema.name)?;
                for table in schema.iter_tables() {
                    write!(f, "\n+ table {}.{}", schema.name, table.name)?;
                }
                Ok(())
            }
            Change::CreateTable { schema, table } => {
                write!(f, "+ table {}.{}", schema, table.name)
            }
            Change::AddColumns {
                schema,
                table,
                columns,
            } => {
                for (i, col) in columns.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "+ {}.{}.{}: {} (nullable)", schema, table, col.name, col.data_type)?;
                }
                Ok(())
            }
        }
    }
}

/// An existing column whose type differs from the one a write asked for.
///
/// The existing type always wins; conflicts are only reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConflict {
    pub column: String,
    pub existing: StorageType,
    pub requested: StorageType,
}

/// What a write would do to a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub target: WriteTarget,
    /// `None` when the catalog already accommodates the relation.
    pub change: Option<Change>,
    pub type_conflicts: Vec<TypeConflict>,
}

impl Plan {
    /// Returns true if nothing needs to change.
    pub fn is_empty(&self) -> bool {
        self.change.is_none()
    }

    /// The DDL this plan would execute.
    pub fn to_sql(&self) -> Vec<String> {
        self.change.as_ref().map(Change::to_sql).unwrap_or_default()
    }
}

/// The outcome of a reconciled write.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationResult {
    pub target: WriteTarget,
    /// The change applied to the catalog, if any.
    pub change: Option<Change>,
    /// Statements executed against the connection, in order.
    pub statements: Vec<String>,
    pub type_conflicts: Vec<TypeConflict>,
}

impl ReconciliationResult {
    /// Returns true if the write needed no structural change.
    pub fn is_noop(&self) -> bool {
        self.change.is_none()
    }
}

/// Compute the change needed to write `shape` into `target`.
///
/// Pure: nothing is modified. Every column is type-mapped up front, so an
/// unsupported type fails the plan before any change exists.
pub fn plan(database: &Database, target: &WriteTarget, shape: &RelationShape) -> Result<Plan> {
    let columns = shape.to_storage_columns()?;
    let done = |change: Option<Change>, type_conflicts: Vec<TypeConflict>| Plan {
        target: target.clone(),
        change,
        type_conflicts,
    };

    let Some(schema) = database.get_schema(&target.schema) else {
        let mut schema = Schema::new(&target.schema);
        schema.put_table(Table::with_columns(&target.table, columns));
        return Ok(done(Some(Change::CreateSchema(schema)), Vec::new()));
    };

    let Some(table) = schema.get_table(&target.table) else {
        let change = Change::CreateTable {
            schema: target.schema.clone(),
            table: Table::with_columns(&target.table, columns),
        };
        return Ok(done(Some(change), Vec::new()));
    };

    let mut type_conflicts = Vec::new();
    let mut to_add = Vec::new();
    for col in columns {
        match table.get_column(&col.name) {
            Some(existing) if existing.data_type != col.data_type => {
                type_conflicts.push(TypeConflict {
                    column: col.name,
                    existing: existing.data_type,
                    requested: col.data_type,
                });
            }
            Some(_) => {}
            None => to_add.push(col),
        }
    }

    let change = (!to_add.is_empty()).then(|| Change::AddColumns {
        schema: target.schema.clone(),
        table: target.table.clone(),
        columns: to_add,
    });
    Ok(done(change, type_conflicts))
}

/// Reconcile `catalog` with a write of `shape` into `target`, executing the
/// resulting DDL on `conn`.
///
/// `target` must name the catalog's database, otherwise
/// [`Error::CatalogMismatch`] is returned. The catalog (descriptive model and
/// compiled mirror together) is updated before any DDL runs. Statements run
/// one at a time; the first failure stops the write with
/// [`Error::DdlExecution`] and the catalog is *not* rolled back, so it may be
/// ahead of the physical database afterwards.
pub async fn reconcile<C: Connection>(
    catalog: &mut Catalog,
    conn: &C,
    target: &WriteTarget,
    shape: &RelationShape,
) -> Result<ReconciliationResult> {
    if target.database != catalog.name() {
        return Err(Error::CatalogMismatch {
            catalog: catalog.name().to_string(),
            target: target.database.clone(),
        });
    }
    let plan = catalog.plan(target, shape)?;

    for conflict in &plan.type_conflicts {
        tracing::warn!(
            table = %target,
            column = %conflict.column,
            existing = %conflict.existing,
            requested = %conflict.requested,
            "column exists with a different type, keeping existing type"
        );
    }

    let Some(change) = plan.change else {
        tracing::debug!(table = %target, "relation already fits, no DDL needed");
        return Ok(ReconciliationResult {
            target: plan.target,
            change: None,
            statements: Vec::new(),
            type_conflicts: plan.type_conflicts,
        });
    };

    catalog.apply(&change)?;
    tracing::info!(table = %target, "{}", change);

    let conn = TracedConn::new(conn);
    let mut statements = Vec::new();
    for statement in change.to_sql() {
        if let Err(source) = conn.execute(&statement).await {
            return Err(Error::DdlExecution { statement, source });
        }
        statements.push(statement);
    }

    Ok(ReconciliationResult {
        target: plan.target,
        change: Some(change),
        statements,
        type_conflicts: plan.type_conflicts,
    })
}
