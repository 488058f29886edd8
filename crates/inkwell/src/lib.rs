//! Schema reconciliation for notebook writes into DuckDB.
//!
//! A notebook `write(value, path)` persists a computed relation into a table.
//! This crate makes the database fit the relation before the rows land:
//!
//! - missing schemas and tables are created
//! - missing columns are appended, always nullable
//! - nothing is ever dropped, renamed or retyped
//!
//! Every write keeps three views of the database in step: the descriptive
//! model ([`Database`]), the compiled mirror used to type-check later reads
//! ([`CompiledDatabase`]), and the physical database, reached through DDL.
//!
//! # Example
//!
//! ```ignore
//! let mut session = Session::from_config_dir(&cwd)?;
//! let shape = RelationShape::new()
//!     .column("id", LogicalType::Integer)
//!     .column("label", LogicalType::string());
//!
//! let result = session
//!     .write(&client, &["local::DuckDuckDatabase", "s1", "t1"], &shape)
//!     .await?;
//! for sql in &result.statements {
//!     println!("{sql}");
//! }
//! ```
//!
//! # Naming
//!
//! Write paths are `[database, table]` or `[database, schema, table]`. The
//! two-segment form lands in the configured default schema, `default` unless
//! configured otherwise. Because `default` is a keyword in DuckDB, that
//! schema name is always double-quoted in generated SQL.

mod catalog;
mod compiled;
pub mod config;
mod error;
mod memory;
mod reconcile;
mod relation;
mod session;
mod target;
mod traced;

pub use catalog::Catalog;
pub use compiled::{CompiledColumn, CompiledDatabase, CompiledSchema, CompiledTable};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use memory::{MemoryConnection, RejectedStatement};
pub use reconcile::{Change, Plan, ReconciliationResult, TypeConflict, plan, reconcile};
pub use relation::{RelationColumn, RelationShape};
pub use session::Session;
pub use target::WriteTarget;
pub use traced::{Connection, ConnectionError, ConnectionExt, ExecuteFuture, TracedConn};

// Re-export the schema model so callers need a single dependency
pub use inkwell_db_schema::{
    Column, Database, LogicalType, Schema, StorageType, Table, UnsupportedTypeError,
};

/// Result type for inkwell operations.
pub type Result<T> = std::result::Result<T, Error>;
