use inkwell_db_schema::UnsupportedTypeError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::traced::ConnectionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("column `{column}`: {source}")]
    UnsupportedType {
        column: String,
        source: UnsupportedTypeError,
    },

    #[error(
        "invalid write target {path:?}: expected [database, table] or [database, schema, table]"
    )]
    InvalidTargetPath { path: Vec<String> },

    #[error("`{database}` is not a configured write target")]
    UnknownTarget { database: String },

    #[error("cannot write a relation with no columns")]
    EmptyRelation,

    #[error("write to `{target}` handed to the catalog of `{catalog}`")]
    CatalogMismatch { catalog: String, target: String },

    #[error("schema `{schema}` not found in catalog `{database}`")]
    SchemaNotFound { database: String, schema: String },

    #[error("table `{schema}.{table}` not found in catalog `{database}`")]
    TableNotFound {
        database: String,
        schema: String,
        table: String,
    },

    #[error("DDL failed: {statement}")]
    DdlExecution {
        statement: String,
        source: ConnectionError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
