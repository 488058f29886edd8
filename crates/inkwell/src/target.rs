//! Write targets: where a relation gets persisted.

use std::fmt;

use crate::{Error, Result};

/// A resolved (database, schema, table) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WriteTarget {
    /// Logical database path, e.g. `local::DuckDuckDatabase`
    pub database: String,
    pub schema: String,
    pub table: String,
}

impl WriteTarget {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Resolve a write path.
    ///
    /// Accepts `[database, table]`, which lands in `default_schema`, and
    /// `[database, schema, table]`. Any other length, or an empty segment,
    /// is an [`Error::InvalidTargetPath`].
    pub fn parse<S: AsRef<str>>(path: &[S], default_schema: &str) -> Result<Self> {
        let segments: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
        let invalid = || Error::InvalidTargetPath {
            path: segments.iter().map(|s| s.to_string()).collect(),
        };

        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid());
        }

        match segments.as_slice() {
            [database, table] => Ok(Self::new(*database, default_schema, *table)),
            [database, schema, table] => Ok(Self::new(*database, *schema, *table)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for WriteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.database, self.schema, self.table)
    }
}
