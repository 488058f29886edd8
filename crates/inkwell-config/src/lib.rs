//! Configuration schema for inkwell.
//!
//! Read from `.config/inkwell.styx`:
//!
//! ```styx
//! targets (local::DuckDuckDatabase analytics::Warehouse)
//! default_schema default
//! ```

use facet::Facet;

/// Database path written to when no targets are configured.
pub const DEFAULT_TARGET: &str = "local::DuckDuckDatabase";

/// Schema used for two-segment write paths when none is configured.
pub const DEFAULT_SCHEMA: &str = "default";

/// inkwell configuration.
#[derive(Debug, Clone, Default, Facet)]
pub struct Config {
    /// Database paths that `write` may target. Writes naming any other
    /// database are rejected.
    #[facet(default)]
    pub targets: Option<Vec<String>>,

    /// Schema used when a write path names only a database and a table.
    #[facet(default)]
    pub default_schema: Option<String>,
}

impl Config {
    /// Returns true if `database` is a recognized storage target.
    pub fn is_target(&self, database: &str) -> bool {
        match &self.targets {
            Some(targets) => targets.iter().any(|t| t == database),
            None => database == DEFAULT_TARGET,
        }
    }

    /// The schema used for two-segment write paths.
    pub fn default_schema(&self) -> &str {
        self.default_schema.as_deref().unwrap_or(DEFAULT_SCHEMA)
    }
}
