//! The write session: configured targets plus one catalog per database.

use std::path::Path;

use indexmap::IndexMap;
use inkwell_db_schema::Database;

use crate::compiled::CompiledDatabase;
use crate::config::{self, Config};
use crate::reconcile::{self, Plan, ReconciliationResult};
use crate::traced::Connection;
use crate::{Catalog, Error, RelationShape, Result, WriteTarget};

/// Entry point for writes.
///
/// Catalogs are created lazily the first time a database is written to and
/// live as long as the session. Writes take `&mut self`, so they are
/// serialized per session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: Config,
    catalogs: IndexMap<String, Catalog>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            catalogs: IndexMap::new(),
        }
    }

    /// Create a session from the nearest `.config/inkwell.styx` above
    /// `start`, or the default configuration when there is none.
    pub fn from_config_dir(start: &Path) -> Result<Self> {
        Ok(Self::new(config::load_or_default(start)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register an existing database model, replacing any catalog with the
    /// same name.
    pub fn register(&mut self, database: Database) -> &Catalog {
        let name = database.name.clone();
        let (index, _) = self.catalogs.insert_full(name, Catalog::new(database));
        &self.catalogs[index]
    }

    pub fn catalog(&self, database: &str) -> Option<&Catalog> {
        self.catalogs.get(database)
    }

    /// The compiled mirror of `database`, for type-checking reads of tables
    /// written earlier.
    pub fn compiled(&self, database: &str) -> Option<&CompiledDatabase> {
        self.catalog(database).map(Catalog::compiled)
    }

    pub fn iter_catalogs(&self) -> impl Iterator<Item = &Catalog> {
        self.catalogs.values()
    }

    /// Parse a write path and check its database is a configured target.
    pub fn resolve_target<S: AsRef<str>>(&self, path: &[S]) -> Result<WriteTarget> {
        let target = WriteTarget::parse(path, self.config.default_schema())?;
        if !self.config.is_target(&target.database) {
            return Err(Error::UnknownTarget {
                database: target.database,
            });
        }
        Ok(target)
    }

    /// Compute what a write would change without touching anything.
    pub fn plan<S: AsRef<str>>(&self, path: &[S], shape: &RelationShape) -> Result<Plan> {
        let target = self.resolve_target(path)?;
        match self.catalogs.get(&target.database) {
            Some(catalog) => catalog.plan(&target, shape),
            None => reconcile::plan(&Database::new(&target.database), &target, shape),
        }
    }

    /// Write a relation of the given shape to `path`, evolving the catalog
    /// and the physical database to fit it.
    pub async fn write<C: Connection, S: AsRef<str>>(
        &mut self,
        conn: &C,
        path: &[S],
        shape: &RelationShape,
    ) -> Result<ReconciliationResult> {
        let target = self.resolve_target(path)?;
        // A write that cannot be planned must not register a catalog.
        shape.to_storage_columns()?;
        let catalog = self
            .catalogs
            .entry(target.database.clone())
            .or_insert_with(|| Catalog::empty(&target.database));
        reconcile::reconcile(catalog, conn, &target, shape).await
    }
}
