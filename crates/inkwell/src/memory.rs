//! In-memory DDL sink.

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::traced::{Connection, ConnectionError, ExecuteFuture};

/// A connection that records statements instead of running them.
///
/// Useful for dry runs, and for asserting on the exact DDL a write produces
/// without a live database. It can be told to reject statements containing a
/// given substring to exercise failure paths.
#[derive(Debug, Default)]
pub struct MemoryConnection {
    executed: Mutex<Vec<String>>,
    reject: Option<String>,
}

/// Error returned by a [`MemoryConnection`] configured to reject a statement.
#[derive(Debug, Error)]
#[error("statement rejected: {statement}")]
pub struct RejectedStatement {
    pub statement: String,
}

impl MemoryConnection {
    /// Create a connection that accepts every statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a connection that rejects any statement containing `pattern`.
    pub fn rejecting(pattern: impl Into<String>) -> Self {
        Self {
            executed: Mutex::default(),
            reject: Some(pattern.into()),
        }
    }

    /// Statements accepted so far, in execution order.
    pub fn executed(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Drain the accepted statements.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn run(&self, sql: &str) -> Result<(), ConnectionError> {
        if let Some(pattern) = &self.reject
            && sql.contains(pattern.as_str())
        {
            return Err(Box::new(RejectedStatement {
                statement: sql.to_string(),
            }));
        }
        self.lock().push(sql.to_string());
        Ok(())
    }
}

impl Connection for MemoryConnection {
    fn execute<'a>(&'a self, sql: &'a str) -> ExecuteFuture<'a> {
        let result = self.run(sql);
        Box::pin(async move { result })
    }
}
