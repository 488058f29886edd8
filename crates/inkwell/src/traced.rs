//! Connections that DDL is executed against.
//!
//! The engine never opens or closes connections: callers hand one in per
//! write. Every statement goes through [`TracedConn`], which logs it via
//! tracing.

use std::future::Future;
use std::pin::Pin;

use tracing::Instrument;

/// Error reported by a connection when a statement fails.
pub type ConnectionError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future returned by [`Connection::execute`].
pub type ExecuteFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ConnectionError>> + Send + 'a>>;

/// Trait for database connections that can execute DDL text.
///
/// `sql` may hold more than one statement separated by semicolons (the
/// schema creation pair does), so implementations must use a simple-query
/// path rather than a prepared statement.
///
/// This is implemented for `tokio_postgres::Client`, `deadpool_postgres::Object`
/// and [`MemoryConnection`](crate::MemoryConnection).
pub trait Connection: Send + Sync {
    /// Execute one unit of SQL text.
    fn execute<'a>(&'a self, sql: &'a str) -> ExecuteFuture<'a>;
}

impl Connection for tokio_postgres::Client {
    fn execute<'a>(&'a self, sql: &'a str) -> ExecuteFuture<'a> {
        Box::pin(async move {
            tokio_postgres::Client::batch_execute(self, sql)
                .await
                .map_err(|e| Box::new(e) as ConnectionError)
        })
    }
}

impl Connection for deadpool_postgres::Object {
    fn execute<'a>(&'a self, sql: &'a str) -> ExecuteFuture<'a> {
        // Deref to the underlying Client to avoid recursion
        use std::ops::Deref;
        let client: &tokio_postgres::Client = self.deref();
        Box::pin(async move {
            client
                .batch_execute(sql)
                .await
                .map_err(|e| Box::new(e) as ConnectionError)
        })
    }
}

/// A wrapper around a connection that logs every statement via tracing.
///
/// # Example
///
/// ```ignore
/// use inkwell::{ConnectionExt, MemoryConnection};
///
/// let conn = MemoryConnection::new();
/// conn.traced().execute("CREATE SCHEMA s1;").await?;
/// ```
pub struct TracedConn<'a, C: Connection> {
    conn: &'a C,
}

impl<'a, C: Connection> TracedConn<'a, C> {
    /// Create a new traced connection wrapper.
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Execute a statement inside a `db.execute` span.
    pub async fn execute(&self, sql: &str) -> Result<(), ConnectionError> {
        let span = tracing::debug_span!(
            "db.execute",
            sql = %sql,
            ok = tracing::field::Empty,
        );
        let result = self.conn.execute(sql).instrument(span.clone()).await;
        span.record("ok", result.is_ok());
        result
    }
}

/// Extension trait to get a traced wrapper from a connection.
pub trait ConnectionExt: Connection + Sized {
    /// Wrap this connection in a `TracedConn` for statement logging.
    fn traced(&self) -> TracedConn<'_, Self> {
        TracedConn::new(self)
    }
}

impl<C: Connection> ConnectionExt for C {}
