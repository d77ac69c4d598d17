//! Lazily initialized PostgreSQL connection pool.
//!
//! [`ConnectionManager`] replaces a process-wide pool handle: it is created
//! once by `main`, shared through an `Arc`, and injected into the
//! repository. The pool itself is only built on the first
//! [`ConnectionManager::acquire`], and the schema is ensured on that same
//! first connection.

use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use tokio::sync::{Mutex, RwLock};

use super::schema;
use crate::config::{AgentConfig, DATABASE_URL_VAR};
use crate::error::AgentError;

/// A checked-out connection. Dropping it (or passing it to
/// [`ConnectionManager::release`]) returns it to the pool.
pub type DbConnection = PoolConnection<Postgres>;

/// Owner of the optional `PgPool`.
///
/// # Concurrency
///
/// The built pool sits in a `RwLock` that is only ever held long enough to
/// clone or swap the handle, so [`ConnectionManager::is_initialized`] never
/// waits on the network. Building the pool is serialized by a separate
/// `init` mutex: concurrent first acquisitions build a single pool, and a
/// failed build leaves the slot empty for the next caller to retry.
#[derive(Debug)]
pub struct ConnectionManager {
    database_url: Option<String>,
    min_connections: u32,
    max_connections: u32,
    connect_timeout: Duration,
    pool: RwLock<Option<PgPool>>,
    init: Mutex<()>,
}

impl ConnectionManager {
    /// Creates a manager from configuration. No connection is opened.
    #[must_use]
    pub fn new(config: &AgentConfig) -> Self {
        let (min_connections, max_connections) = config.pool_bounds();
        Self {
            database_url: config.database_url.clone(),
            min_connections,
            max_connections,
            connect_timeout: Duration::from_secs(config.database_connect_timeout_secs),
            pool: RwLock::new(None),
            init: Mutex::new(()),
        }
    }

    /// Returns `true` if a connection string is available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.database_url.is_some()
    }

    /// Returns `true` if a pool has been built and not yet closed.
    pub async fn is_initialized(&self) -> bool {
        self.pool
            .read()
            .await
            .as_ref()
            .is_some_and(|pool| !pool.is_closed())
    }

    async fn current(&self) -> Option<PgPool> {
        self.pool.read().await.clone()
    }

    /// Checks out a connection, building the pool first if none exists.
    ///
    /// # Errors
    ///
    /// - [`AgentError::Configuration`] if no connection string is set.
    /// - [`AgentError::Storage`] if connecting, acquiring, or ensuring the
    ///   schema fails.
    pub async fn acquire(&self) -> Result<DbConnection, AgentError> {
        if let Some(pool) = self.current().await {
            return Ok(pool.acquire().await?);
        }

        let url = self.database_url.as_deref().ok_or_else(|| {
            AgentError::Configuration(format!("{DATABASE_URL_VAR} environment variable is not set"))
        })?;

        let _building = self.init.lock().await;
        // Another caller may have finished the build while we waited.
        if let Some(pool) = self.current().await {
            return Ok(pool.acquire().await?);
        }

        let pool = PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(self.connect_timeout)
            .connect(url)
            .await?;

        let mut conn = match pool.acquire().await {
            Ok(conn) => conn,
            Err(err) => {
                pool.close().await;
                return Err(err.into());
            }
        };

        if let Err(err) = schema::ensure_schema(&mut conn).await {
            drop(conn);
            pool.close().await;
            return Err(err);
        }

        tracing::info!(
            min = self.min_connections,
            max = self.max_connections,
            "database pool initialized"
        );
        *self.pool.write().await = Some(pool);
        Ok(conn)
    }

    /// Returns a connection to the pool.
    pub fn release(&self, conn: DbConnection) {
        drop(conn);
    }

    /// Builds the pool and ensures the schema without keeping a connection.
    ///
    /// # Errors
    ///
    /// Same as [`ConnectionManager::acquire`].
    pub async fn initialize(&self) -> Result<(), AgentError> {
        let conn = self.acquire().await?;
        self.release(conn);
        Ok(())
    }

    /// Closes the pool if one exists. Calling it again is a no-op.
    pub async fn shutdown(&self) {
        let pool = self.pool.write().await.take();
        if let Some(pool) = pool {
            pool.close().await;
            tracing::info!("database pool closed");
        }
    }
}
