//! # Database Module
//!
//! This module handles all PostgreSQL access for the scheme service.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                DATABASE LAYER                │
//! │                                              │
//! │  ┌────────────────────────────────────────┐  │
//! │  │            Connection Pool             │  │
//! │  │          (deadpool-postgres)           │  │
//! │  └────────────────────────────────────────┘  │
//! │                      │                       │
//! │                      ▼                       │
//! │               ┌────────────┐                 │
//! │               │  schemes   │                 │
//! │               │   table    │                 │
//! │               └────────────┘                 │
//! └──────────────────────────────────────────────┘
//! ```

pub mod models;
pub mod queries;

use deadpool_postgres::{Config, Pool, Runtime};
use thiserror::Error;
use tokio_postgres::{Config as TokioConfig, NoTls};
use tracing::{error, info, warn};

/// Schema migration, embedded at compile time.
const INITIAL_SCHEMA: &str = include_str!("../../migrations/001_initial_schema.sql");

/// Database-related errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to connect to the database
    #[error("Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryError(#[from] tokio_postgres::Error),

    /// Migration failed
    #[error("Migration failed: {0}")]
    MigrationError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Database connection wrapper.
///
/// Wraps the connection pool; cloning is cheap and shares the pool.
///
/// ## Usage
///
/// ```rust,ignore
/// let db = Database::connect("postgres://...", 10).await?;
/// let scheme = queries::get_scheme_by_id(db.pool(), 7).await?;
/// ```
#[derive(Clone)]
pub struct Database {
    /// The connection pool
    pool: Pool,
}

impl Database {
    /// Connect to the PostgreSQL database.
    ///
    /// ## Arguments
    ///
    /// * `database_url` - PostgreSQL connection string
    /// * `max_size` - Maximum number of pooled connections
    ///
    /// ## Returns
    ///
    /// * `Ok(Database)` - Connected successfully
    /// * `Err(DatabaseError)` - Connection failed
    pub async fn connect(database_url: &str, max_size: usize) -> Result<Self, DatabaseError> {
        info!("Connecting to database...");

        let tokio_config = database_url
            .parse::<TokioConfig>()
            .map_err(|e| DatabaseError::ConfigError(format!("Invalid database URL: {}", e)))?;

        // Convert to deadpool config
        let mut config = Config::new();

        if let Some(dbname) = tokio_config.get_dbname() {
            config.dbname = Some(dbname.to_string());
        }
        if let Some(user) = tokio_config.get_user() {
            config.user = Some(user.to_string());
        }
        if let Some(password) = tokio_config.get_password() {
            // Password is &[u8], convert to String
            config.password = Some(String::from_utf8_lossy(password).to_string());
        }
        if let Some(tokio_postgres::config::Host::Tcp(host)) = tokio_config.get_hosts().first() {
            config.host = Some(host.clone());
        }
        if let Some(port) = tokio_config.get_ports().first() {
            config.port = Some(*port);
        }

        config.pool = Some(deadpool_postgres::PoolConfig {
            max_size,
            ..Default::default()
        });

        let pool = config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        let db = Self { pool };
        db.ping().await?;

        info!("Database connection established (pool size: {})", max_size);
        Ok(db)
    }

    /// Create the `schemes` table and its indexes.
    ///
    /// The statements are idempotent; objects that already exist are
    /// reported at `warn` and otherwise ignored.
    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        info!("Running database migrations...");

        let client = self
            .pool
            .get()
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        match client.batch_execute(INITIAL_SCHEMA).await {
            Ok(()) => {
                info!("Migrations completed successfully");
                Ok(())
            }
            Err(e) => {
                // 42P07 = duplicate_table, 42710 = duplicate_object
                let code = e.code().map(|c| c.code().to_string());
                let is_duplicate = matches!(code.as_deref(), Some("42P07") | Some("42710"))
                    || e.to_string().contains("already exists");

                if is_duplicate {
                    warn!(
                        "Some database objects already exist (error code: {:?}), continuing",
                        code
                    );
                    Ok(())
                } else {
                    let detail = e
                        .as_db_error()
                        .and_then(|db_err| db_err.detail())
                        .unwrap_or("No detail available");
                    error!("Migration execution error: {} ({})", e, detail);
                    Err(DatabaseError::MigrationError(format!(
                        "{} (code: {:?}, detail: {})",
                        e, code, detail
                    )))
                }
            }
        }
    }

    /// Round-trip a trivial query to check the pool can reach the server.
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        client
            .query("SELECT 1", &[])
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

pub use models::*;
