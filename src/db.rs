//! Connection Provider.
//!
//! The pool hands out a connection for the duration of a single statement and
//! takes it back on every exit path, so handlers never own a connection.

use crate::config::AppConfig;
use crate::errors::ServiceError;
use metrics::{counter, gauge, histogram};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr,
    FromQueryResult, JsonValue, Statement,
};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use utoipa::ToSchema;

/// Type alias for a database connection pool
pub type DbPool = DatabaseConnection;

/// Configuration for database connection
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Minimum number of connections
    pub min_connections: u32,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Idle timeout duration
    pub idle_timeout: Duration,
    /// Acquire connection timeout
    pub acquire_timeout: Duration,
    /// Defer opening connections until the first statement
    pub lazy: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 0,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(600),
            acquire_timeout: Duration::from_secs(8),
            lazy: false,
        }
    }
}

impl From<&AppConfig> for DbConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            url: cfg.database_url.clone(),
            max_connections: cfg.db_max_connections,
            min_connections: cfg.db_min_connections,
            connect_timeout: Duration::from_secs(cfg.db_connect_timeout_secs),
            idle_timeout: Duration::from_secs(cfg.db_idle_timeout_secs),
            acquire_timeout: Duration::from_secs(cfg.db_acquire_timeout_secs),
            lazy: cfg.db_lazy_connect,
        }
    }
}

/// Establishes a connection pool to the database with custom configuration
///
/// # Errors
/// Returns a `ServiceError` if the pool cannot be created. With `lazy` set
/// this only fails on a malformed URL; reachability is checked per statement.
pub async fn establish_connection_with_config(config: &DbConfig) -> Result<DbPool, ServiceError> {
    let mut opt = ConnectOptions::new(config.url.clone());

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .connect_lazy(config.lazy)
        .sqlx_logging(false);

    gauge!("foods_api_db.max_connections", config.max_connections as f64);

    info!(
        max_connections = config.max_connections,
        lazy = config.lazy,
        "Connecting to database"
    );

    let pool = Database::connect(opt).await.map_err(|e| {
        error!("Database connection establishment failed: {}", e);
        ServiceError::from_db(e)
    })?;

    info!("Database connection pool established successfully");
    Ok(pool)
}

/// Establish DB pool using AppConfig tuning
pub async fn establish_connection_from_app_config(cfg: &AppConfig) -> Result<DbPool, ServiceError> {
    let db_cfg: DbConfig = cfg.into();
    establish_connection_with_config(&db_cfg).await
}

/// Result of a write statement, in the shape MySQL-style drivers report it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WriteOutcome {
    /// Number of rows the statement touched
    #[schema(example = 1)]
    pub affected_rows: u64,
    /// Auto-generated row id, on backends that report one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_id: Option<u64>,
}

/// Runs a row-returning statement and hands back every row as a JSON object
/// keyed by column name.
pub async fn fetch_rows(
    db: &DbPool,
    operation: &'static str,
    stmt: Statement,
) -> Result<Vec<JsonValue>, ServiceError> {
    let start = Instant::now();
    debug!(operation, sql = %stmt.sql, "Executing query");

    let rows = JsonValue::find_by_statement(stmt)
        .all(db)
        .await
        .map_err(|e| record_failure(operation, e))?;

    histogram!("foods_api_db.query.duration", start.elapsed(), "operation" => operation);
    debug!(operation, rows = rows.len(), duration = ?start.elapsed(), "Query completed");
    Ok(rows)
}

/// Runs a write statement.
pub async fn execute(
    db: &DbPool,
    operation: &'static str,
    stmt: Statement,
) -> Result<WriteOutcome, ServiceError> {
    let start = Instant::now();
    debug!(operation, sql = %stmt.sql, "Executing statement");

    let result = db
        .execute(stmt)
        .await
        .map_err(|e| record_failure(operation, e))?;

    let insert_id = match db.get_database_backend() {
        // Postgres has no last-insert-id; sea-orm refuses to report one
        DbBackend::Postgres => None,
        _ => Some(result.last_insert_id()).filter(|id| *id != 0),
    };

    histogram!("foods_api_db.statement.duration", start.elapsed(), "operation" => operation);
    debug!(operation, rows_affected = result.rows_affected(), duration = ?start.elapsed(), "Statement completed");

    Ok(WriteOutcome {
        affected_rows: result.rows_affected(),
        insert_id,
    })
}

fn record_failure(operation: &'static str, err: DbErr) -> ServiceError {
    error!(operation, error = %err, "Database operation failed");
    counter!("foods_api_db.operation.error", 1, "operation" => operation);
    ServiceError::from_db(err)
}

/// Checks if the database connection is active
pub async fn check_connection(pool: &DbPool) -> Result<(), ServiceError> {
    let start = Instant::now();
    let result = pool.ping().await.map_err(ServiceError::from_db);

    match &result {
        Ok(_) => debug!("Database connection check successful in {:?}", start.elapsed()),
        Err(e) => {
            error!(
                "Database connection check failed after {:?}: {}",
                start.elapsed(),
                e
            );
            counter!("foods_api_db.connection_failures", 1);
        }
    }

    result
}

/// Closes the database connection pool
pub async fn close_pool(pool: DbPool) -> Result<(), ServiceError> {
    info!("Closing database connection pool");
    pool.close().await.map_err(ServiceError::from_db)
}
