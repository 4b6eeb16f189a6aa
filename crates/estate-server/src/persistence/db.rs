//! Database connection and initialization.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

const IN_MEMORY: &str = ":memory:";

/// Database connection wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Initialize the SQLite database.
///
/// Creates the database file if it doesn't exist, runs migrations,
/// and returns a connection pool. An in-memory database lives on a single
/// connection that is never recycled, since every connection would
/// otherwise see its own empty database.
pub async fn init_database(db_path: &str, max_connections: u32) -> Result<Database> {
    let in_memory = db_path == IN_MEMORY;

    if !in_memory {
        if let Some(parent) = Path::new(db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path);
    info!("Connecting to database: {}", db_path);

    let mut options = SqliteConnectOptions::from_str(&db_url)?.foreign_keys(true);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections.max(1));
    if in_memory {
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;

    run_migrations(&pool).await?;

    Ok(Database { pool })
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let migration_sql = include_str!("../../migrations/001_init.sql");

    info!("Running database migrations...");

    for statement in migration_sql.split(';') {
        // Remove comment lines and trim whitespace
        let statement: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }

        if let Err(e) = sqlx::query(statement).execute(pool).await {
            let err_str = e.to_string();
            // "already exists" is expected on re-runs
            if err_str.contains("already exists") {
                continue;
            }
            if statement.to_uppercase().starts_with("CREATE") {
                anyhow::bail!("Migration failed on CREATE statement: {}", e);
            }
            warn!("Migration statement failed: {}", e);
        }
    }

    info!("Database migrations complete");
    Ok(())
}
