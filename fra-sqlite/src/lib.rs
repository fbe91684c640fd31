#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::{str::FromStr, time::Duration};
use tokio::try_join;

use fra_core::models::MarketConfig;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

/// SQLite database implementation for the marketplace repositories.
///
/// This struct provides separate reader and writer connection pools to a
/// SQLite database, implementing all the repository traits defined in
/// `fra-core`. The separation of read and write connections allows for
/// better concurrency control and follows SQLite best practices for
/// Write-Ahead Logging (WAL) mode.
///
/// # Connection Management
///
/// - `reader`: A connection pool for read operations, allowing concurrent reads
/// - `writer`: A single-connection pool for write operations, ensuring
///   serialized writes. Every mutation of an application aggregate runs in
///   a transaction on this connection, which is what makes the cached
///   counters safe under concurrent bank activity
///
/// # Example
///
/// ```no_run
/// # use fra_sqlite::{Db, config::SqliteConfig};
/// # use fra_core::models::MarketConfig;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Db::open(&SqliteConfig::default(), MarketConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
    /// Marketplace parameters: the default auction window and the unit fee
    pub market: MarketConfig,
}

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates a new database if one doesn't exist (when `create_if_missing`
    /// is true) and applies all pending migrations. `market` supplies the
    /// default auction window and the per-purchase unit fee; it is fixed for
    /// the lifetime of the handle.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection fails or migrations fail to
    /// apply.
    pub async fn open(config: &SqliteConfig, market: MarketConfig) -> Result<Self, sqlx::Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options =
            sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(Duration::from_secs(5))
                .foreign_keys(true)
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("cache_size", "1000000000")
                .pragma("journal_size_limit", "27103364")
                .pragma("mmap_size", "134217728")
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        // Run any pending migrations before returning
        sqlx::migrate!("./schema").run(&writer).await?;

        Ok(Self {
            reader,
            writer,
            market,
        })
    }
}
