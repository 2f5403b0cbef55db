//! Persistence layer.
//!
//! One store trait per aggregate ([`ProjectStore`], [`PromptStore`],
//! [`MessageStore`], [`FileStore`]), all implemented by [`SqliteStore`].
//! Trait methods use `impl Future` in their signatures so no `async-trait`
//! crate is required.
//!
//! Queries use the runtime-checked `sqlx::query` form, so no `DATABASE_URL`
//! is needed at compile time. Migrations under `./migrations` are embedded
//! into the binary and applied by [`SqliteStore::connect`].

pub mod dao;
pub mod file;
pub mod message;
pub mod project;
pub mod prompt;

pub use dao::{ChatMessage, Project, ProjectFile, Prompt};

pub use file::FileStore;
pub use message::MessageStore;
pub use project::ProjectStore;
pub use prompt::PromptStore;

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx SQLite URL, e.g. `"sqlite://chatai.db"` or
    /// `"sqlite::memory:"` for tests. In-memory databases are pinned to a
    /// single connection that never expires, otherwise each pooled connection
    /// would see its own empty database.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().connect_with(options).await?
        };

        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Close every pooled connection; later queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Round-trip a trivial query to confirm the database answers.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Fixed-width RFC 3339 (UTC, microseconds) so lexical order is chronological.
pub(crate) fn db_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|e: chrono::ParseError| {
        tracing::warn!(raw = %raw, error = %e, "failed to parse stored timestamp; using now");
        Utc::now()
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_are_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let later = whole + chrono::Duration::microseconds(1);
        let a = db_timestamp(whole);
        let b = db_timestamp(later);
        assert_eq!(a, "2024-05-01T09:00:00.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(parse_timestamp(&b), later);
    }

    #[tokio::test]
    async fn in_memory_store_runs_migrations() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&store.pool)
                .await
                .unwrap();
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        for expected in ["chat_messages", "project_files", "projects", "prompts"] {
            assert!(names.contains(&expected), "missing table {expected}: {names:?}");
        }
    }

    #[tokio::test]
    async fn ping_fails_once_the_pool_is_closed() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        assert!(store.ping().await.is_ok());
        store.close().await;
        assert!(store.ping().await.is_err());
    }
}
