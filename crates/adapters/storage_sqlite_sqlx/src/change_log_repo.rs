//! `SQLite` implementation of [`ChangeLogRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hearth_app::ports::ChangeLogRepository;
use hearth_domain::change_log::LogEntry;
use hearth_domain::error::HearthError;
use hearth_domain::id::LogEntryId;
use hearth_domain::time;

use crate::error::StorageError;

struct Wrapper(LogEntry);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let change: String = row.try_get("change")?;
        let action: Option<String> = row.try_get("action")?;
        let timestamp_str: String = row.try_get("timestamp")?;

        let timestamp = chrono::DateTime::parse_from_rfc3339(&timestamp_str)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(LogEntry {
            id: LogEntryId::from_raw(id),
            change,
            action,
            timestamp,
        }))
    }
}

const INSERT: &str = "INSERT INTO change_log (change, action, timestamp) VALUES (?, ?, ?)";
const SELECT_ALL: &str = "SELECT * FROM change_log ORDER BY id DESC";
const SELECT_PAGE: &str = "SELECT * FROM change_log ORDER BY id DESC LIMIT ? OFFSET ?";
const COUNT: &str = "SELECT COUNT(*) FROM change_log";

/// `SQLite`-backed change-log repository.
///
/// The table is append-only: no update or delete statements exist here.
pub struct SqliteChangeLogRepository {
    pool: SqlitePool,
}

impl SqliteChangeLogRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ChangeLogRepository for SqliteChangeLogRepository {
    fn append(
        &self,
        change: String,
        action: Option<String>,
    ) -> impl Future<Output = Result<LogEntry, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let timestamp = time::now();
            let result = sqlx::query(INSERT)
                .bind(&change)
                .bind(&action)
                .bind(timestamp.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(LogEntry {
                id: LogEntryId::from_raw(result.last_insert_rowid()),
                change,
                action,
                timestamp,
            })
        }
    }

    fn list_all(&self) -> impl Future<Output = Result<Vec<LogEntry>, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn list_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<LogEntry>, u64), HearthError>> + Send {
        let pool = self.pool.clone();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
                .bind(limit)
                .bind(offset)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let total: i64 = sqlx::query_scalar(COUNT)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok((
                rows.into_iter().map(|w| w.0).collect(),
                u64::try_from(total).unwrap_or_default(),
            ))
        }
    }
}
