//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hearth_app::ports::DeviceRepository;
use hearth_domain::device::{Device, DeviceDraft};
use hearth_domain::error::HearthError;
use hearth_domain::id::DeviceId;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let kind: String = row.try_get("kind")?;
        let is_on: bool = row.try_get("is_on")?;
        let room: Option<String> = row.try_get("room")?;

        Ok(Self(Device {
            id: DeviceId::from_raw(id),
            name,
            kind,
            is_on,
            room,
        }))
    }
}

const INSERT: &str = "INSERT INTO devices (name, kind, is_on, room) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM devices ORDER BY id";
const SELECT_PAGE: &str = "SELECT * FROM devices ORDER BY id LIMIT ? OFFSET ?";
const COUNT: &str = "SELECT COUNT(*) FROM devices";
const UPDATE: &str = "UPDATE devices SET name = ?, kind = ?, is_on = ?, room = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn insert(
        &self,
        draft: DeviceDraft,
    ) -> impl Future<Output = Result<Device, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&draft.name)
                .bind(&draft.kind)
                .bind(draft.is_on)
                .bind(&draft.room)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            let id = DeviceId::from_raw(result.last_insert_rowid());
            Ok(Device::from_draft(id, draft))
        }
    }

    fn update(
        &self,
        id: DeviceId,
        draft: DeviceDraft,
    ) -> impl Future<Output = Result<bool, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&draft.name)
                .bind(&draft.kind)
                .bind(draft.is_on)
                .bind(&draft.room)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, HearthError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn list_all(&self) -> impl Future<Output = Result<Vec<Device>, HearthError>> + Send {
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
    ) -> impl Future<Output = Result<(Vec<Device>, u64), HearthError>> + Send {
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
