//! Demo data seeding for first launch.

use sqlx::SqlitePool;

use crate::error::StorageError;

const COUNT: &str = "SELECT COUNT(*) FROM devices";

const SEED: &str = "INSERT INTO devices (name, room, kind, is_on) VALUES
    ('Main', 'Living Room', 'light', 0),
    ('Side', 'Living Room', 'light', 1),
    ('Front Door', 'Living', 'lock', 1),
    ('Kitchen Table', 'Kitchen', 'light', 0),
    ('Stove', 'Kitchen', 'light', 1),
    ('Main', 'Kitchen', 'speaker', 1),
    ('Vanity', 'Bathroom', 'light', 0),
    ('Main', 'Bedroom', 'light', 1),
    ('Main', 'Bedroom', 'fan', 1),
    ('Back Door', 'Other', 'lock', 1)";

/// Insert the default device set when the table is empty.
///
/// Does nothing when any device already exists, so restarts never duplicate
/// the demo data.
///
/// # Errors
///
/// Returns [`StorageError`] if the count or insert fails.
pub async fn seed_devices(pool: &SqlitePool) -> Result<(), StorageError> {
    let count: i64 = sqlx::query_scalar(COUNT).fetch_one(pool).await?;
    if count > 0 {
        return Ok(());
    }

    sqlx::query(SEED).execute(pool).await?;
    tracing::info!("database seeded with default devices");
    Ok(())
}
