//! Storage ports — repository traits for persistence.

use std::future::Future;
use std::sync::Arc;

use hearth_domain::change_log::LogEntry;
use hearth_domain::device::{Device, DeviceDraft};
use hearth_domain::error::HearthError;
use hearth_domain::id::DeviceId;

/// Persistence for device records.
pub trait DeviceRepository {
    /// Insert a new device, returning it with its store-assigned id.
    fn insert(
        &self,
        draft: DeviceDraft,
    ) -> impl Future<Output = Result<Device, HearthError>> + Send;

    /// Replace every mutable field of the device with `id`.
    ///
    /// Returns `false` when no row with that id exists, so callers can
    /// distinguish "nothing happened" from "something broke".
    fn update(
        &self,
        id: DeviceId,
        draft: DeviceDraft,
    ) -> impl Future<Output = Result<bool, HearthError>> + Send;

    /// Delete the device with `id`.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HearthError>> + Send;

    /// Look up a single device.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, HearthError>> + Send;

    /// The complete current listing, in insertion order.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Device>, HearthError>> + Send;

    /// One page of the listing plus the total record count.
    fn list_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<Device>, u64), HearthError>> + Send;
}

/// Persistence for the append-only audit trail.
pub trait ChangeLogRepository {
    /// Append one entry, returning it with its store-assigned id and
    /// timestamp.
    fn append(
        &self,
        change: String,
        action: Option<String>,
    ) -> impl Future<Output = Result<LogEntry, HearthError>> + Send;

    /// The complete trail, newest first.
    fn list_all(&self) -> impl Future<Output = Result<Vec<LogEntry>, HearthError>> + Send;

    /// One page of the trail (newest first) plus the total entry count.
    fn list_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<LogEntry>, u64), HearthError>> + Send;
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for Arc<T> {
    fn insert(
        &self,
        draft: DeviceDraft,
    ) -> impl Future<Output = Result<Device, HearthError>> + Send {
        (**self).insert(draft)
    }

    fn update(
        &self,
        id: DeviceId,
        draft: DeviceDraft,
    ) -> impl Future<Output = Result<bool, HearthError>> + Send {
        (**self).update(id, draft)
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HearthError>> + Send {
        (**self).delete(id)
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, HearthError>> + Send {
        (**self).get_by_id(id)
    }

    fn list_all(&self) -> impl Future<Output = Result<Vec<Device>, HearthError>> + Send {
        (**self).list_all()
    }

    fn list_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<Device>, u64), HearthError>> + Send {
        (**self).list_page(offset, limit)
    }
}

impl<T: ChangeLogRepository + Send + Sync> ChangeLogRepository for Arc<T> {
    fn append(
        &self,
        change: String,
        action: Option<String>,
    ) -> impl Future<Output = Result<LogEntry, HearthError>> + Send {
        (**self).append(change, action)
    }

    fn list_all(&self) -> impl Future<Output = Result<Vec<LogEntry>, HearthError>> + Send {
        (**self).list_all()
    }

    fn list_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<LogEntry>, u64), HearthError>> + Send {
        (**self).list_page(offset, limit)
    }
}
