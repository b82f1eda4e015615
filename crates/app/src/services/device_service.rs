//! Device service — validates, persists, audits, and announces mutations.
//!
//! This is the only place that turns accepted writes into change events.
//! Persistence failures propagate to the caller before any event is
//! enqueued, so a broadcast can never describe a write that did not happen.

use hearth_domain::device::{Device, DeviceDraft};
use hearth_domain::error::{HearthError, NotFoundError};
use hearth_domain::event::{ChangeAction, ChangeEvent};
use hearth_domain::id::DeviceId;

use crate::pagination::Page;
use crate::ports::{ChangeLogRepository, ChangePublisher, DeviceRepository};

/// Application service for device CRUD operations.
pub struct DeviceService<DR, LR, P> {
    devices: DR,
    change_log: LR,
    events: P,
}

impl<DR, LR, P> DeviceService<DR, LR, P>
where
    DR: DeviceRepository,
    LR: ChangeLogRepository,
    P: ChangePublisher,
{
    /// Create a new service backed by the given repositories and publisher.
    pub fn new(devices: DR, change_log: LR, events: P) -> Self {
        Self {
            devices,
            change_log,
            events,
        }
    }

    /// Create a new device after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] if invariants fail, or a storage
    /// error propagated from the repository.
    #[tracing::instrument(skip(self, draft), fields(device_name = %draft.name))]
    pub async fn create_device(&self, draft: DeviceDraft) -> Result<Device, HearthError> {
        draft.validate()?;
        let device = self.devices.insert(draft).await?;

        self.events
            .publish(ChangeEvent::Devices {
                action: ChangeAction::Add,
            })
            .await;
        self.record_change(format!("Added new {}: {}", device.kind, device.name), "add")
            .await;

        Ok(device)
    }

    /// Replace every mutable field of an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] if invariants fail,
    /// [`HearthError::NotFound`] when no device with `id` exists, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, draft))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        draft: DeviceDraft,
    ) -> Result<Device, HearthError> {
        draft.validate()?;
        if !self.devices.update(id, draft.clone()).await? {
            return Err(not_found(id).into());
        }
        let device = Device::from_draft(id, draft);

        self.events
            .publish(ChangeEvent::Devices {
                action: ChangeAction::Update,
            })
            .await;
        self.record_change(format!("Edited device: {}", device.name), "edit")
            .await;

        Ok(device)
    }

    /// Delete a device by id.
    ///
    /// The target is fetched first so that "not found" is distinguishable
    /// from a store failure and the audit entry can name the device.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when no device with `id` exists, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), HearthError> {
        let device = self
            .devices
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        self.devices.delete(id).await?;

        self.events
            .publish(ChangeEvent::Devices {
                action: ChangeAction::Delete,
            })
            .await;
        self.record_change(
            format!("Deleted {} '{}'", device.kind, device.name),
            "delete",
        )
        .await;

        Ok(())
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when no device with `id` exists, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, HearthError> {
        self.devices
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// The complete current listing.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, HearthError> {
        self.devices.list_all().await
    }

    /// One page of the listing plus the total record count.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices_page(&self, page: Page) -> Result<(Vec<Device>, u64), HearthError> {
        self.devices.list_page(page.offset(), page.per_page()).await
    }

    /// Append an audit entry and announce the grown trail.
    ///
    /// Append failure is logged and swallowed: the primary mutation already
    /// succeeded and is not rolled back over a missing audit line.
    async fn record_change(&self, change: String, action: &str) {
        match self
            .change_log
            .append(change, Some(action.to_string()))
            .await
        {
            Ok(_) => self.events.publish(ChangeEvent::ChangeLog).await,
            Err(err) => tracing::warn!(%err, "failed to record change-log entry"),
        }
    }
}

fn not_found(id: DeviceId) -> NotFoundError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_domain::change_log::LogEntry;
    use hearth_domain::error::ValidationError;
    use hearth_domain::id::LogEntryId;
    use hearth_domain::time;
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    struct InMemoryDeviceRepo {
        devices: Mutex<Vec<Device>>,
    }

    impl Default for InMemoryDeviceRepo {
        fn default() -> Self {
            Self {
                devices: Mutex::new(Vec::new()),
            }
        }
    }

    impl DeviceRepository for InMemoryDeviceRepo {
        fn insert(
            &self,
            draft: DeviceDraft,
        ) -> impl Future<Output = Result<Device, HearthError>> + Send {
            let mut devices = self.devices.lock().unwrap();
            let id = DeviceId::from_raw(devices.len() as i64 + 1);
            let device = Device::from_draft(id, draft);
            devices.push(device.clone());
            async move { Ok(device) }
        }

        fn update(
            &self,
            id: DeviceId,
            draft: DeviceDraft,
        ) -> impl Future<Output = Result<bool, HearthError>> + Send {
            let mut devices = self.devices.lock().unwrap();
            let updated = match devices.iter_mut().find(|d| d.id == id) {
                Some(device) => {
                    *device = Device::from_draft(id, draft);
                    true
                }
                None => false,
            };
            async move { Ok(updated) }
        }

        fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HearthError>> + Send {
            self.devices.lock().unwrap().retain(|d| d.id != id);
            async { Ok(()) }
        }

        fn get_by_id(
            &self,
            id: DeviceId,
        ) -> impl Future<Output = Result<Option<Device>, HearthError>> + Send {
            let result = self
                .devices
                .lock()
                .unwrap()
                .iter()
                .find(|d| d.id == id)
                .cloned();
            async move { Ok(result) }
        }

        fn list_all(&self) -> impl Future<Output = Result<Vec<Device>, HearthError>> + Send {
            let result = self.devices.lock().unwrap().clone();
            async move { Ok(result) }
        }

        fn list_page(
            &self,
            offset: u64,
            limit: u64,
        ) -> impl Future<Output = Result<(Vec<Device>, u64), HearthError>> + Send {
            let devices = self.devices.lock().unwrap();
            let total = devices.len() as u64;
            let page: Vec<Device> = devices
                .iter()
                .skip(usize::try_from(offset).unwrap())
                .take(usize::try_from(limit).unwrap())
                .cloned()
                .collect();
            async move { Ok((page, total)) }
        }
    }

    struct InMemoryChangeLogRepo {
        entries: Mutex<Vec<LogEntry>>,
        fail_appends: bool,
    }

    impl Default for InMemoryChangeLogRepo {
        fn default() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
                fail_appends: false,
            }
        }
    }

    impl InMemoryChangeLogRepo {
        fn failing() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
                fail_appends: true,
            }
        }
    }

    impl ChangeLogRepository for InMemoryChangeLogRepo {
        fn append(
            &self,
            change: String,
            action: Option<String>,
        ) -> impl Future<Output = Result<LogEntry, HearthError>> + Send {
            let result = if self.fail_appends {
                Err(HearthError::Storage("append failed".into()))
            } else {
                let mut entries = self.entries.lock().unwrap();
                let entry = LogEntry {
                    id: LogEntryId::from_raw(entries.len() as i64 + 1),
                    change,
                    action,
                    timestamp: time::now(),
                };
                entries.push(entry.clone());
                Ok(entry)
            };
            async move { result }
        }

        fn list_all(&self) -> impl Future<Output = Result<Vec<LogEntry>, HearthError>> + Send {
            let mut entries = self.entries.lock().unwrap().clone();
            entries.reverse();
            async move { Ok(entries) }
        }

        fn list_page(
            &self,
            offset: u64,
            limit: u64,
        ) -> impl Future<Output = Result<(Vec<LogEntry>, u64), HearthError>> + Send {
            let entries = self.entries.lock().unwrap();
            let total = entries.len() as u64;
            let page: Vec<LogEntry> = entries
                .iter()
                .rev()
                .skip(usize::try_from(offset).unwrap())
                .take(usize::try_from(limit).unwrap())
                .cloned()
                .collect();
            async move { Ok((page, total)) }
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<ChangeEvent>>,
    }

    impl ChangePublisher for RecordingPublisher {
        fn publish(&self, event: ChangeEvent) -> impl Future<Output = ()> + Send {
            self.events.lock().unwrap().push(event);
            async {}
        }
    }

    type TestService =
        DeviceService<Arc<InMemoryDeviceRepo>, Arc<InMemoryChangeLogRepo>, Arc<RecordingPublisher>>;

    struct Fixture {
        service: TestService,
        change_log: Arc<InMemoryChangeLogRepo>,
        published: Arc<RecordingPublisher>,
    }

    fn fixture() -> Fixture {
        fixture_with_log_repo(Arc::new(InMemoryChangeLogRepo::default()))
    }

    fn fixture_with_log_repo(change_log: Arc<InMemoryChangeLogRepo>) -> Fixture {
        let published = Arc::new(RecordingPublisher::default());
        let service = DeviceService::new(
            Arc::new(InMemoryDeviceRepo::default()),
            Arc::clone(&change_log),
            Arc::clone(&published),
        );
        Fixture {
            service,
            change_log,
            published,
        }
    }

    fn lamp_draft() -> DeviceDraft {
        DeviceDraft::builder()
            .name("Lamp")
            .kind("light")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_device_and_announce_it() {
        let fx = fixture();

        let created = fx.service.create_device(lamp_draft()).await.unwrap();
        assert_eq!(created.id, DeviceId::from_raw(1));
        assert_eq!(created.name, "Lamp");

        let events = fx.published.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                ChangeEvent::Devices {
                    action: ChangeAction::Add
                },
                ChangeEvent::ChangeLog,
            ]
        );

        let entries = fx.change_log.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].change, "Added new light: Lamp");
        assert_eq!(entries[0].action.as_deref(), Some("add"));
    }

    #[tokio::test]
    async fn should_reject_create_without_side_effects_when_invalid() {
        let fx = fixture();
        let mut draft = lamp_draft();
        draft.name = String::new();

        let result = fx.service.create_device(draft).await;
        assert!(matches!(
            result,
            Err(HearthError::Validation(ValidationError::EmptyName))
        ));
        assert!(fx.published.events.lock().unwrap().is_empty());
        assert!(fx.change_log.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_update_device_and_announce_it() {
        let fx = fixture();
        let created = fx.service.create_device(lamp_draft()).await.unwrap();

        let mut draft = lamp_draft();
        draft.is_on = true;
        let updated = fx.service.update_device(created.id, draft).await.unwrap();
        assert!(updated.is_on);

        let fetched = fx.service.get_device(created.id).await.unwrap();
        assert!(fetched.is_on);

        let entries = fx.change_log.entries.lock().unwrap();
        assert_eq!(entries[1].change, "Edited device: Lamp");
        assert_eq!(entries[1].action.as_deref(), Some("edit"));
    }

    #[tokio::test]
    async fn should_leave_state_unchanged_when_update_is_identical() {
        let fx = fixture();
        let created = fx.service.create_device(lamp_draft()).await.unwrap();

        fx.service
            .update_device(created.id, lamp_draft())
            .await
            .unwrap();

        let all = fx.service.list_devices().await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn should_return_not_found_without_side_effects_when_updating_missing_device() {
        let fx = fixture();

        let result = fx
            .service
            .update_device(DeviceId::from_raw(99), lamp_draft())
            .await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
        assert!(fx.published.events.lock().unwrap().is_empty());
        assert!(fx.change_log.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_delete_device_and_name_it_in_the_audit_entry() {
        let fx = fixture();
        let draft = DeviceDraft::builder()
            .name("Main")
            .kind("light")
            .build()
            .unwrap();
        let created = fx.service.create_device(draft).await.unwrap();

        fx.service.delete_device(created.id).await.unwrap();

        let result = fx.service.get_device(created.id).await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));

        let entries = fx.change_log.entries.lock().unwrap();
        assert_eq!(entries[1].change, "Deleted light 'Main'");
        assert_eq!(entries[1].action.as_deref(), Some("delete"));
    }

    #[tokio::test]
    async fn should_return_not_found_without_side_effects_when_deleting_missing_device() {
        let fx = fixture();

        let result = fx.service.delete_device(DeviceId::from_raw(5)).await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
        assert!(fx.published.events.lock().unwrap().is_empty());
        assert!(fx.change_log.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_keep_mutation_when_audit_append_fails() {
        let fx = fixture_with_log_repo(Arc::new(InMemoryChangeLogRepo::failing()));

        let created = fx.service.create_device(lamp_draft()).await.unwrap();
        assert_eq!(created.name, "Lamp");

        // The device event still goes out; only the change-log
        // announcement is skipped.
        let events = fx.published.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![ChangeEvent::Devices {
                action: ChangeAction::Add
            }]
        );
    }

    #[tokio::test]
    async fn should_page_through_the_listing() {
        let fx = fixture();
        for name in ["One", "Two", "Three"] {
            let draft = DeviceDraft::builder()
                .name(name)
                .kind("light")
                .build()
                .unwrap();
            fx.service.create_device(draft).await.unwrap();
        }

        let (page, total) = fx
            .service
            .list_devices_page(Page::new(2, 2))
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Three");
    }
}
