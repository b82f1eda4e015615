//! Shared application state for axum handlers.

use std::sync::Arc;

use hearth_app::broadcast::SubscriberRegistry;
use hearth_app::ports::{ChangeLogRepository, ChangePublisher, DeviceRepository};
use hearth_app::services::change_log_service::ChangeLogService;
use hearth_app::services::device_service::DeviceService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository and publisher types to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrappers are
/// cloned.
pub struct AppState<DR, LR, P> {
    /// Device CRUD service (the mutation applier).
    pub device_service: Arc<DeviceService<DR, LR, P>>,
    /// Audit-trail read service.
    pub change_log_service: Arc<ChangeLogService<LR>>,
    /// Live subscribers of the device feed.
    pub device_feed: Arc<SubscriberRegistry>,
    /// Live subscribers of the change-log feed.
    pub change_log_feed: Arc<SubscriberRegistry>,
}

impl<DR, LR, P> Clone for AppState<DR, LR, P> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            change_log_service: Arc::clone(&self.change_log_service),
            device_feed: Arc::clone(&self.device_feed),
            change_log_feed: Arc::clone(&self.change_log_feed),
        }
    }
}

impl<DR, LR, P> AppState<DR, LR, P>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
    P: ChangePublisher + Send + Sync + 'static,
{
    /// Create a new application state from service instances and the
    /// subscriber registries owned by the broadcast subsystem.
    pub fn new(
        device_service: DeviceService<DR, LR, P>,
        change_log_service: ChangeLogService<LR>,
        device_feed: Arc<SubscriberRegistry>,
        change_log_feed: Arc<SubscriberRegistry>,
    ) -> Self {
        Self {
            device_service: Arc::new(device_service),
            change_log_service: Arc::new(change_log_service),
            device_feed,
            change_log_feed,
        }
    }
}
