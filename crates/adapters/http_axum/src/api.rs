//! JSON REST and WebSocket handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod change_log;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
pub mod ws;

use axum::Router;
use axum::routing::get;
use serde::Deserialize;

use hearth_app::pagination::Page;
use hearth_app::ports::{ChangeLogRepository, ChangePublisher, DeviceRepository};

use crate::state::AppState;

/// Query parameters of the paginated listing endpoints.
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: Page::DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    #[must_use]
    pub fn to_page(&self) -> Page {
        Page::new(self.page, self.per_page)
    }
}

/// Build the API sub-router.
pub fn routes<DR, LR, P>() -> Router<AppState<DR, LR, P>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
    P: ChangePublisher + Send + Sync + 'static,
{
    Router::new()
        // Devices
        .route(
            "/devices",
            get(devices::list::<DR, LR, P>).post(devices::create::<DR, LR, P>),
        )
        .route("/devices/ws", get(ws::devices::<DR, LR, P>))
        .route(
            "/devices/{id}",
            axum::routing::put(devices::update::<DR, LR, P>)
                .delete(devices::delete::<DR, LR, P>),
        )
        // Change log
        .route("/change-log", get(change_log::list::<DR, LR, P>))
        .route("/change-log/ws", get(ws::change_log::<DR, LR, P>))
}
