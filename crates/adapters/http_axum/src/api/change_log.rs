//! JSON REST handlers for the change log.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hearth_app::ports::{ChangeLogRepository, ChangePublisher, DeviceRepository};
use hearth_domain::change_log::LogEntry;

use crate::api::Pagination;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Payload of the paginated change-log endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogData {
    pub entries: Vec<LogEntry>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Envelope<ChangeLogData>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /change-log`
pub async fn list<DR, LR, P>(
    State(state): State<AppState<DR, LR, P>>,
    Query(pagination): Query<Pagination>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
    P: ChangePublisher + Send + Sync + 'static,
{
    let page = pagination.to_page();
    let (entries, total) = state.change_log_service.list_entries_page(page).await?;
    Ok(ListResponse::Ok(Json(Envelope::success(
        "Resources fetched successfully.",
        ChangeLogData {
            entries,
            total,
            page: page.number(),
            per_page: page.per_page(),
        },
    ))))
}
