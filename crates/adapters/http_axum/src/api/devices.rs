//! JSON REST handlers for devices.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hearth_app::ports::{ChangeLogRepository, ChangePublisher, DeviceRepository};
use hearth_domain::device::{Device, DeviceDraft};
use hearth_domain::error::{HearthError, ValidationError};
use hearth_domain::id::DeviceId;

use crate::api::Pagination;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Payload of the paginated listing endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceListData {
    pub devices: Vec<Device>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Envelope<DeviceListData>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Envelope<Device>>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<Envelope<Device>>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Ok(Json<Envelope<()>>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /devices`
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
    let (devices, total) = state.device_service.list_devices_page(page).await?;
    Ok(ListResponse::Ok(Json(Envelope::success(
        "Resources fetched successfully.",
        DeviceListData {
            devices,
            total,
            page: page.number(),
            per_page: page.per_page(),
        },
    ))))
}

/// `POST /devices`
pub async fn create<DR, LR, P>(
    State(state): State<AppState<DR, LR, P>>,
    Json(draft): Json<DeviceDraft>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
    P: ChangePublisher + Send + Sync + 'static,
{
    let created = state.device_service.create_device(draft).await?;
    Ok(CreateResponse::Created(Json(Envelope::success(
        "Resource created successfully.",
        created,
    ))))
}

/// `PUT /devices/:id`
pub async fn update<DR, LR, P>(
    State(state): State<AppState<DR, LR, P>>,
    Path(id): Path<String>,
    Json(draft): Json<DeviceDraft>,
) -> Result<UpdateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
    P: ChangePublisher + Send + Sync + 'static,
{
    let device_id = parse_device_id(&id)?;
    let updated = state.device_service.update_device(device_id, draft).await?;
    Ok(UpdateResponse::Ok(Json(Envelope::success(
        "Resource updated successfully.",
        updated,
    ))))
}

/// `DELETE /devices/:id`
pub async fn delete<DR, LR, P>(
    State(state): State<AppState<DR, LR, P>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
    P: ChangePublisher + Send + Sync + 'static,
{
    let device_id = parse_device_id(&id)?;
    state.device_service.delete_device(device_id).await?;
    Ok(DeleteResponse::Ok(Json(Envelope::success_message(
        "Device deleted successfully.",
    ))))
}

fn parse_device_id(raw: &str) -> Result<DeviceId, ApiError> {
    DeviceId::from_str(raw).map_err(|_| {
        ApiError::from(HearthError::Validation(ValidationError::InvalidId(
            raw.to_string(),
        )))
    })
}
