use crate::api::rest::{ApiError, ApiResult, AppState, MessageResponse};
use crate::db::models::{Camera, CameraUpdate, NewCamera};
use crate::db::repositories::CamerasRepository;
use crate::services::HealthStatus;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use log::{debug, info, log_enabled, Level};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PER_PAGE: i64 = 10;

/// Body of create and update requests. Fields take any JSON scalar; `null` reads as absent.
#[derive(Debug, Default, Deserialize)]
pub struct CameraRequest {
    pub name: Option<Value>,
    #[serde(rename = "streamUrl")]
    pub stream_url: Option<Value>,
    pub location: Option<Value>,
}

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    /// Resolve to `(limit, offset)`
    pub fn limit_offset(&self) -> Result<(i64, i64), ApiError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);

        if page < 1 || per_page < 1 {
            return Err(ApiError::bad_request(
                "page and per_page must be positive integers",
            ));
        }

        let offset = (page - 1)
            .checked_mul(per_page)
            .ok_or_else(|| ApiError::bad_request("page is out of range"))?;

        Ok((per_page, offset))
    }
}

/// A camera annotated with a live probe result
#[derive(Debug, Serialize)]
pub struct CameraStatusResponse {
    #[serde(flatten)]
    pub camera: Camera,
    pub health_status: HealthStatus,
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/cameras", get(list_cameras).post(create_camera))
        .route("/api/cameras/:id", put(update_camera).delete(delete_camera))
}

fn cameras_repo(state: &AppState) -> CamerasRepository {
    CamerasRepository::new(Arc::clone(&state.db_pool))
}

/// Text form of a scalar field; `None` for objects and arrays.
fn field_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn update_field(field: &str, value: Option<Value>) -> Result<Option<String>, ApiError> {
    match value {
        None => Ok(None),
        Some(value) => field_text(value)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid value for {}", field))),
    }
}

/// Add a camera
pub async fn create_camera(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CameraRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let (name, stream_url, location) = match (
        request.name.and_then(field_text),
        request.stream_url.and_then(field_text),
        request.location.and_then(field_text),
    ) {
        (Some(name), Some(stream_url), Some(location)) => (name, stream_url, location),
        _ => return Err(ApiError::bad_request("Missing required fields")),
    };

    let camera = cameras_repo(&state)
        .create(&NewCamera {
            name,
            stream_url,
            location,
        })
        .await?;
    info!("Camera {} added: {}", camera.id, camera.name);

    Ok((
        StatusCode::CREATED,
        MessageResponse::new("Camera added successfully"),
    ))
}

/// List one page of cameras, probing each one's health endpoint in turn
pub async fn list_cameras(
    State(state): State<AppState>,
    WithRejection(Query(pagination), _): WithRejection<Query<Pagination>, ApiError>,
) -> ApiResult<Json<Vec<CameraStatusResponse>>> {
    let (limit, offset) = pagination.limit_offset()?;
    let cameras = cameras_repo(&state).list(limit, offset).await?;

    let mut response = Vec::with_capacity(cameras.len());
    for camera in cameras {
        let health_status = state.health_checker.check(&camera.stream_url).await;
        debug!("Camera {} is {}", camera.id, health_status);
        response.push(CameraStatusResponse {
            camera,
            health_status,
        });
    }

    Ok(Json(response))
}

/// Partially update a camera. An unknown id is not an error.
pub async fn update_camera(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Json(request), _): WithRejection<Json<CameraRequest>, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    let update = CameraUpdate {
        name: update_field("name", request.name)?,
        stream_url: update_field("streamUrl", request.stream_url)?,
        location: update_field("location", request.location)?,
    };

    if update.is_empty() {
        return Err(ApiError::bad_request("No valid fields to update"));
    }

    let repo = cameras_repo(&state);
    let rows = repo.update(id, &update).await?;
    if rows == 0 {
        info!("Update matched no camera with id {}", id);
    } else if log_enabled!(Level::Debug) {
        if let Some(camera) = repo.get_by_id(id).await? {
            debug!("Camera {} is now {:?}", id, camera);
        }
    }

    Ok(MessageResponse::new("Camera updated successfully"))
}

/// Delete a camera. Deleting an unknown id still succeeds.
pub async fn delete_camera(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    if !cameras_repo(&state).delete(id).await? {
        info!("Delete matched no camera with id {}", id);
    }

    Ok(MessageResponse::new("Camera deleted successfully"))
}
