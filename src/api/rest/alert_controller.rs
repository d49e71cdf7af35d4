use crate::api::rest::{ApiError, ApiResult, AppState, MessageResponse};
use crate::db::models::{Alert, AlertType, NewAlert, Severity};
use crate::db::repositories::AlertsRepository;
use crate::error::Error;
use crate::services::classify;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use chrono::Local;
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Detection batch from an object detector
#[derive(Debug, Deserialize)]
pub struct AlertRequest {
    /// `None` only when the key is absent; an explicit `null` is `Some(Value::Null)`
    #[serde(default, deserialize_with = "present")]
    pub detections: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Response for a stored alert
#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub message: String,
    pub detections: Vec<String>,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/api/alert", get(list_alerts).post(create_alert))
}

/// ISO-8601 local time with microseconds, no offset
fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

fn parse_detections(detections: Option<Value>) -> Result<Vec<String>, Error> {
    let items = match detections {
        None => return Err(Error::Validation("Detections are required".to_string())),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(Error::Validation("Detections should be a list".to_string())),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(label) => Ok(label),
            _ => Err(Error::Validation(
                "Detections should be a list of strings".to_string(),
            )),
        })
        .collect()
}

/// Classify a detection batch and store an alert if any threat matched
pub async fn create_alert(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<AlertRequest>, ApiError>,
) -> ApiResult<Response> {
    let detections = parse_detections(request.detections)?;

    let Some(classification) = classify(detections.as_slice()) else {
        debug!("No threats in {} detections", detections.len());
        return Ok((StatusCode::OK, MessageResponse::new("No threats detected")).into_response());
    };

    let alert = NewAlert {
        message: classification.message(),
        severity: classification.severity,
        alert_type: classification.alert_type,
        timestamp: now_timestamp(),
    };
    AlertsRepository::new(Arc::clone(&state.db_pool))
        .create(&alert)
        .await?;
    warn!("{} {} alert: {}", alert.severity, alert.alert_type, alert.message);

    let response = AlertResponse {
        message: "Alert added successfully".to_string(),
        detections: classification.matched,
        severity: classification.severity,
        alert_type: classification.alert_type,
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// All alerts, newest first
pub async fn list_alerts(State(state): State<AppState>) -> ApiResult<Json<Vec<Alert>>> {
    let alerts = AlertsRepository::new(Arc::clone(&state.db_pool))
        .list()
        .await?;
    Ok(Json(alerts))
}
