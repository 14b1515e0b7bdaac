//! Service endpoints: health, API root and legacy status checks.

use axum::Json;
use axum::extract::State;
use insightplace_core::{NewStatusCheck, StatusCheck};
use serde_json::{Value, json};

use super::MessageResponse;
use crate::error::HttpError;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "InsightPlace Client Portal API";

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new(SERVICE_NAME))
}

pub async fn create_status(
    State(state): State<AppState>,
    Json(req): Json<NewStatusCheck>,
) -> Result<Json<StatusCheck>, HttpError> {
    Ok(Json(state.core.status().create(req).await?))
}

pub async fn list_status(State(state): State<AppState>) -> Result<Json<Vec<StatusCheck>>, HttpError> {
    Ok(Json(state.core.status().list().await?))
}
