//! Authentication handlers.

use axum::Json;
use axum::extract::State;
use insightplace_core::{LoginOutcome, UserResponse};
use serde::Deserialize;

use super::MessageResponse;
use crate::error::HttpError;
use crate::extract::{CurrentUser, RequestClient};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    RequestClient(client): RequestClient,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginOutcome>, HttpError> {
    let outcome = state
        .core
        .auth()
        .login(&req.email, &req.password, &client)
        .await?;
    Ok(Json(outcome))
}

pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RequestClient(client): RequestClient,
) -> Json<MessageResponse> {
    state.core.auth().logout(&user, &client).await;
    Json(MessageResponse::new("Successfully logged out"))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
