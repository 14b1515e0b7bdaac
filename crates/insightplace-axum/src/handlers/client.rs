//! Client portal handlers. Every lookup is scoped to the caller's company.

use axum::Json;
use axum::extract::{Path, Query, Request, State};
use axum::response::Response;
use insightplace_core::{Company, Report};
use serde::Deserialize;

use super::files::{self, Disposition};
use crate::error::HttpError;
use crate::extract::{CurrentUser, QueryTokenUser, RequestClient};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    pub file_path: Option<String>,
}

pub async fn list_reports(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Report>>, HttpError> {
    Ok(Json(state.core.client().list_reports(&user).await?))
}

pub async fn report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RequestClient(client): RequestClient,
    Path(report_id): Path<String>,
) -> Result<Json<Report>, HttpError> {
    Ok(Json(
        state
            .core
            .client()
            .report(&user, &report_id, &client)
            .await?,
    ))
}

/// The report's main file rendered as HTML.
pub async fn view(
    State(state): State<AppState>,
    QueryTokenUser(user): QueryTokenUser,
    RequestClient(client): RequestClient,
    Path(report_id): Path<String>,
    req: Request,
) -> Result<Response, HttpError> {
    let (_, file) = state
        .core
        .client()
        .view(&user, &report_id, &client)
        .await?;
    files::serve(&file, req, Disposition::InlineHtml).await
}

/// An image, stylesheet or other file referenced from the main file.
pub async fn asset(
    State(state): State<AppState>,
    QueryTokenUser(user): QueryTokenUser,
    Path((report_id, asset)): Path<(String, String)>,
    req: Request,
) -> Result<Response, HttpError> {
    let file = state
        .core
        .client()
        .asset(&user, &report_id, &asset)
        .await?;
    files::serve(&file, req, Disposition::Inline).await
}

pub async fn download(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RequestClient(client): RequestClient,
    Path(report_id): Path<String>,
    Query(query): Query<DownloadQuery>,
    req: Request,
) -> Result<Response, HttpError> {
    let file = state
        .core
        .client()
        .download(&user, &report_id, query.file_path.as_deref(), &client)
        .await?;
    files::serve(&file, req, Disposition::Attachment).await
}

pub async fn company(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Company>, HttpError> {
    Ok(Json(state.core.client().company(&user).await?))
}
