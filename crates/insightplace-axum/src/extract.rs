//! Request extractors: the authenticated caller and where the request came from.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts, Query};
use axum::http::header::{AUTHORIZATION, USER_AGENT};
use axum::http::request::Parts;
use insightplace_core::{ClientInfo, User};
use serde::Deserialize;

use crate::error::HttpError;
use crate::state::AppState;

const NOT_AUTHENTICATED: &str = "Not authenticated";

/// The user behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Like [`CurrentUser`], but the caller must be an administrator.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

/// Like [`CurrentUser`], also accepting the token as a `?token=` query
/// parameter. Report HTML loads its images and stylesheets this way.
#[derive(Debug, Clone)]
pub struct QueryTokenUser(pub User);

/// Client address and user agent for audit entries.
#[derive(Debug, Clone)]
pub struct RequestClient(pub ClientInfo);

/// Token from an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

async fn authenticate(state: &AppState, token: Option<&str>) -> Result<User, HttpError> {
    let token = token.ok_or_else(|| HttpError::Unauthorized(NOT_AUTHENTICATED.to_string()))?;
    Ok(state.core.auth().authenticate(token).await?)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(state, bearer_token(parts)).await.map(Self)
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(HttpError::Forbidden("Admin access required".to_string()));
        }
        Ok(Self(user))
    }
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

impl FromRequestParts<AppState> for QueryTokenUser {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(token) = bearer_token(parts) {
            return authenticate(state, Some(token)).await.map(Self);
        }
        let query = Query::<TokenQuery>::try_from_uri(&parts.uri)
            .map(|Query(q)| q.token)
            .unwrap_or_default();
        authenticate(state, query.as_deref().filter(|t| !t.is_empty()))
            .await
            .map(Self)
    }
}

/// Resolve the client IP: first `X-Forwarded-For` entry, then `X-Real-IP`,
/// then the socket peer, else `"unknown"`.
pub fn client_ip(parts: &Parts) -> String {
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').map(str::trim).find(|ip| !ip.is_empty()) {
            return first.to_string();
        }
    }
    if let Some(real_ip) = header("x-real-ip") {
        return real_ip.to_string();
    }
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.ip().to_string())
}

impl<S: Send + Sync> FromRequestParts<S> for RequestClient {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(Self(ClientInfo::new(client_ip(parts), user_agent)))
    }
}
