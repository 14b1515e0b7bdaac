//! Service and authentication routes.

mod common;

use axum::body::Body;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{ADMIN_EMAIL, CLIENT_EMAIL, CLIENT_PASSWORD, TestApp, request};

#[tokio::test]
async fn health_and_root_need_no_auth() {
    let app = TestApp::new().await;

    let health = app.get("/api/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.json()["status"], "healthy");
    assert_eq!(health.json()["service"], "InsightPlace Client Portal API");

    for uri in ["/api", "/api/"] {
        let root = app.get(uri, None).await;
        assert_eq!(root.status, StatusCode::OK, "{uri}");
        assert!(root.json()["message"].is_string());
    }
}

#[tokio::test]
async fn status_checks_round_trip() {
    let app = TestApp::new().await;

    let created = app
        .send_json(
            Method::POST,
            "/api/status",
            None,
            &json!({ "client_name": "probe" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.json()["client_name"], "probe");

    let listed = app.get("/api/status", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    let checks = listed.json();
    assert_eq!(checks.as_array().unwrap().len(), 1);
    assert_eq!(checks[0]["id"], created.json()["id"]);
}

#[tokio::test]
async fn login_returns_bearer_token_and_company() {
    let app = TestApp::new().await;

    let response = app
        .send_json(
            Method::POST,
            "/api/auth/login",
            None,
            &json!({ "email": CLIENT_EMAIL, "password": CLIENT_PASSWORD }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["token_type"], "bearer");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], CLIENT_EMAIL);
    assert_eq!(body["user"]["role"], "client");
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(body["company"]["name"], "Acme");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .send_json(
            Method::POST,
            "/api/auth/login",
            None,
            &json!({ "email": CLIENT_EMAIL, "password": "nope" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), Some("Bearer"));
    assert_eq!(response.detail(), "Invalid email or password");

    let unknown = app
        .send_json(
            Method::POST,
            "/api/auth/login",
            None,
            &json!({ "email": "ghost@nowhere.com", "password": "nope" }),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.detail(), response.detail());
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let app = TestApp::new().await;

    let anonymous = app.get("/api/auth/me", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.detail(), "Not authenticated");

    let garbage = app.get("/api/auth/me", Some("not-a-jwt")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let token = app.admin_token().await;
    let me = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json()["email"], ADMIN_EMAIL);
    assert_eq!(me.json()["role"], "admin");
}

#[tokio::test]
async fn logout_acknowledges_and_is_logged() {
    let app = TestApp::new().await;
    let client = app.client_token().await;

    let response = app
        .send(request(
            Method::POST,
            "/api/auth/logout",
            Some(&client),
            Body::empty(),
        ))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Successfully logged out");

    let admin = app.admin_token().await;
    let logs = app
        .get(
            &format!("/api/admin/activity-logs?user_id={}", app.client.id),
            Some(&admin),
        )
        .await;
    assert_eq!(logs.status, StatusCode::OK);
    let mut types: Vec<String> = logs
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["activity_type"].as_str().unwrap().to_string())
        .collect();
    types.sort();
    assert_eq!(types, vec!["login", "logout"]);
}
