//! Admin panel routes.

mod common;

use axum::body::Body;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{TestApp, multipart_request, request};

#[tokio::test]
async fn client_accounts_are_forbidden() {
    let app = TestApp::new().await;
    let token = app.client_token().await;

    for uri in [
        "/api/admin/dashboard",
        "/api/admin/companies",
        "/api/admin/users",
        "/api/admin/reports",
        "/api/admin/activity-logs",
    ] {
        let response = app.get(uri, Some(&token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(response.detail(), "Admin access required");
    }

    let anonymous = app.get("/api/admin/dashboard", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_counts_everything() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app.get("/api/admin/dashboard", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let stats = response.json();
    assert_eq!(stats["total_companies"], 3);
    assert_eq!(stats["total_users"], 2);
    assert_eq!(stats["total_reports"], 0);
    assert!(
        !stats["recent_activities"].as_array().unwrap().is_empty(),
        "admin login should be in the feed"
    );
}

#[tokio::test]
async fn duplicate_company_names_are_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = app
        .send_json(
            Method::POST,
            "/api/admin/companies",
            Some(&token),
            &json!({ "name": "Initech", "description": "Software" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.json()["name"], "Initech");
    assert_eq!(created.json()["active"], true);

    let duplicate = app
        .send_json(
            Method::POST,
            "/api/admin/companies",
            Some(&token),
            &json!({ "name": "Initech" }),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);

    let malformed = app
        .send_json(
            Method::POST,
            "/api/admin/users",
            Some(&token),
            &json!({
                "email": "not-an-email",
                "full_name": "Nobody",
                "company_id": app.other.id,
                "password": "x",
            }),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.detail(), "Invalid email address");
    assert_eq!(duplicate.detail(), "Company with this name already exists");

    let listed = app.get("/api/admin/companies", Some(&token)).await;
    assert_eq!(listed.json().as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn users_can_be_created_filtered_and_updated() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = app
        .send_json(
            Method::POST,
            "/api/admin/users",
            Some(&token),
            &json!({
                "email": "bob@globex.com",
                "full_name": "Bob Globex",
                "company_id": app.other.id,
                "password": "globex-pass",
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    let bob = created.json();
    assert_eq!(bob["role"], "client");
    assert!(bob.get("password_hash").is_none());

    let duplicate = app
        .send_json(
            Method::POST,
            "/api/admin/users",
            Some(&token),
            &json!({
                "email": "bob@globex.com",
                "full_name": "Bob Again",
                "company_id": app.other.id,
                "password": "x",
            }),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);

    let globex_users = app
        .get(
            &format!("/api/admin/users?company_id={}", app.other.id),
            Some(&token),
        )
        .await;
    let users = globex_users.json();
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["email"], "bob@globex.com");

    let bob_id = bob["id"].as_str().unwrap();
    let updated = app
        .send_json(
            Method::PATCH,
            &format!("/api/admin/users/{bob_id}"),
            Some(&token),
            &json!({ "active": false }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["active"], false);

    let login = app
        .send_json(
            Method::POST,
            "/api/auth/login",
            None,
            &json!({ "email": "bob@globex.com", "password": "globex-pass" }),
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);

    let missing = app
        .send_json(
            Method::PATCH,
            "/api/admin/users/does-not-exist",
            Some(&token),
            &json!({ "active": true }),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_update_and_delete_report() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let id = app
        .upload(
            &token,
            &app.acme.id,
            "Q1 Sales",
            false,
            &[
                ("index.html", "text/html", b"<html><img src=\"chart.png\"></html>"),
                ("chart.png", "image/png", b"\x89PNG fake"),
            ],
        )
        .await;

    let listed = app
        .get(
            &format!("/api/admin/reports?company_id={}", app.acme.id),
            Some(&token),
        )
        .await;
    let reports = listed.json();
    assert_eq!(reports.as_array().unwrap().len(), 1);
    assert_eq!(reports[0]["id"], id.as_str());
    assert_eq!(reports[0]["main_file"], "Acme/Q1 Sales/index.html");
    assert_eq!(reports[0]["supporting_files"], json!(["Acme/Q1 Sales/chart.png"]));
    assert_eq!(reports[0]["status"], "published");

    let other = app
        .get(
            &format!("/api/admin/reports?company_id={}", app.other.id),
            Some(&token),
        )
        .await;
    assert!(other.json().as_array().unwrap().is_empty());

    let updated = app
        .send_json(
            Method::PATCH,
            &format!("/api/admin/reports/{id}"),
            Some(&token),
            &json!({ "title": "Q1 Sales (final)", "allow_download": true }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["title"], "Q1 Sales (final)");
    assert_eq!(updated.json()["allow_download"], true);

    let deleted = app
        .send(request(
            Method::DELETE,
            &format!("/api/admin/reports/{id}"),
            Some(&token),
            Body::empty(),
        ))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json()["message"], "Report deleted successfully");

    let again = app
        .send(request(
            Method::DELETE,
            &format!("/api/admin/reports/{id}"),
            Some(&token),
            Body::empty(),
        ))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_validates_the_form() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let html: &[u8] = b"<html></html>";

    let no_title = app
        .send(multipart_request(
            "/api/admin/reports/upload",
            &token,
            &[("company_id", app.acme.id.as_str())],
            &[("index.html", "text/html", html)],
        ))
        .await;
    assert_eq!(no_title.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_title.detail(), "Field required: title");

    let bad_type = app
        .send(multipart_request(
            "/api/admin/reports/upload",
            &token,
            &[("title", "Q2"), ("company_id", app.acme.id.as_str())],
            &[("payload.exe", "application/octet-stream", b"MZ")],
        ))
        .await;
    assert_eq!(bad_type.status, StatusCode::BAD_REQUEST);

    let unknown_company = app
        .send(multipart_request(
            "/api/admin/reports/upload",
            &token,
            &[("title", "Q2"), ("company_id", "missing")],
            &[("index.html", "text/html", html)],
        ))
        .await;
    assert_eq!(unknown_company.status, StatusCode::NOT_FOUND);

    let no_files = app
        .send(multipart_request(
            "/api/admin/reports/upload",
            &token,
            &[("title", "Q2"), ("company_id", app.acme.id.as_str())],
            &[],
        ))
        .await;
    assert_eq!(no_files.status, StatusCode::BAD_REQUEST);

    let nameless = app
        .send(multipart_request(
            "/api/admin/reports/upload",
            &token,
            &[("title", "Q3"), ("company_id", app.acme.id.as_str())],
            &[("", "application/octet-stream", b"orphan")],
        ))
        .await;
    assert_eq!(nameless.status, StatusCode::OK);
    assert_eq!(nameless.json()["files_uploaded"], 0);

    let listed = app
        .get(
            &format!("/api/admin/reports?company_id={}", app.acme.id),
            Some(&token),
        )
        .await;
    let reports = listed.json();
    assert_eq!(reports.as_array().unwrap().len(), 1);
    assert_eq!(reports[0]["main_file"], "");
}

#[tokio::test]
async fn activity_feed_filters_by_type() {
    let app = TestApp::new().await;
    let _ = app.client_token().await;
    let token = app.admin_token().await;

    let response = app
        .get(
            "/api/admin/activity-logs?activity_type=login&limit=10",
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let logs = response.json();
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|l| l["activity_type"] == "login"));

    let everything = app
        .get("/api/admin/activity-logs?user_id=&activity_type=", Some(&token))
        .await;
    assert_eq!(everything.status, StatusCode::OK);
    assert!(everything.json().as_array().unwrap().len() > 2);
}
