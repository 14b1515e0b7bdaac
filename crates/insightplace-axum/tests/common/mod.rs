//! Shared fixture for the route tests: an in-memory portal with an admin, one
//! client company and one client user.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use chrono::Duration;
use http_body_util::BodyExt;
use insightplace_axum::{AxumContext, CorsConfig, create_router};
use insightplace_core::{
    ClientInfo, Company, NewCompany, NewUser, NoopNotifier, PasswordHasher, PortalCore,
    ReportStore, SeedSettings, TokenIssuer, User, UserRole,
};
use insightplace_db::TestDb;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@insightplace.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const CLIENT_EMAIL: &str = "ana@acme.com";
pub const CLIENT_PASSWORD: &str = "acme-pass";

pub const BOUNDARY: &str = "insightplace-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub acme: Company,
    pub other: Company,
    pub client: User,
    _db: TestDb,
    _uploads: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = TestDb::new().await.unwrap();
        let uploads = TempDir::new().unwrap();

        let core = PortalCore::with_parts(
            db.repos(),
            TokenIssuer::new(&"test-secret".to_string().into(), Duration::hours(1)),
            ReportStore::new(uploads.path()),
            PasswordHasher::fast(),
            Arc::new(NoopNotifier::new()),
        );

        core.seeder()
            .run(&SeedSettings {
                admin_email: ADMIN_EMAIL.into(),
                admin_password: ADMIN_PASSWORD.to_string().into(),
                demo_data: false,
            })
            .await
            .unwrap();

        let admin = db.repos().users.get_by_email(ADMIN_EMAIL).await.unwrap().unwrap();
        let info = ClientInfo::default();
        let acme = core
            .admin()
            .create_company(&admin, NewCompany::new("Acme", Some("Retail client".into())), &info)
            .await
            .unwrap();
        let other = core
            .admin()
            .create_company(&admin, NewCompany::new("Globex", None), &info)
            .await
            .unwrap();
        core.admin()
            .create_user(
                &admin,
                NewUser {
                    email: CLIENT_EMAIL.into(),
                    full_name: "Ana Acme".into(),
                    company_id: acme.id.clone(),
                    role: UserRole::Client,
                    active: true,
                    password: CLIENT_PASSWORD.into(),
                    send_welcome_email: false,
                },
                &info,
            )
            .await
            .unwrap();
        let client = db.repos().users.get_by_email(CLIENT_EMAIL).await.unwrap().unwrap();

        let router = create_router(AxumContext::new(core), &CorsConfig::AllowAll);
        Self {
            router,
            acme,
            other,
            client,
            _db: db,
            _uploads: uploads,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(request(Method::GET, uri, token, Body::empty()))
            .await
    }

    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> TestResponse {
        let mut req = request(method, uri, token, Body::from(body.to_string()));
        req.headers_mut()
            .insert(CONTENT_TYPE, "application/json".parse().unwrap());
        self.send(req).await
    }

    /// Log in through the API and return the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .send_json(
                Method::POST,
                "/api/auth/login",
                None,
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {response:?}");
        response.json()["access_token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn client_token(&self) -> String {
        self.login(CLIENT_EMAIL, CLIENT_PASSWORD).await
    }

    /// Upload a report through the admin endpoint and return its id.
    pub async fn upload(
        &self,
        token: &str,
        company_id: &str,
        title: &str,
        allow_download: bool,
        files: &[(&str, &str, &[u8])],
    ) -> String {
        let allow = if allow_download { "true" } else { "false" };
        let fields = [
            ("title", title),
            ("company_id", company_id),
            ("allow_download", allow),
        ];
        let response = self
            .send(multipart_request(
                "/api/admin/reports/upload",
                token,
                &fields,
                files,
            ))
            .await;
        assert_eq!(response.status, StatusCode::OK, "upload failed: {response:?}");
        response.json()["report_id"].as_str().unwrap().to_string()
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn detail(&self) -> String {
        self.json()["detail"].as_str().unwrap_or_default().to_string()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body).unwrap()
}

/// Hand-built `multipart/form-data` request. Files are `(name, content type, bytes)`.
pub fn multipart_request(
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &str, &[u8])],
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (filename, content_type, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
