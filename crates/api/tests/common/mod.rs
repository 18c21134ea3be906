//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the full production router (built by
//! `carlot_api::router::build_app_router`) via `tower::ServiceExt`, so
//! every request passes through the same middleware stack as in
//! production. Uploaded blobs land in a shared temp directory.

#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use sqlx::PgPool;

use carlot_api::auth::jwt::{generate_access_token, JwtConfig};
use carlot_api::config::ServerConfig;
use carlot_api::router::build_app_router;
use carlot_api::state::AppState;
use carlot_core::blob::LocalBlobSink;
use carlot_core::roles::{ROLE_ADMIN, ROLE_BUYER};
use carlot_core::types::DbId;
use carlot_db::models::car::CarInput;
use carlot_db::repositories::{BrandRepo, CarModelRepo, CarRepo};

/// JWT secret used by all tests.
const TEST_JWT_SECRET: &str = "integration-test-secret";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` with safe defaults and the given upload
/// directory.
pub fn test_config(upload_dir: String) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:4200".to_string()],
        request_timeout_secs: 30,
        upload_dir,
        jwt: test_jwt_config(),
    }
}

/// One upload directory shared by every test in the process. Stored
/// blob filenames are UUIDs, so tests cannot collide.
fn upload_dir() -> &'static tempfile::TempDir {
    static UPLOAD_DIR: OnceLock<tempfile::TempDir> = OnceLock::new();
    UPLOAD_DIR.get_or_init(|| tempfile::tempdir().expect("create temp upload dir"))
}

/// Build the full application router with all middleware layers, using
/// the given database pool and the shared temp directory for uploads.
pub fn build_test_app(pool: PgPool) -> Router {
    let dir = upload_dir();
    let config = test_config(dir.path().to_string_lossy().into_owned());
    let blob = Arc::new(LocalBlobSink::new(dir.path()));

    let state = AppState::new(pool, config.clone(), blob);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn admin_token() -> String {
    generate_access_token("admin-1", ROLE_ADMIN, &test_jwt_config()).expect("generate admin token")
}

pub fn buyer_token(user_id: &str) -> String {
    generate_access_token(user_id, ROLE_BUYER, &test_jwt_config()).expect("generate buyer token")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    use tower::ServiceExt;

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn put_empty(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn patch(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), None).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body into a JSON value.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

pub const MULTIPART_BOUNDARY: &str = "carlot-test-boundary";

/// Minimal multipart/form-data body builder for upload tests.
pub struct MultipartForm {
    buf: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

/// Send a multipart POST with the standard test boundary.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    token: &str,
    body: Vec<u8>,
) -> Response<Body> {
    use tower::ServiceExt;

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// Create a brand and one model, returning their ids.
pub async fn seed_taxonomy(pool: &PgPool, brand: &str, model: &str) -> (DbId, DbId) {
    let brand = BrandRepo::create(pool, brand).await.unwrap();
    let model = CarModelRepo::create(pool, brand.id, model).await.unwrap();
    (brand.id, model.id)
}

/// A valid car payload for repository-level seeding.
pub fn car_input(brand_id: DbId, model_id: DbId) -> CarInput {
    CarInput {
        brand_id,
        model_id,
        body_type: "SUV".into(),
        variant: Some("ZX".into()),
        year: 2020,
        registration_year: 2021,
        fuel_type: "Petrol".into(),
        transmission: "Manual".into(),
        price: 1_250_000,
        kms_driven: 42_000,
        ownership_count: 1,
        registration_code: "KA-01-AB-1234".into(),
        engine_cc: 1500,
        insurance_expiry: None,
        has_spare_key: true,
        description: Some("Well maintained".into()),
        is_active: Some(true),
    }
}

/// The same payload as [`car_input`] in JSON form, for HTTP bodies.
pub fn car_input_json(brand_id: DbId, model_id: DbId) -> serde_json::Value {
    serde_json::json!({
        "brand_id": brand_id,
        "model_id": model_id,
        "body_type": "SUV",
        "variant": "ZX",
        "year": 2020,
        "registration_year": 2021,
        "fuel_type": "Petrol",
        "transmission": "Manual",
        "price": 1_250_000,
        "kms_driven": 42_000,
        "ownership_count": 1,
        "registration_code": "KA-01-AB-1234",
        "engine_cc": 1500,
        "has_spare_key": true,
        "description": "Well maintained",
        "is_active": true
    })
}

/// Seed taxonomy plus one publicly visible car, returning the car id.
pub async fn seed_public_car(pool: &PgPool) -> DbId {
    let (brand_id, model_id) = seed_taxonomy(pool, "Toyota", "Corolla").await;
    let car = CarRepo::create(pool, &car_input(brand_id, model_id))
        .await
        .unwrap();
    car.id
}
