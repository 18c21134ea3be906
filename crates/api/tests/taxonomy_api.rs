//! HTTP-level integration tests for the brand/model taxonomy endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, buyer_token, get, post_json, seed_taxonomy,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Brands
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_brands_starts_empty(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/brands").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_brand_requires_admin(pool: PgPool) {
    let app = build_test_app(pool);

    let anon = post_json(app.clone(), "/api/v1/brands", None, json!({"name": "Honda"})).await;
    assert_eq!(anon.status(), StatusCode::UNAUTHORIZED);

    let buyer = post_json(
        app,
        "/api/v1/brands",
        Some(&buyer_token("buyer-1")),
        json!({"name": "Honda"}),
    )
    .await;
    assert_eq!(buyer.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_brand_then_list(pool: PgPool) {
    let app = build_test_app(pool);
    let token = admin_token();

    let response = post_json(
        app.clone(),
        "/api/v1/brands",
        Some(&token),
        json!({"name": "  Honda  "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let brand = body_json(response).await;
    // Name is stored trimmed.
    assert_eq!(brand["name"], "Honda");
    assert_eq!(brand["is_active"], true);

    let list = body_json(get(app, "/api/v1/brands").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_brand_name_is_case_insensitive_conflict(pool: PgPool) {
    let app = build_test_app(pool);
    let token = admin_token();

    let first = post_json(
        app.clone(),
        "/api/v1/brands",
        Some(&token),
        json!({"name": "toyota"}),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(
        app,
        "/api/v1/brands",
        Some(&token),
        json!({"name": "Toyota"}),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_brand_name_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/brands",
        Some(&admin_token()),
        json!({"name": "   "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_model_under_brand(pool: PgPool) {
    let (brand_id, _) = seed_taxonomy(&pool, "Toyota", "Corolla").await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/brands/{brand_id}/models"),
        Some(&admin_token()),
        json!({"name": "Camry"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let model = body_json(response).await;
    assert_eq!(model["name"], "Camry");
    assert_eq!(model["brand_id"], brand_id);

    let list = body_json(get(app, &format!("/api/v1/brands/{brand_id}/models")).await).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn model_for_missing_brand_is_404_and_creates_nothing(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/v1/brands/9999/models",
        Some(&admin_token()),
        json!({"name": "Ghost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM car_models")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_model_name_within_brand_conflicts(pool: PgPool) {
    let (brand_id, _) = seed_taxonomy(&pool, "Toyota", "Corolla").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/brands/{brand_id}/models"),
        Some(&admin_token()),
        json!({"name": "COROLLA"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_model_name_allowed_under_other_brand(pool: PgPool) {
    let (_, _) = seed_taxonomy(&pool, "Toyota", "Corolla").await;
    let (honda_id, _) = seed_taxonomy(&pool, "Honda", "Civic").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        &format!("/api/v1/brands/{honda_id}/models"),
        Some(&admin_token()),
        json!({"name": "Corolla"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_models_for_brand_without_models_is_empty(pool: PgPool) {
    let brand = carlot_db::repositories::BrandRepo::create(&pool, "Suzuki")
        .await
        .unwrap();
    let app = build_test_app(pool);

    let response = get(app, &format!("/api/v1/brands/{}/models", brand.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}
