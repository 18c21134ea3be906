//! Handlers for the `/cars` resource.
//!
//! Cars live through a lifecycle of create → update/toggle → soft
//! delete. Public reads see only active, non-deleted listings; admin
//! reads see everything not deleted. The `primary_image_locator` field
//! on the returned shape is owned by the gallery: car handlers never
//! write it, they only read it back after gallery operations run.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use carlot_core::catalog::validate_car_fields;
use carlot_core::error::CoreError;
use carlot_core::types::DbId;
use carlot_db::models::car::{CarDetail, CarInput};
use carlot_db::repositories::{CarImageRepo, CarModelRepo, CarRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Supported image file extensions for gallery uploads.
pub(crate) const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Check that the referenced model exists and belongs to the referenced
/// brand. A mismatch is a validation error, not a 404: the URL resolved
/// fine, the body is what is wrong.
async fn validate_taxonomy(
    pool: &sqlx::PgPool,
    input: &CarInput,
) -> AppResult<()> {
    let model = CarModelRepo::find_by_id(pool, input.model_id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!("Model {} does not exist", input.model_id))
        })?;

    if model.brand_id != input.brand_id {
        return Err(AppError::BadRequest(format!(
            "Model {} does not belong to brand {}",
            input.model_id, input.brand_id
        )));
    }
    Ok(())
}

pub(crate) fn validate_image_extension(filename: &str) -> AppResult<String> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    if !SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported image format '.{ext}'. Supported: .jpg, .jpeg, .png, .webp"
        )));
    }
    Ok(ext)
}

/// Store one image blob and attach it to a car's gallery as a single
/// atomic step. If the row insert fails after the blob was written, the
/// blob is removed best-effort; a leaked file is only logged.
pub(crate) async fn store_and_append(
    state: &AppState,
    car_id: DbId,
    filename: &str,
    bytes: &[u8],
) -> AppResult<carlot_db::models::car_image::CarImage> {
    validate_image_extension(filename)?;
    let locator = state.blob.store(bytes, filename).await?;

    let appended = match CarImageRepo::append(&state.pool, car_id, &locator).await {
        Ok(appended) => appended,
        Err(err) => {
            cleanup_blob(state, &locator).await;
            return Err(err.into());
        }
    };

    match appended {
        Some(image) => Ok(image),
        None => {
            cleanup_blob(state, &locator).await;
            Err(AppError::Core(CoreError::NotFound {
                entity: "Car",
                id: car_id,
            }))
        }
    }
}

/// Best-effort blob removal after a failed insert.
async fn cleanup_blob(state: &AppState, locator: &str) {
    if let Err(err) = state.blob.delete(locator).await {
        tracing::warn!(locator, error = %err, "failed to clean up orphaned image blob");
    }
}

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

/// GET /api/v1/cars
///
/// Public listing: active, non-deleted cars, newest first.
pub async fn list_public(State(state): State<AppState>) -> AppResult<Json<Vec<CarDetail>>> {
    let cars = CarRepo::list_public(&state.pool).await?;
    Ok(Json(cars))
}

/// GET /api/v1/cars/{id}
///
/// Public detail. Deactivated and soft-deleted cars are 404 here.
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CarDetail>> {
    let car = CarRepo::find_public_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Car", id }))?;
    Ok(Json(car))
}

// ---------------------------------------------------------------------------
// Admin reads
// ---------------------------------------------------------------------------

/// GET /api/v1/cars/admin
///
/// Admin listing: all non-deleted cars, including deactivated ones.
pub async fn list_admin(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CarDetail>>> {
    let cars = CarRepo::list_admin(&state.pool).await?;
    Ok(Json(cars))
}

/// GET /api/v1/cars/admin/{id}
pub async fn get_admin(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CarDetail>> {
    let car = CarRepo::find_admin_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Car", id }))?;
    Ok(Json(car))
}

// ---------------------------------------------------------------------------
// Admin writes
// ---------------------------------------------------------------------------

/// POST /api/v1/cars
///
/// Accepts a multipart form with a required `car` field holding the
/// listing JSON and at least one `images` file field (a listing without
/// a thumbnail is rejected). The car row is created first; each image
/// is then stored and attached as its own atomic step, so a failure on
/// image N leaves the car and images 1..N-1 committed with the gallery
/// invariants intact.
pub async fn create(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<CarDetail>)> {
    let mut car_json: Option<String> = None;
    let mut images: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "car" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                car_json = Some(text);
            }
            "images" | "image" => {
                let filename = field.file_name().unwrap_or("upload.jpg").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                images.push((filename, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    let car_json =
        car_json.ok_or_else(|| AppError::BadRequest("Missing required 'car' field".into()))?;
    let input: CarInput = serde_json::from_str(&car_json)
        .map_err(|e| AppError::BadRequest(format!("Invalid car payload: {e}")))?;

    if images.is_empty() {
        return Err(AppError::BadRequest(
            "A car listing requires at least one image".into(),
        ));
    }

    validate_car_fields(&input.fields())?;
    validate_taxonomy(&state.pool, &input).await?;
    for (filename, _) in &images {
        validate_image_extension(filename)?;
    }

    let car = CarRepo::create(&state.pool, &input).await?;
    tracing::info!(car_id = car.id, admin = %user.user_id, "car created");

    for (filename, bytes) in &images {
        store_and_append(&state, car.id, filename, bytes).await?;
    }

    // Re-read so the response carries the primary locator elected by
    // the gallery appends.
    let car = CarRepo::find_admin_by_id(&state.pool, car.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Car",
            id: car.id,
        }))?;

    Ok((StatusCode::CREATED, Json(car)))
}

/// PUT /api/v1/cars/{id}
///
/// Replace-all update of the mutable listing fields. The primary image
/// locator is not part of this payload; thumbnail changes go through
/// the gallery endpoints.
pub async fn update(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CarInput>,
) -> AppResult<Json<CarDetail>> {
    validate_car_fields(&input.fields())?;
    validate_taxonomy(&state.pool, &input).await?;

    let car = CarRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Car", id }))?;
    tracing::info!(car_id = id, admin = %user.user_id, "car updated");
    Ok(Json(car))
}

/// DELETE /api/v1/cars/{id}
///
/// Soft delete. The row and its gallery rows survive so existing
/// test-drive history stays joinable; only visibility changes.
pub async fn delete(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CarRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Car", id }));
    }
    tracing::info!(car_id = id, admin = %user.user_id, "car soft-deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/cars/{id}/toggle-active
///
/// Flip listing visibility without touching any other field.
pub async fn toggle_active(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CarDetail>> {
    let car = CarRepo::toggle_active(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Car", id }))?;
    tracing::info!(car_id = id, is_active = car.is_active, admin = %user.user_id, "car visibility toggled");
    Ok(Json(car))
}
