//! Handlers for gallery images.
//!
//! Image rows are nested under cars for upload/list/reorder and
//! addressed directly for delete and set-primary:
//! `/cars/{id}/images[...]` and `/cars/images/{image_id}[...]`.
//!
//! All write paths funnel through `CarImageRepo`, which serializes
//! writers per car and keeps the two gallery invariants (exactly one
//! primary, contiguous 1..N sort order) after every mutation.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use carlot_core::error::CoreError;
use carlot_core::roles::ROLE_ADMIN;
use carlot_core::types::DbId;
use carlot_db::models::car_image::{CarImage, ReorderImages};
use carlot_db::repositories::{CarImageRepo, CarRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::car::store_and_append;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/cars/{id}/images
///
/// Accepts a multipart form with one or more `images` file fields.
/// Each image is stored and attached as its own atomic step; a failure
/// on item N leaves items 1..N-1 committed with the invariants intact.
pub async fn upload(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(car_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Vec<CarImage>>)> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "images" || name == "image" {
            let filename = field.file_name().unwrap_or("upload.jpg").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            files.push((filename, data.to_vec()));
        }
    }

    if files.is_empty() {
        return Err(AppError::BadRequest(
            "No image files received in multipart upload".into(),
        ));
    }

    let mut created = Vec::with_capacity(files.len());
    for (filename, bytes) in &files {
        created.push(store_and_append(&state, car_id, filename, bytes).await?);
    }

    tracing::info!(car_id, count = created.len(), admin = %user.user_id, "images uploaded");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/cars/{id}/images
///
/// List a car's gallery in display order. Anonymous callers only see
/// galleries of publicly visible cars; admins see any non-deleted car.
pub async fn list(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(car_id): Path<DbId>,
) -> AppResult<Json<Vec<CarImage>>> {
    let visible = if user.as_ref().is_some_and(|u| u.role == ROLE_ADMIN) {
        CarRepo::find_admin_by_id(&state.pool, car_id).await?.is_some()
    } else {
        CarRepo::find_public_by_id(&state.pool, car_id).await?.is_some()
    };

    if !visible {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Car",
            id: car_id,
        }));
    }

    let images = CarImageRepo::list_by_car(&state.pool, car_id).await?;
    Ok(Json(images))
}

/// PUT /api/v1/cars/{id}/images/reorder
///
/// Apply a new display order. Unknown ids in the request are ignored;
/// images the request omits keep their relative order after the listed
/// ones. The result is always a contiguous 1..N numbering.
pub async fn reorder(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(car_id): Path<DbId>,
    Json(input): Json<ReorderImages>,
) -> AppResult<Json<Vec<CarImage>>> {
    let images = CarImageRepo::reorder(&state.pool, car_id, &input.ordered_image_ids)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gallery",
            id: car_id,
        }))?;
    tracing::info!(car_id, admin = %user.user_id, "gallery reordered");
    Ok(Json(images))
}

/// DELETE /api/v1/cars/images/{image_id}
///
/// Remove one image. If it was the primary, the lowest-ordered
/// survivor is promoted; sort order is re-compacted. The blob is
/// removed best-effort after the row commit.
pub async fn delete(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(image_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let locator = CarImageRepo::delete(&state.pool, image_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CarImage",
            id: image_id,
        }))?;

    if let Err(err) = state.blob.delete(&locator).await {
        tracing::warn!(locator, error = %err, "failed to delete image blob");
    }

    tracing::info!(image_id, admin = %user.user_id, "image deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/cars/images/{image_id}/primary
///
/// Make this image the car's primary, demoting the previous one.
pub async fn set_primary(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(image_id): Path<DbId>,
) -> AppResult<Json<CarImage>> {
    let image = CarImageRepo::set_primary(&state.pool, image_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CarImage",
            id: image_id,
        }))?;
    tracing::info!(image_id, car_id = image.car_id, admin = %user.user_id, "primary image changed");
    Ok(Json(image))
}
