//! Handlers for the `/brands` resource.
//!
//! Brands and their models form the catalog taxonomy. Both levels are
//! append-only: rows can be deactivated in the database but no delete
//! endpoint is exposed. Name uniqueness is case-insensitive, enforced
//! both by an up-front lookup and by the `uq_` unique indexes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use carlot_core::error::CoreError;
use carlot_core::taxonomy::normalize_name;
use carlot_core::types::DbId;
use carlot_db::models::brand::{Brand, CreateBrand};
use carlot_db::models::car_model::{CarModel, CreateCarModel};
use carlot_db::repositories::{BrandRepo, CarModelRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/brands
///
/// List active brands ordered by name. Anonymous.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Brand>>> {
    let brands = BrandRepo::list_active(&state.pool).await?;
    Ok(Json(brands))
}

/// POST /api/v1/brands
///
/// Create a brand. Returns 409 if a brand with the same name already
/// exists, compared case-insensitively.
pub async fn create(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBrand>,
) -> AppResult<(StatusCode, Json<Brand>)> {
    let name = normalize_name(&input.name)?;

    if BrandRepo::find_by_name(&state.pool, &name).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Brand '{name}' already exists"
        ))));
    }

    let brand = BrandRepo::create(&state.pool, &name).await?;
    tracing::info!(brand_id = brand.id, admin = %user.user_id, "brand created");
    Ok((StatusCode::CREATED, Json(brand)))
}

/// GET /api/v1/brands/{brand_id}/models
///
/// List active models for a brand ordered by name. An existing brand
/// with no models yields an empty list, not an error.
pub async fn list_models(
    State(state): State<AppState>,
    Path(brand_id): Path<DbId>,
) -> AppResult<Json<Vec<CarModel>>> {
    BrandRepo::find_by_id(&state.pool, brand_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Brand",
            id: brand_id,
        }))?;

    let models = CarModelRepo::list_active_by_brand(&state.pool, brand_id).await?;
    Ok(Json(models))
}

/// POST /api/v1/brands/{brand_id}/models
///
/// Create a model under a brand. 404 if the brand does not exist, 409
/// if the (brand, name) pair already exists case-insensitively.
pub async fn create_model(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(brand_id): Path<DbId>,
    Json(input): Json<CreateCarModel>,
) -> AppResult<(StatusCode, Json<CarModel>)> {
    BrandRepo::find_by_id(&state.pool, brand_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Brand",
            id: brand_id,
        }))?;

    let name = normalize_name(&input.name)?;

    if CarModelRepo::find_by_brand_and_name(&state.pool, brand_id, &name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Model '{name}' already exists for this brand"
        ))));
    }

    let model = CarModelRepo::create(&state.pool, brand_id, &name).await?;
    tracing::info!(model_id = model.id, brand_id, admin = %user.user_id, "model created");
    Ok((StatusCode::CREATED, Json(model)))
}
