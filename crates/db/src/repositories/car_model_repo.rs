//! Repository for the `car_models` table.

use carlot_core::types::DbId;
use sqlx::PgPool;

use crate::models::car_model::CarModel;

const COLUMNS: &str = "id, brand_id, name, is_active";

/// Provides operations for models within a brand.
pub struct CarModelRepo;

impl CarModelRepo {
    /// Insert a new model under `brand_id`. The caller has verified the
    /// brand exists; `uq_car_models_brand_name` backstops duplicates.
    pub async fn create(
        pool: &PgPool,
        brand_id: DbId,
        name: &str,
    ) -> Result<CarModel, sqlx::Error> {
        let query = format!(
            "INSERT INTO car_models (brand_id, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CarModel>(&query)
            .bind(brand_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CarModel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM car_models WHERE id = $1");
        sqlx::query_as::<_, CarModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive (brand, name) lookup, matching the unique index.
    pub async fn find_by_brand_and_name(
        pool: &PgPool,
        brand_id: DbId,
        name: &str,
    ) -> Result<Option<CarModel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM car_models WHERE brand_id = $1 AND LOWER(name) = LOWER($2)"
        );
        sqlx::query_as::<_, CarModel>(&query)
            .bind(brand_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List active models of a brand ordered by name. Empty when the
    /// brand has no models; the caller decides whether the brand itself
    /// must exist.
    pub async fn list_active_by_brand(
        pool: &PgPool,
        brand_id: DbId,
    ) -> Result<Vec<CarModel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM car_models WHERE brand_id = $1 AND is_active ORDER BY name"
        );
        sqlx::query_as::<_, CarModel>(&query)
            .bind(brand_id)
            .fetch_all(pool)
            .await
    }
}
