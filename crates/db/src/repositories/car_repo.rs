//! Repository for the `cars` table.
//!
//! All reads return [`CarDetail`] with brand/model names resolved by
//! join. `primary_image_locator` is never written here; gallery
//! operations own that column (see `car_image_repo`).

use carlot_core::types::DbId;
use sqlx::PgPool;

use crate::models::car::{CarDetail, CarInput};

/// Joined column list shared across read queries.
const DETAIL_COLUMNS: &str = "c.id, c.brand_id, c.model_id, \
    b.name AS brand_name, m.name AS model_name, \
    c.body_type, c.variant, c.year, c.registration_year, c.fuel_type, \
    c.transmission, c.price, c.kms_driven, c.ownership_count, \
    c.registration_code, c.engine_cc, c.insurance_expiry, c.has_spare_key, \
    c.description, c.primary_image_locator, c.is_active, c.is_deleted, \
    c.created_at";

const DETAIL_FROM: &str = "FROM cars c \
    JOIN brands b ON b.id = c.brand_id \
    JOIN car_models m ON m.id = c.model_id";

/// Provides catalog lifecycle operations for cars.
pub struct CarRepo;

impl CarRepo {
    /// Insert a new car with `is_deleted = false`, returning the
    /// hydrated row. The caller has already validated fields and
    /// taxonomy references.
    pub async fn create(pool: &PgPool, input: &CarInput) -> Result<CarDetail, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO cars
                (brand_id, model_id, body_type, variant, year, registration_year,
                 fuel_type, transmission, price, kms_driven, ownership_count,
                 registration_code, engine_cc, insurance_expiry, has_spare_key,
                 description, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                     $15, $16, COALESCE($17, TRUE))
             RETURNING id",
        )
        .bind(input.brand_id)
        .bind(input.model_id)
        .bind(&input.body_type)
        .bind(&input.variant)
        .bind(input.year)
        .bind(input.registration_year)
        .bind(&input.fuel_type)
        .bind(&input.transmission)
        .bind(input.price)
        .bind(input.kms_driven)
        .bind(input.ownership_count)
        .bind(&input.registration_code)
        .bind(input.engine_cc)
        .bind(input.insurance_expiry)
        .bind(input.has_spare_key)
        .bind(&input.description)
        .bind(input.is_active)
        .fetch_one(pool)
        .await?;

        Self::fetch_detail(pool, id).await
    }

    /// Find a car visible to the public: active and not deleted.
    pub async fn find_public_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CarDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE c.id = $1 AND c.is_active AND NOT c.is_deleted"
        );
        sqlx::query_as::<_, CarDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public listing: active, non-deleted, newest first.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<CarDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE c.is_active AND NOT c.is_deleted
             ORDER BY c.created_at DESC"
        );
        sqlx::query_as::<_, CarDetail>(&query).fetch_all(pool).await
    }

    /// Find any non-deleted car regardless of activation.
    pub async fn find_admin_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CarDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM} WHERE c.id = $1 AND NOT c.is_deleted"
        );
        sqlx::query_as::<_, CarDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing: all non-deleted cars, newest first.
    pub async fn list_admin(pool: &PgPool) -> Result<Vec<CarDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE NOT c.is_deleted
             ORDER BY c.created_at DESC"
        );
        sqlx::query_as::<_, CarDetail>(&query).fetch_all(pool).await
    }

    /// Replace all mutable fields of a non-deleted car. Returns `None`
    /// if the id does not resolve to a non-deleted row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CarInput,
    ) -> Result<Option<CarDetail>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE cars SET
                brand_id = $2, model_id = $3, body_type = $4, variant = $5,
                year = $6, registration_year = $7, fuel_type = $8,
                transmission = $9, price = $10, kms_driven = $11,
                ownership_count = $12, registration_code = $13, engine_cc = $14,
                insurance_expiry = $15, has_spare_key = $16, description = $17,
                is_active = COALESCE($18, is_active)
             WHERE id = $1 AND NOT is_deleted
             RETURNING id",
        )
        .bind(id)
        .bind(input.brand_id)
        .bind(input.model_id)
        .bind(&input.body_type)
        .bind(&input.variant)
        .bind(input.year)
        .bind(input.registration_year)
        .bind(&input.fuel_type)
        .bind(&input.transmission)
        .bind(input.price)
        .bind(input.kms_driven)
        .bind(input.ownership_count)
        .bind(&input.registration_code)
        .bind(input.engine_cc)
        .bind(input.insurance_expiry)
        .bind(input.has_spare_key)
        .bind(&input.description)
        .bind(input.is_active)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Ok(Some(Self::fetch_detail(pool, id).await?)),
            None => Ok(None),
        }
    }

    /// Soft-delete a car. Returns `true` if a row was marked deleted;
    /// `false` when the id is absent or already deleted. Image and
    /// test-drive rows are deliberately left untouched.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE cars SET is_deleted = TRUE WHERE id = $1 AND NOT is_deleted")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the activation flag of a non-deleted car.
    pub async fn toggle_active(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CarDetail>, sqlx::Error> {
        let toggled: Option<DbId> = sqlx::query_scalar(
            "UPDATE cars SET is_active = NOT is_active
             WHERE id = $1 AND NOT is_deleted
             RETURNING id",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        match toggled {
            Some(id) => Ok(Some(Self::fetch_detail(pool, id).await?)),
            None => Ok(None),
        }
    }

    /// Fetch the hydrated row by id with no visibility filter. Used
    /// internally after writes that already established existence.
    async fn fetch_detail(pool: &PgPool, id: DbId) -> Result<CarDetail, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_FROM} WHERE c.id = $1");
        sqlx::query_as::<_, CarDetail>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
