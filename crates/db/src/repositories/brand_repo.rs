//! Repository for the `brands` table.

use carlot_core::types::DbId;
use sqlx::PgPool;

use crate::models::brand::Brand;

const COLUMNS: &str = "id, name, is_active";

/// Provides operations for brands. Brands are append-only plus
/// deactivation; there is no delete.
pub struct BrandRepo;

impl BrandRepo {
    /// Insert a new brand, returning the created row. The caller passes
    /// an already-normalized name; the `uq_brands_name` index is the
    /// backstop against concurrent duplicates.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Brand, sqlx::Error> {
        let query = format!("INSERT INTO brands (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Brand>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE id = $1");
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive name lookup, matching the unique index.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE LOWER(name) = LOWER($1)");
        sqlx::query_as::<_, Brand>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List active brands ordered by name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE is_active ORDER BY name");
        sqlx::query_as::<_, Brand>(&query).fetch_all(pool).await
    }
}
