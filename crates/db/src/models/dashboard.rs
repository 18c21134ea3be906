//! Admin dashboard rollup counts.

use serde::Serialize;
use sqlx::FromRow;

/// Read-only counts composed from the catalog, taxonomy, and workflow
/// tables. Soft-deleted cars are excluded everywhere.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardStats {
    pub total_cars: i64,
    pub active_cars: i64,
    pub inactive_cars: i64,
    pub total_brands: i64,
    pub total_models: i64,
    pub pending_test_drives: i64,
}
