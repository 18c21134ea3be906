//! Read-only rollups for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::DashboardStats;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Counts composed from the catalog, taxonomy, and workflow tables.
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM cars WHERE NOT is_deleted) AS total_cars,
                (SELECT COUNT(*) FROM cars WHERE NOT is_deleted AND is_active) AS active_cars,
                (SELECT COUNT(*) FROM cars WHERE NOT is_deleted AND NOT is_active) AS inactive_cars,
                (SELECT COUNT(*) FROM brands WHERE is_active) AS total_brands,
                (SELECT COUNT(*) FROM car_models WHERE is_active) AS total_models,
                (SELECT COUNT(*) FROM test_drive_requests WHERE status = 'Pending') AS pending_test_drives",
        )
        .fetch_one(pool)
        .await
    }
}
