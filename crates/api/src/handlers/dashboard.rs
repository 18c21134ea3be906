//! Admin dashboard rollup.

use axum::extract::State;
use axum::Json;
use carlot_db::models::dashboard::DashboardStats;
use carlot_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/cars/dashboard-stats
///
/// Rollup counts for the admin dashboard. Read-only, one query.
pub async fn stats(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(stats))
}
