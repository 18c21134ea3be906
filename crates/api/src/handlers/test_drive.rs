//! Handlers for the test-drive request workflow.
//!
//! Buyer-facing routes live under `/testdrive`; the admin review queue
//! lives under `/admin/testdrives`. Requests move through a closed
//! state machine (Pending → Approved → Completed, Pending → Rejected)
//! guarded twice: the handler checks the in-memory transition, and the
//! repository's UPDATE carries a `status = expected` predicate so a
//! concurrent admin losing the race gets a conflict instead of a
//! silent overwrite.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use carlot_core::error::CoreError;
use carlot_core::test_drive::{
    validate_admin_comment, validate_rejection_comment, validate_time_slot, TestDriveStatus,
};
use carlot_core::types::DbId;
use carlot_db::models::test_drive::{
    ApproveTestDrive, CreateTestDrive, RejectTestDrive, TestDriveRequest, TestDriveWithCar,
};
use carlot_db::repositories::{CarRepo, TestDriveRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

/// Look up a request and parse its stored status, or 404.
async fn current_status(pool: &sqlx::PgPool, id: DbId) -> AppResult<TestDriveStatus> {
    let request = TestDriveRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TestDriveRequest",
            id,
        }))?;
    TestDriveStatus::from_str(&request.status).map_err(|e| AppError::Internal(e.to_string()))
}

/// Shared tail of the three admin transitions: apply the guarded
/// UPDATE and map a lost race to a conflict.
async fn apply_transition(
    pool: &sqlx::PgPool,
    id: DbId,
    from: TestDriveStatus,
    to: TestDriveStatus,
    scheduled_date: Option<chrono::NaiveDate>,
    admin_comment: Option<&str>,
) -> AppResult<TestDriveRequest> {
    TestDriveRepo::transition(pool, id, from, to, scheduled_date, admin_comment)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Test drive request is no longer {from}"
            )))
        })
}

// ---------------------------------------------------------------------------
// Buyer routes
// ---------------------------------------------------------------------------

/// POST /api/v1/testdrive
///
/// Create a pending request for a publicly visible car. A buyer may
/// hold at most one pending request per car; a duplicate is a 409. The
/// partial unique index backs this up under concurrent submissions.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateTestDrive>,
) -> AppResult<(StatusCode, Json<TestDriveRequest>)> {
    validate_time_slot(&input.time_slot)?;

    // A referential miss is the caller's payload being wrong, not a
    // missing URL resource.
    CarRepo::find_public_by_id(&state.pool, input.car_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Car {} does not exist or is not available",
                input.car_id
            )))
        })?;

    if TestDriveRepo::has_pending(&state.pool, &user.user_id, input.car_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "You already have a pending test drive request for this car".into(),
        )));
    }

    let request = TestDriveRepo::create(&state.pool, &user.user_id, &input).await?;
    tracing::info!(request_id = request.id, car_id = input.car_id, user = %user.user_id, "test drive requested");
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/testdrive/my
///
/// The caller's request history with car summaries, newest first.
/// Soft-deleted cars still appear, flagged via `car_is_deleted`.
pub async fn list_mine(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TestDriveWithCar>>> {
    let requests = TestDriveRepo::list_for_user(&state.pool, &user.user_id).await?;
    Ok(Json(requests))
}

// ---------------------------------------------------------------------------
// Admin routes
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/testdrives?status=Pending
///
/// The full review queue, optionally filtered by status.
pub async fn list_all(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<TestDriveWithCar>>> {
    let status = params
        .status
        .as_deref()
        .map(TestDriveStatus::from_str)
        .transpose()?;
    let requests = TestDriveRepo::list_all(&state.pool, status).await?;
    Ok(Json(requests))
}

/// PUT /api/v1/admin/testdrives/{id}/approve
///
/// Pending → Approved with a confirmed date and optional comment.
pub async fn approve(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ApproveTestDrive>,
) -> AppResult<Json<TestDriveRequest>> {
    if let Some(comment) = &input.admin_comment {
        validate_admin_comment(comment)?;
    }

    let current = current_status(&state.pool, id).await?;
    let next = current.approve()?;

    let request = apply_transition(
        &state.pool,
        id,
        current,
        next,
        Some(input.scheduled_date),
        input.admin_comment.as_deref(),
    )
    .await?;
    tracing::info!(request_id = id, admin = %user.user_id, "test drive approved");
    Ok(Json(request))
}

/// PUT /api/v1/admin/testdrives/{id}/reject
///
/// Pending → Rejected. A comment is required so the buyer learns why;
/// rejection also frees the buyer's pending slot for this car.
pub async fn reject(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectTestDrive>,
) -> AppResult<Json<TestDriveRequest>> {
    validate_rejection_comment(&input.admin_comment)?;

    let current = current_status(&state.pool, id).await?;
    let next = current.reject()?;

    let request = apply_transition(
        &state.pool,
        id,
        current,
        next,
        None,
        Some(input.admin_comment.trim()),
    )
    .await?;
    tracing::info!(request_id = id, admin = %user.user_id, "test drive rejected");
    Ok(Json(request))
}

/// PUT /api/v1/admin/testdrives/{id}/complete
///
/// Approved → Completed. Terminal.
pub async fn complete(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TestDriveRequest>> {
    let current = current_status(&state.pool, id).await?;
    let next = current.complete()?;

    let request = apply_transition(&state.pool, id, current, next, None, None).await?;
    tracing::info!(request_id = id, admin = %user.user_id, "test drive completed");
    Ok(Json(request))
}
