//! Repository for the `test_drive_requests` table.
//!
//! State transitions are guarded twice: the handler consults the
//! [`TestDriveStatus`] state machine, and the UPDATE carries a
//! `WHERE status = $expected` clause so a concurrent transition loses
//! cleanly instead of overwriting.

use carlot_core::test_drive::TestDriveStatus;
use carlot_core::types::DbId;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::test_drive::{CreateTestDrive, TestDriveRequest, TestDriveWithCar};

const COLUMNS: &str = "id, user_id, car_id, preferred_date, time_slot, status, \
    scheduled_date, admin_comment, created_at";

/// Joined projection shared by the buyer and admin listings.
const WITH_CAR_COLUMNS: &str = "t.id, t.user_id, t.status, t.preferred_date, \
    t.time_slot, t.scheduled_date, t.admin_comment, t.created_at, \
    c.id AS car_id, c.year AS car_year, c.variant AS car_variant, \
    c.price AS car_price, c.is_deleted AS car_is_deleted, \
    b.name AS brand_name, m.name AS model_name, \
    c.primary_image_locator AS image_locator";

const WITH_CAR_FROM: &str = "FROM test_drive_requests t \
    JOIN cars c ON c.id = t.car_id \
    JOIN brands b ON b.id = c.brand_id \
    JOIN car_models m ON m.id = c.model_id";

/// Provides workflow operations for test-drive requests.
pub struct TestDriveRepo;

impl TestDriveRepo {
    /// Insert a new pending request. The partial unique index
    /// `uq_test_drive_requests_pending` rejects a concurrent duplicate
    /// for the same (user, car) pair.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        input: &CreateTestDrive,
    ) -> Result<TestDriveRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO test_drive_requests (user_id, car_id, preferred_date, time_slot)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TestDriveRequest>(&query)
            .bind(user_id)
            .bind(input.car_id)
            .bind(input.preferred_date)
            .bind(input.time_slot.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TestDriveRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM test_drive_requests WHERE id = $1");
        sqlx::query_as::<_, TestDriveRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the (user, car) pair already has a pending request.
    pub async fn has_pending(
        pool: &PgPool,
        user_id: &str,
        car_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM test_drive_requests
             WHERE user_id = $1 AND car_id = $2 AND status = 'Pending')",
        )
        .bind(user_id)
        .bind(car_id)
        .fetch_one(pool)
        .await
    }

    /// Apply a guarded status transition. Returns `None` when the row is
    /// no longer in `from` (a concurrent transition won, or the id is
    /// gone). `scheduled_date` and `admin_comment` are only overwritten
    /// when supplied.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: TestDriveStatus,
        to: TestDriveStatus,
        scheduled_date: Option<NaiveDate>,
        admin_comment: Option<&str>,
    ) -> Result<Option<TestDriveRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE test_drive_requests SET
                status = $3,
                scheduled_date = COALESCE($4, scheduled_date),
                admin_comment = COALESCE($5, admin_comment)
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TestDriveRequest>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(scheduled_date)
            .bind(admin_comment)
            .fetch_optional(pool)
            .await
    }

    /// A buyer's own requests with car summaries, newest first.
    /// Soft-deleted cars stay joinable for history.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<TestDriveWithCar>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_CAR_COLUMNS} {WITH_CAR_FROM}
             WHERE t.user_id = $1
             ORDER BY t.created_at DESC"
        );
        sqlx::query_as::<_, TestDriveWithCar>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All requests, optionally filtered by status, newest first.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<TestDriveStatus>,
    ) -> Result<Vec<TestDriveWithCar>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_CAR_COLUMNS} {WITH_CAR_FROM}
             WHERE $1::text IS NULL OR t.status = $1
             ORDER BY t.created_at DESC"
        );
        sqlx::query_as::<_, TestDriveWithCar>(&query)
            .bind(status.map(TestDriveStatus::as_str))
            .fetch_all(pool)
            .await
    }
}
