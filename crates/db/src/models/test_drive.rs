//! Test-drive request entity model, DTOs, and read projections.

use carlot_core::types::{DbId, Timestamp, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `test_drive_requests` table. `status` is kept as the
/// stored string here; state transitions go through
/// [`carlot_core::test_drive::TestDriveStatus`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TestDriveRequest {
    pub id: DbId,
    pub user_id: UserId,
    pub car_id: DbId,
    pub preferred_date: NaiveDate,
    pub time_slot: String,
    pub status: String,
    pub scheduled_date: Option<NaiveDate>,
    pub admin_comment: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for a buyer's test-drive request. The user id comes from the
/// authenticated identity, never from the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestDrive {
    pub car_id: DbId,
    pub preferred_date: NaiveDate,
    pub time_slot: String,
}

/// DTO for an admin approval.
#[derive(Debug, Clone, Deserialize)]
pub struct ApproveTestDrive {
    pub scheduled_date: NaiveDate,
    pub admin_comment: Option<String>,
}

/// DTO for an admin rejection. The comment is required; blankness is
/// rejected in the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct RejectTestDrive {
    pub admin_comment: String,
}

/// Read projection joining car summary fields for buyer and admin
/// listings. Soft-deleted cars still appear here so history stays
/// complete; `car_is_deleted` lets the UI flag removed listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TestDriveWithCar {
    pub id: DbId,
    pub user_id: UserId,
    pub status: String,
    pub preferred_date: NaiveDate,
    pub time_slot: String,
    pub scheduled_date: Option<NaiveDate>,
    pub admin_comment: Option<String>,
    pub created_at: Timestamp,
    pub car_id: DbId,
    pub car_year: i32,
    pub car_variant: Option<String>,
    pub car_price: i64,
    pub car_is_deleted: bool,
    pub brand_name: String,
    pub model_name: String,
    pub image_locator: Option<String>,
}
