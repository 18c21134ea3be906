//! Car entity model and DTOs.

use carlot_core::catalog::CarFields;
use carlot_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A car listing hydrated with its brand and model names. All read
/// paths return this shape; the names are resolved by join and never
/// stored redundantly.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CarDetail {
    pub id: DbId,
    pub brand_id: DbId,
    pub model_id: DbId,
    pub brand_name: String,
    pub model_name: String,
    pub body_type: String,
    pub variant: Option<String>,
    pub year: i32,
    pub registration_year: i32,
    pub fuel_type: String,
    pub transmission: String,
    /// Whole currency units.
    pub price: i64,
    pub kms_driven: i32,
    pub ownership_count: i32,
    pub registration_code: String,
    pub engine_cc: i32,
    pub insurance_expiry: Option<NaiveDate>,
    pub has_spare_key: bool,
    pub description: Option<String>,
    /// Denormalized cache of the primary gallery image locator. Written
    /// only by gallery operations.
    pub primary_image_locator: Option<String>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a car and for replace-all updates. Every mutable
/// field is required except the genuinely optional ones; `UpdateCar`
/// replaces all of them, matching the admin edit form.
#[derive(Debug, Clone, Deserialize)]
pub struct CarInput {
    pub brand_id: DbId,
    pub model_id: DbId,
    pub body_type: String,
    pub variant: Option<String>,
    pub year: i32,
    pub registration_year: i32,
    pub fuel_type: String,
    pub transmission: String,
    pub price: i64,
    pub kms_driven: i32,
    pub ownership_count: i32,
    pub registration_code: String,
    pub engine_cc: i32,
    pub insurance_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub has_spare_key: bool,
    pub description: Option<String>,
    /// Defaults to `true` on creation.
    pub is_active: Option<bool>,
}

impl CarInput {
    /// Project the validatable fields for `carlot_core::catalog`.
    pub fn fields(&self) -> CarFields {
        CarFields {
            body_type: self.body_type.clone(),
            year: self.year,
            registration_year: self.registration_year,
            fuel_type: self.fuel_type.clone(),
            transmission: self.transmission.clone(),
            price: self.price,
            kms_driven: self.kms_driven,
            ownership_count: self.ownership_count,
            registration_code: self.registration_code.clone(),
            engine_cc: self.engine_cc,
        }
    }
}
