//! Gallery image entity model and DTOs.

use carlot_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `car_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CarImage {
    pub id: DbId,
    pub car_id: DbId,
    pub image_locator: String,
    pub is_primary: bool,
    /// 1-based, contiguous per car.
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for the reorder operation: image ids in the desired display order.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderImages {
    pub ordered_image_ids: Vec<DbId>,
}
