//! Car model (taxonomy leaf) entity and DTOs.

use carlot_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `car_models` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CarModel {
    pub id: DbId,
    pub brand_id: DbId,
    pub name: String,
    pub is_active: bool,
}

/// DTO for creating a model under a brand. The owning brand id comes
/// from the URL path, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCarModel {
    pub name: String,
}
