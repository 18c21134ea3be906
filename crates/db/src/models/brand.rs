//! Brand entity model and DTOs.

use carlot_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `brands` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub is_active: bool,
}

/// DTO for creating a new brand.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBrand {
    pub name: String,
}
