//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` DTO for inserts (and replace-all updates where the
//!   operation is defined that way)

pub mod brand;
pub mod car;
pub mod car_image;
pub mod car_model;
pub mod dashboard;
pub mod test_drive;
