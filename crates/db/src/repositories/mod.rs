//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Compound gallery mutations
//! run inside a single transaction that first locks the owning car row,
//! giving per-car write serialization.

pub mod brand_repo;
pub mod car_image_repo;
pub mod car_model_repo;
pub mod car_repo;
pub mod dashboard_repo;
pub mod test_drive_repo;

pub use brand_repo::BrandRepo;
pub use car_image_repo::CarImageRepo;
pub use car_model_repo::CarModelRepo;
pub use car_repo::CarRepo;
pub use dashboard_repo::DashboardRepo;
pub use test_drive_repo::TestDriveRepo;
