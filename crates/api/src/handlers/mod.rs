pub mod brand;
pub mod car;
pub mod car_image;
pub mod dashboard;
pub mod test_drive;
