//! Shared fixtures for repository integration tests.
#![allow(dead_code)]

use carlot_db::models::car::{CarDetail, CarInput};
use carlot_db::repositories::{BrandRepo, CarModelRepo, CarRepo};
use sqlx::PgPool;

/// Create a brand, a model under it, and a car, returning the car.
pub async fn seed_car(pool: &PgPool) -> CarDetail {
    seed_car_named(pool, "Toyota", "Corolla").await
}

pub async fn seed_car_named(pool: &PgPool, brand: &str, model: &str) -> CarDetail {
    let brand = BrandRepo::create(pool, brand).await.unwrap();
    let model = CarModelRepo::create(pool, brand.id, model).await.unwrap();
    CarRepo::create(pool, &car_input(brand.id, model.id))
        .await
        .unwrap()
}

pub fn car_input(brand_id: i64, model_id: i64) -> CarInput {
    CarInput {
        brand_id,
        model_id,
        body_type: "Sedan".into(),
        variant: Some("VXi".into()),
        year: 2020,
        registration_year: 2021,
        fuel_type: "Petrol".into(),
        transmission: "Manual".into(),
        price: 650_000,
        kms_driven: 30_000,
        ownership_count: 1,
        registration_code: "KL-07".into(),
        engine_cc: 1197,
        insurance_expiry: None,
        has_spare_key: true,
        description: None,
        is_active: None,
    }
}
