//! Tests for the car soft-delete lifecycle.
//!
//! Soft-deleted cars disappear from every read path but their rows (and
//! dependent image/test-drive rows) survive, keeping history joinable.

mod common;

use carlot_db::models::test_drive::CreateTestDrive;
use carlot_db::repositories::{CarImageRepo, CarRepo, TestDriveRepo};
use chrono::NaiveDate;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn soft_delete_hides_from_public_and_admin_reads(pool: PgPool) {
    let car = common::seed_car(&pool).await;

    assert!(CarRepo::soft_delete(&pool, car.id).await.unwrap());

    assert!(CarRepo::find_public_by_id(&pool, car.id).await.unwrap().is_none());
    assert!(CarRepo::find_admin_by_id(&pool, car.id).await.unwrap().is_none());
    assert!(CarRepo::list_public(&pool).await.unwrap().is_empty());
    assert!(CarRepo::list_admin(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn soft_delete_is_not_repeatable(pool: PgPool) {
    let car = common::seed_car(&pool).await;

    assert!(CarRepo::soft_delete(&pool, car.id).await.unwrap());
    assert!(!CarRepo::soft_delete(&pool, car.id).await.unwrap());
    assert!(!CarRepo::soft_delete(&pool, 999_999).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_car_is_admin_visible_but_not_public(pool: PgPool) {
    let car = common::seed_car(&pool).await;

    let toggled = CarRepo::toggle_active(&pool, car.id).await.unwrap().unwrap();
    assert!(!toggled.is_active);

    assert!(CarRepo::find_public_by_id(&pool, car.id).await.unwrap().is_none());
    assert!(CarRepo::list_public(&pool).await.unwrap().is_empty());

    let admin = CarRepo::find_admin_by_id(&pool, car.id).await.unwrap().unwrap();
    assert!(!admin.is_active);
    assert_eq!(CarRepo::list_admin(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_car_remains_joinable_from_test_drive_history(pool: PgPool) {
    let car = common::seed_car(&pool).await;
    CarImageRepo::append(&pool, car.id, "/uploads/a.jpg")
        .await
        .unwrap()
        .unwrap();

    TestDriveRepo::create(
        &pool,
        "user-1",
        &CreateTestDrive {
            car_id: car.id,
            preferred_date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            time_slot: "Morning".into(),
        },
    )
    .await
    .unwrap();

    CarRepo::soft_delete(&pool, car.id).await.unwrap();

    let history = TestDriveRepo::list_for_user(&pool, "user-1").await.unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0].car_is_deleted);
    assert_eq!(history[0].brand_name, "Toyota");
    assert_eq!(history[0].image_locator.as_deref(), Some("/uploads/a.jpg"));

    // Image rows are retained alongside the soft-deleted car.
    let images = CarImageRepo::list_by_car(&pool, car.id).await.unwrap();
    assert_eq!(images.len(), 1);
}
