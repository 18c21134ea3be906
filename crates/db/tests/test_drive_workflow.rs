//! Repository-level tests for the test-drive workflow: the guarded
//! transition update and the single-pending partial unique index.

mod common;

use carlot_core::test_drive::TestDriveStatus;
use carlot_db::models::test_drive::CreateTestDrive;
use carlot_db::repositories::TestDriveRepo;
use chrono::NaiveDate;
use sqlx::PgPool;

fn request(car_id: i64) -> CreateTestDrive {
    CreateTestDrive {
        car_id,
        preferred_date: NaiveDate::from_ymd_opt(2026, 9, 20).unwrap(),
        time_slot: "Afternoon".into(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_pending_insert_hits_unique_index(pool: PgPool) {
    let car = common::seed_car(&pool).await;

    TestDriveRepo::create(&pool, "buyer-1", &request(car.id))
        .await
        .unwrap();

    // Same (user, car) while still pending: the partial unique index
    // rejects the insert even without the handler's pre-check.
    let err = TestDriveRepo::create(&pool, "buyer-1", &request(car.id))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db) => {
            assert_eq!(db.code().as_deref(), Some("23505"));
            assert_eq!(db.constraint(), Some("uq_test_drive_requests_pending"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }

    // A different buyer may still request the same car.
    TestDriveRepo::create(&pool, "buyer-2", &request(car.id))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_request_frees_the_pending_slot(pool: PgPool) {
    let car = common::seed_car(&pool).await;

    let first = TestDriveRepo::create(&pool, "buyer-1", &request(car.id))
        .await
        .unwrap();
    TestDriveRepo::transition(
        &pool,
        first.id,
        TestDriveStatus::Pending,
        TestDriveStatus::Rejected,
        None,
        Some("No slots that week"),
    )
    .await
    .unwrap()
    .unwrap();

    assert!(!TestDriveRepo::has_pending(&pool, "buyer-1", car.id)
        .await
        .unwrap());
    TestDriveRepo::create(&pool, "buyer-1", &request(car.id))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn transition_guard_rejects_stale_source_state(pool: PgPool) {
    let car = common::seed_car(&pool).await;
    let req = TestDriveRepo::create(&pool, "buyer-1", &request(car.id))
        .await
        .unwrap();

    let scheduled = NaiveDate::from_ymd_opt(2026, 9, 25).unwrap();
    let approved = TestDriveRepo::transition(
        &pool,
        req.id,
        TestDriveStatus::Pending,
        TestDriveStatus::Approved,
        Some(scheduled),
        Some("See you then"),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(approved.status, "Approved");
    assert_eq!(approved.scheduled_date, Some(scheduled));

    // A second approval attempt no longer matches `status = 'Pending'`.
    let stale = TestDriveRepo::transition(
        &pool,
        req.id,
        TestDriveStatus::Pending,
        TestDriveStatus::Approved,
        Some(scheduled),
        None,
    )
    .await
    .unwrap();
    assert!(stale.is_none());

    let completed = TestDriveRepo::transition(
        &pool,
        req.id,
        TestDriveStatus::Approved,
        TestDriveStatus::Completed,
        None,
        None,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(completed.status, "Completed");
    // Approval metadata survives completion.
    assert_eq!(completed.scheduled_date, Some(scheduled));
    assert_eq!(completed.admin_comment.as_deref(), Some("See you then"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_all_filters_by_status(pool: PgPool) {
    let car = common::seed_car(&pool).await;

    let a = TestDriveRepo::create(&pool, "buyer-1", &request(car.id))
        .await
        .unwrap();
    TestDriveRepo::create(&pool, "buyer-2", &request(car.id))
        .await
        .unwrap();
    TestDriveRepo::transition(
        &pool,
        a.id,
        TestDriveStatus::Pending,
        TestDriveStatus::Rejected,
        None,
        Some("car unavailable"),
    )
    .await
    .unwrap()
    .unwrap();

    let all = TestDriveRepo::list_all(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let pending = TestDriveRepo::list_all(&pool, Some(TestDriveStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].user_id, "buyer-2");

    let rejected = TestDriveRepo::list_all(&pool, Some(TestDriveStatus::Rejected))
        .await
        .unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].admin_comment.as_deref(), Some("car unavailable"));
}
