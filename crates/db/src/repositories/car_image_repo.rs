//! Repository for the `car_images` table.
//!
//! Every mutation here is a compound transactional operation that first
//! takes a row lock on the owning car (`SELECT ... FOR UPDATE`), so
//! gallery writes against the same car are serialized and the gallery
//! invariants hold after every mutation:
//!
//! - at most one primary per car (backed by `uq_car_images_primary`)
//! - exactly one primary whenever the car has images
//! - `sort_order` is a contiguous 1..N sequence
//! - `cars.primary_image_locator` mirrors the primary image's locator

use carlot_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::car_image::CarImage;

const COLUMNS: &str = "id, car_id, image_locator, is_primary, sort_order, created_at";

/// Provides gallery operations for car images.
pub struct CarImageRepo;

impl CarImageRepo {
    /// Append one image to a car's gallery, electing it primary when the
    /// car has no primary yet. Each append is its own atomic step so a
    /// failure mid-batch leaves earlier items committed and consistent.
    ///
    /// Returns `None` if the car is absent or soft-deleted.
    pub async fn append(
        pool: &PgPool,
        car_id: DbId,
        locator: &str,
    ) -> Result<Option<CarImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !lock_live_car(&mut tx, car_id).await? {
            return Ok(None);
        }

        let next_sort: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(sort_order), 0) + 1 FROM car_images WHERE car_id = $1",
        )
        .bind(car_id)
        .fetch_one(&mut *tx)
        .await?;

        let has_primary: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM car_images WHERE car_id = $1 AND is_primary)",
        )
        .bind(car_id)
        .fetch_one(&mut *tx)
        .await?;

        let insert_query = format!(
            "INSERT INTO car_images (car_id, image_locator, is_primary, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, CarImage>(&insert_query)
            .bind(car_id)
            .bind(locator)
            .bind(!has_primary)
            .bind(next_sort)
            .fetch_one(&mut *tx)
            .await?;

        if image.is_primary {
            sync_primary_locator(&mut tx, car_id).await?;
        }

        tx.commit().await?;
        Ok(Some(image))
    }

    /// List a car's images ordered for display. Visibility of the car
    /// itself is the caller's concern.
    pub async fn list_by_car(pool: &PgPool, car_id: DbId) -> Result<Vec<CarImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM car_images WHERE car_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, CarImage>(&query)
            .bind(car_id)
            .fetch_all(pool)
            .await
    }

    /// Reassign `sort_order` from the given id order. Ids that do not
    /// belong to the car are ignored; images the caller did not mention
    /// keep their relative order after the mentioned ones, so the
    /// sequence stays contiguous whatever the client sends.
    ///
    /// Returns `None` if the car is absent, soft-deleted, or has no
    /// images.
    pub async fn reorder(
        pool: &PgPool,
        car_id: DbId,
        ordered_ids: &[DbId],
    ) -> Result<Option<Vec<CarImage>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !lock_live_car(&mut tx, car_id).await? {
            return Ok(None);
        }

        let current: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM car_images WHERE car_id = $1 ORDER BY sort_order, id",
        )
        .bind(car_id)
        .fetch_all(&mut *tx)
        .await?;
        if current.is_empty() {
            return Ok(None);
        }

        let mut final_order: Vec<DbId> = Vec::with_capacity(current.len());
        for &id in ordered_ids {
            if current.contains(&id) && !final_order.contains(&id) {
                final_order.push(id);
            }
        }
        for &id in &current {
            if !final_order.contains(&id) {
                final_order.push(id);
            }
        }

        for (position, &id) in final_order.iter().enumerate() {
            sqlx::query("UPDATE car_images SET sort_order = $2 WHERE id = $1")
                .bind(id)
                .bind(position as i32 + 1)
                .execute(&mut *tx)
                .await?;
        }

        let list_query = format!(
            "SELECT {COLUMNS} FROM car_images WHERE car_id = $1 ORDER BY sort_order, id"
        );
        let images = sqlx::query_as::<_, CarImage>(&list_query)
            .bind(car_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(images))
    }

    /// Delete one image as a compound step: remove the row, re-elect the
    /// lowest-ordered remaining image as primary if the primary was
    /// deleted, re-compact `sort_order` to 1..N, and sync the car's
    /// denormalized locator.
    ///
    /// Returns the deleted image's locator for blob cleanup, or `None`
    /// if the image does not exist.
    pub async fn delete(pool: &PgPool, image_id: DbId) -> Result<Option<String>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let car_id: Option<DbId> =
            sqlx::query_scalar("SELECT car_id FROM car_images WHERE id = $1")
                .bind(image_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(car_id) = car_id else {
            return Ok(None);
        };

        // Deletion still compacts the gallery of a soft-deleted car, so
        // lock the car row without a liveness filter.
        sqlx::query("SELECT id FROM cars WHERE id = $1 FOR UPDATE")
            .bind(car_id)
            .execute(&mut *tx)
            .await?;

        // Re-read under the lock; a concurrent delete may have won.
        let row: Option<(String, bool)> = sqlx::query_as(
            "SELECT image_locator, is_primary FROM car_images WHERE id = $1",
        )
        .bind(image_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((locator, was_primary)) = row else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM car_images WHERE id = $1")
            .bind(image_id)
            .execute(&mut *tx)
            .await?;

        if was_primary {
            sqlx::query(
                "UPDATE car_images SET is_primary = TRUE
                 WHERE id = (SELECT id FROM car_images WHERE car_id = $1
                             ORDER BY sort_order, id LIMIT 1)",
            )
            .bind(car_id)
            .execute(&mut *tx)
            .await?;
        }

        compact_sort_order(&mut tx, car_id).await?;
        sync_primary_locator(&mut tx, car_id).await?;

        tx.commit().await?;
        Ok(Some(locator))
    }

    /// Make `image_id` the sole primary of its car and sync the car's
    /// denormalized locator, all in one transaction.
    ///
    /// Returns `None` if the image does not exist.
    pub async fn set_primary(
        pool: &PgPool,
        image_id: DbId,
    ) -> Result<Option<CarImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let car_id: Option<DbId> =
            sqlx::query_scalar("SELECT car_id FROM car_images WHERE id = $1")
                .bind(image_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(car_id) = car_id else {
            return Ok(None);
        };

        sqlx::query("SELECT id FROM cars WHERE id = $1 FOR UPDATE")
            .bind(car_id)
            .execute(&mut *tx)
            .await?;

        // Clear before set; the partial unique index enforces one
        // primary per statement.
        sqlx::query(
            "UPDATE car_images SET is_primary = FALSE
             WHERE car_id = $1 AND is_primary AND id <> $2",
        )
        .bind(car_id)
        .bind(image_id)
        .execute(&mut *tx)
        .await?;

        let set_query = format!(
            "UPDATE car_images SET is_primary = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, CarImage>(&set_query)
            .bind(image_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(image) = image else {
            return Ok(None);
        };

        sync_primary_locator(&mut tx, car_id).await?;

        tx.commit().await?;
        Ok(Some(image))
    }
}

/// Lock the car row for the duration of the transaction, returning
/// `false` when the car is absent or soft-deleted.
async fn lock_live_car(
    tx: &mut Transaction<'_, Postgres>,
    car_id: DbId,
) -> Result<bool, sqlx::Error> {
    let row: Option<(bool,)> =
        sqlx::query_as("SELECT is_deleted FROM cars WHERE id = $1 FOR UPDATE")
            .bind(car_id)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(matches!(row, Some((false,))))
}

/// Re-number a car's images to a contiguous 1..N sequence preserving
/// the current relative order.
async fn compact_sort_order(
    tx: &mut Transaction<'_, Postgres>,
    car_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE car_images ci SET sort_order = ranked.rn
         FROM (SELECT id, (ROW_NUMBER() OVER (ORDER BY sort_order, id))::int AS rn
               FROM car_images WHERE car_id = $1) ranked
         WHERE ci.id = ranked.id AND ci.sort_order <> ranked.rn",
    )
    .bind(car_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Mirror the primary image's locator onto the car row (NULL when the
/// gallery is empty).
async fn sync_primary_locator(
    tx: &mut Transaction<'_, Postgres>,
    car_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE cars SET primary_image_locator =
            (SELECT image_locator FROM car_images WHERE car_id = $1 AND is_primary)
         WHERE id = $1",
    )
    .bind(car_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
