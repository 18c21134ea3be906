pub mod brand;
pub mod car;
pub mod health;
pub mod test_drive;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /brands                                   list (anon), create (admin)
/// /brands/{brand_id}/models                 list (anon), create (admin)
///
/// /cars                                     list public (anon), create (admin, multipart)
/// /cars/admin                               list all non-deleted (admin)
/// /cars/admin/{id}                          admin detail
/// /cars/dashboard-stats                     rollup counts (admin)
/// /cars/{id}                                public detail (anon), update, delete
/// /cars/{id}/toggle-active                  flip visibility (admin)
///
/// /cars/{id}/images                         list (visibility-aware), upload (admin, multipart)
/// /cars/{id}/images/reorder                 reorder (admin)
/// /cars/images/{image_id}                   delete (admin)
/// /cars/images/{image_id}/primary           set primary (admin)
///
/// /testdrive                                request (buyer)
/// /testdrive/my                             own history (buyer)
/// /admin/testdrives                         review queue (admin, ?status=)
/// /admin/testdrives/{id}/approve            Pending -> Approved
/// /admin/testdrives/{id}/reject             Pending -> Rejected
/// /admin/testdrives/{id}/complete           Approved -> Completed
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/brands", brand::router())
        .nest("/cars", car::router())
        .merge(test_drive::router())
}
