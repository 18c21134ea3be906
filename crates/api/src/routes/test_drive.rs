//! Route definitions for the test-drive workflow.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::test_drive;
use crate::state::AppState;

/// Buyer routes at `/testdrive`, admin queue at `/admin/testdrives`.
///
/// ```text
/// POST /testdrive                        create
/// GET  /testdrive/my                     list_mine
/// GET  /admin/testdrives                 list_all (?status=)
/// PUT  /admin/testdrives/{id}/approve    approve
/// PUT  /admin/testdrives/{id}/reject     reject
/// PUT  /admin/testdrives/{id}/complete   complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/testdrive", post(test_drive::create))
        .route("/testdrive/my", get(test_drive::list_mine))
        .route("/admin/testdrives", get(test_drive::list_all))
        .route("/admin/testdrives/{id}/approve", put(test_drive::approve))
        .route("/admin/testdrives/{id}/reject", put(test_drive::reject))
        .route("/admin/testdrives/{id}/complete", put(test_drive::complete))
}
