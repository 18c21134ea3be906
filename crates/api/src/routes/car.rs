//! Route definitions for the catalog and its nested gallery.
//!
//! Static segments (`admin`, `dashboard-stats`, `images`) are declared
//! alongside `/{id}`; axum gives static segments priority.

use axum::routing::{delete, get, patch, put};
use axum::Router;

use crate::handlers::{car, car_image, dashboard};
use crate::state::AppState;

/// Routes mounted at `/cars`.
///
/// ```text
/// GET    /                           list_public
/// POST   /                           create (multipart)
/// GET    /admin                      list_admin
/// GET    /admin/{id}                 get_admin
/// GET    /dashboard-stats            dashboard stats
/// GET    /{id}                       get_public
/// PUT    /{id}                       update
/// DELETE /{id}                       delete (soft)
/// PATCH  /{id}/toggle-active         toggle_active
///
/// GET    /{id}/images                gallery list
/// POST   /{id}/images                upload (multipart)
/// PUT    /{id}/images/reorder        reorder
/// DELETE /images/{image_id}          delete image
/// PUT    /images/{image_id}/primary  set primary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(car::list_public).post(car::create))
        .route("/admin", get(car::list_admin))
        .route("/admin/{id}", get(car::get_admin))
        .route("/dashboard-stats", get(dashboard::stats))
        .route(
            "/{id}",
            get(car::get_public).put(car::update).delete(car::delete),
        )
        .route("/{id}/toggle-active", patch(car::toggle_active))
        .route(
            "/{id}/images",
            get(car_image::list).post(car_image::upload),
        )
        .route("/{id}/images/reorder", put(car_image::reorder))
        .route("/images/{image_id}", delete(car_image::delete))
        .route("/images/{image_id}/primary", put(car_image::set_primary))
}
