//! Route definitions for the taxonomy (brands and their models).

use axum::routing::get;
use axum::Router;

use crate::handlers::brand;
use crate::state::AppState;

/// Routes mounted at `/brands`.
///
/// ```text
/// GET  /                       list
/// POST /                       create
/// GET  /{brand_id}/models      list_models
/// POST /{brand_id}/models      create_model
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(brand::list).post(brand::create))
        .route(
            "/{brand_id}/models",
            get(brand::list_models).post(brand::create_model),
        )
}
