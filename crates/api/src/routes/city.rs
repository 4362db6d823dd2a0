//! Route definitions for the `/cities` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::city;
use crate::state::AppState;

/// Routes mounted at `/cities`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// PATCH  /{id}               -> patch
/// DELETE /{id}               -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(city::list).post(city::create))
        .route(
            "/{id}",
            get(city::get_by_id)
                .put(city::update)
                .patch(city::patch)
                .delete(city::delete),
        )
}
