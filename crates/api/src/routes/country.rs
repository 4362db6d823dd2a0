//! Route definitions for the `/countries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::country;
use crate::state::AppState;

/// Routes mounted at `/countries`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /with-cities        -> list_with_cities
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// PATCH  /{id}               -> patch
/// DELETE /{id}               -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(country::list).post(country::create))
        .route("/with-cities", get(country::list_with_cities))
        .route(
            "/{id}",
            get(country::get_by_id)
                .put(country::update)
                .patch(country::patch)
                .delete(country::delete),
        )
}
