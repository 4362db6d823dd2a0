//! Route definitions for `/admin`. Every handler requires the admin role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /countries                  -> list_countries
/// DELETE /countries?complete=        -> delete_all_countries
/// GET    /countries/with-cities      -> list_countries_with_cities
/// POST   /countries/restore          -> restore_all_countries
/// POST   /countries/{id}/restore     -> restore_country
///
/// GET    /cities                     -> list_cities
/// DELETE /cities?complete=           -> delete_all_cities
/// POST   /cities/restore             -> restore_all_cities
/// POST   /cities/{id}/restore        -> restore_city
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/countries",
            get(admin::list_countries).delete(admin::delete_all_countries),
        )
        .route(
            "/countries/with-cities",
            get(admin::list_countries_with_cities),
        )
        .route("/countries/restore", post(admin::restore_all_countries))
        .route("/countries/{id}/restore", post(admin::restore_country))
        .route(
            "/cities",
            get(admin::list_cities).delete(admin::delete_all_cities),
        )
        .route("/cities/restore", post(admin::restore_all_cities))
        .route("/cities/{id}/restore", post(admin::restore_city))
}
