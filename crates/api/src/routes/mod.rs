pub mod admin;
pub mod city;
pub mod country;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /countries                                 list active, create
/// /countries/with-cities                     active countries with active cities
/// /countries/{id}                            get (gated), put, patch, delete
///
/// /cities                                    list active, create
/// /cities/{id}                               get (gated), put, patch, delete
///
/// /admin/countries                           list all, bulk delete
/// /admin/countries/with-cities               all countries with all cities
/// /admin/countries/restore                   restore all (POST)
/// /admin/countries/{id}/restore              restore one (POST)
/// /admin/cities                              list all, bulk delete
/// /admin/cities/restore                      restore all (POST)
/// /admin/cities/{id}/restore                 restore one (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/countries", country::router())
        .nest("/cities", city::router())
        .nest("/admin", admin::router())
}
