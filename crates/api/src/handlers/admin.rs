//! Admin-only handlers: unfiltered listings, bulk delete and restore.
//!
//! Every handler takes [`RequireAdmin`], so anonymous callers get 401 and
//! non-admins 403 before any query runs.

use atlas_core::error::CoreError;
use atlas_core::types::DbId;
use atlas_db::models::city::CityResponse;
use atlas_db::models::country::{CountryResponse, CountryWithCities};
use atlas_db::repositories::{CityRepo, CountryRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::DeleteParams;
use crate::response::{AffectedRows, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Countries
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/countries
pub async fn list_countries(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CountryResponse>>>> {
    let countries = CountryRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse {
        data: countries.iter().map(CountryResponse::from).collect(),
    }))
}

/// GET /api/v1/admin/countries/with-cities
pub async fn list_countries_with_cities(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CountryWithCities>>>> {
    let data = CountryRepo::list_all_with_cities(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/admin/countries?complete=bool
pub async fn delete_all_countries(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<DataResponse<AffectedRows>>> {
    let affected = CountryRepo::delete_all(&state.pool, params.complete).await?;
    tracing::info!(admin_id = admin.user_id, affected, "Bulk country delete");
    Ok(Json(DataResponse {
        data: AffectedRows { affected },
    }))
}

/// POST /api/v1/admin/countries/restore
pub async fn restore_all_countries(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AffectedRows>>> {
    let affected = CountryRepo::rollback_all(&state.pool).await?;
    tracing::info!(admin_id = admin.user_id, affected, "Bulk country restore");
    Ok(Json(DataResponse {
        data: AffectedRows { affected },
    }))
}

/// POST /api/v1/admin/countries/{id}/restore
pub async fn restore_country(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CountryRepo::rollback(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Country",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Cities
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/cities
pub async fn list_cities(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CityResponse>>>> {
    let cities = CityRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse {
        data: cities.iter().map(CityResponse::from).collect(),
    }))
}

/// DELETE /api/v1/admin/cities?complete=bool
pub async fn delete_all_cities(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<DataResponse<AffectedRows>>> {
    let affected = CityRepo::delete_all(&state.pool, params.complete).await?;
    tracing::info!(admin_id = admin.user_id, affected, "Bulk city delete");
    Ok(Json(DataResponse {
        data: AffectedRows { affected },
    }))
}

/// POST /api/v1/admin/cities/restore
pub async fn restore_all_cities(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AffectedRows>>> {
    let affected = CityRepo::rollback_all(&state.pool).await?;
    tracing::info!(admin_id = admin.user_id, affected, "Bulk city restore");
    Ok(Json(DataResponse {
        data: AffectedRows { affected },
    }))
}

/// POST /api/v1/admin/cities/{id}/restore
pub async fn restore_city(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CityRepo::rollback(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "City", id }))
    }
}
