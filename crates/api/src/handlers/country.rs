//! Handlers for the `/countries` resource.
//!
//! Listings only ever show Active, non-deleted countries. Single-entity
//! reads pass through the active gate first; every by-id path then hides
//! soft-deleted rows from non-admin callers. Writes hand that check to the
//! repository so it runs under the same row lock as the write.

use atlas_core::access::check_not_deleted;
use atlas_core::error::CoreError;
use atlas_core::patch::{resolve_patch, COUNTRY_FIELDS};
use atlas_core::types::DbId;
use atlas_core::validation::validate_input;
use atlas_db::models::country::{
    Country, CountryResponse, CountryWithCities, CreateCountry, UpdateCountry,
};
use atlas_db::repositories::CountryRepo;
use atlas_db::DbPool;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::active_gate::{authorize_active, EntityKind};
use crate::middleware::auth::Caller;
use crate::query::DeleteParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Country";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// Load a country the caller is allowed to see.
async fn load_visible(pool: &DbPool, caller: &Caller, id: DbId) -> AppResult<Country> {
    let country = CountryRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    check_not_deleted(caller.is_admin(), country.is_deleted, ENTITY, id)?;
    Ok(country)
}

/// GET /api/v1/countries
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CountryResponse>>>> {
    let countries = CountryRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse {
        data: countries.iter().map(CountryResponse::from).collect(),
    }))
}

/// GET /api/v1/countries/with-cities
pub async fn list_with_cities(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CountryWithCities>>>> {
    let data = CountryRepo::list_active_with_cities(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/countries
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateCountry>,
) -> AppResult<(StatusCode, Json<DataResponse<CountryResponse>>)> {
    validate_input(&input)?;
    let country = CountryRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: country.into(),
        }),
    ))
}

/// GET /api/v1/countries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CountryResponse>>> {
    authorize_active(&state.pool, &caller, EntityKind::Country, id).await?;
    let country = load_visible(&state.pool, &caller, id).await?;
    Ok(Json(DataResponse {
        data: country.into(),
    }))
}

/// PUT /api/v1/countries/{id}
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateCountry>,
) -> AppResult<Json<DataResponse<CountryResponse>>> {
    validate_input(&input)?;
    let country = CountryRepo::update(&state.pool, id, &input, caller.is_admin())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: country.into(),
    }))
}

/// PATCH /api/v1/countries/{id}
///
/// Body is a flat `{field: value}` object. Unknown keys are ignored; an
/// empty object is rejected.
pub async fn patch(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<DbId>,
    ApiJson(patch): ApiJson<Map<String, Value>>,
) -> AppResult<Json<DataResponse<CountryResponse>>> {
    let fields = resolve_patch(COUNTRY_FIELDS, &patch)?;
    let country = CountryRepo::patch(&state.pool, id, &fields, caller.is_admin())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: country.into(),
    }))
}

/// DELETE /api/v1/countries/{id}?complete=bool
///
/// A missing id is not an error.
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteParams>,
) -> AppResult<StatusCode> {
    CountryRepo::delete(&state.pool, id, params.complete, caller.is_admin()).await?;
    Ok(StatusCode::NO_CONTENT)
}
