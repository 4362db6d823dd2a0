//! Handlers for the `/cities` resource.

use atlas_core::access::check_not_deleted;
use atlas_core::error::CoreError;
use atlas_core::patch::{resolve_patch, CITY_FIELDS};
use atlas_core::types::DbId;
use atlas_core::validation::validate_input;
use atlas_db::models::city::{City, CityResponse, CreateCity, UpdateCity};
use atlas_db::repositories::CityRepo;
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

const ENTITY: &str = "City";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

async fn load_visible(pool: &DbPool, caller: &Caller, id: DbId) -> AppResult<City> {
    let city = CityRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    check_not_deleted(caller.is_admin(), city.is_deleted, ENTITY, id)?;
    Ok(city)
}

/// GET /api/v1/cities
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CityResponse>>>> {
    let cities = CityRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse {
        data: cities.iter().map(CityResponse::from).collect(),
    }))
}

/// POST /api/v1/cities
///
/// Returns 422 when the referenced country is missing or not Active.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateCity>,
) -> AppResult<(StatusCode, Json<DataResponse<CityResponse>>)> {
    validate_input(&input)?;
    let city = CityRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: city.into() })))
}

/// GET /api/v1/cities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CityResponse>>> {
    authorize_active(&state.pool, &caller, EntityKind::City, id).await?;
    let city = load_visible(&state.pool, &caller, id).await?;
    Ok(Json(DataResponse { data: city.into() }))
}

/// PUT /api/v1/cities/{id}
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateCity>,
) -> AppResult<Json<DataResponse<CityResponse>>> {
    validate_input(&input)?;
    let city = CityRepo::update(&state.pool, id, &input, caller.is_admin())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: city.into() }))
}

/// PATCH /api/v1/cities/{id}
pub async fn patch(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<DbId>,
    ApiJson(patch): ApiJson<Map<String, Value>>,
) -> AppResult<Json<DataResponse<CityResponse>>> {
    let fields = resolve_patch(CITY_FIELDS, &patch)?;
    let city = CityRepo::patch(&state.pool, id, &fields, caller.is_admin())
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: city.into() }))
}

/// DELETE /api/v1/cities/{id}?complete=bool
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteParams>,
) -> AppResult<StatusCode> {
    CityRepo::delete(&state.pool, id, params.complete, caller.is_admin()).await?;
    Ok(StatusCode::NO_CONTENT)
}
