//! City entity model and DTOs.

use atlas_core::status::{CityType, CityTypeId, RecordStatus, StatusId};
use atlas_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A city row from the `cities` table.
#[derive(Debug, Clone, FromRow)]
pub struct City {
    pub id: DbId,
    pub name: String,
    pub localized_name: Option<String>,
    pub code: String,
    pub city_type: CityTypeId,
    pub status: StatusId,
    pub is_deleted: bool,
    pub country_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl City {
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active.id()
    }
}

/// External representation of a city (no deletion flag).
#[derive(Debug, Clone, Serialize)]
pub struct CityResponse {
    pub id: DbId,
    pub name: String,
    pub localized_name: Option<String>,
    pub code: String,
    #[serde(rename = "type")]
    pub city_type: CityTypeId,
    pub status: StatusId,
    pub country_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&City> for CityResponse {
    fn from(c: &City) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            localized_name: c.localized_name.clone(),
            code: c.code.clone(),
            city_type: c.city_type,
            status: c.status,
            country_id: c.country_id,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<City> for CityResponse {
    fn from(c: City) -> Self {
        Self::from(&c)
    }
}

/// DTO for creating a new city. Any `id` in the payload is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCity {
    #[validate(custom(function = "atlas_core::validation::non_blank"))]
    pub name: String,
    pub localized_name: Option<String>,
    #[validate(custom(function = "atlas_core::validation::non_blank"))]
    pub code: String,
    /// Defaults to Urban if omitted.
    #[serde(rename = "type")]
    pub city_type: Option<CityType>,
    /// Defaults to Active if omitted.
    pub status: Option<RecordStatus>,
    pub country_id: DbId,
}

/// DTO for a full replace of a city's mutable fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCity {
    #[validate(custom(function = "atlas_core::validation::non_blank"))]
    pub name: String,
    pub localized_name: Option<String>,
    #[validate(custom(function = "atlas_core::validation::non_blank"))]
    pub code: String,
    #[serde(rename = "type")]
    pub city_type: Option<CityType>,
    pub status: Option<RecordStatus>,
    pub country_id: DbId,
}
