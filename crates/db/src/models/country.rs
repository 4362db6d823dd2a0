//! Country entity model and DTOs.

use atlas_core::status::{RecordStatus, StatusId};
use atlas_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::city::CityResponse;

/// A country row from the `countries` table.
///
/// Carries the internal `is_deleted` flag -- never serialize this directly.
/// Use [`CountryResponse`] for API output.
#[derive(Debug, Clone, FromRow)]
pub struct Country {
    pub id: DbId,
    pub name: String,
    pub localized_name: Option<String>,
    pub code: String,
    pub status: StatusId,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Country {
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active.id()
    }
}

/// External representation of a country (no deletion flag).
#[derive(Debug, Clone, Serialize)]
pub struct CountryResponse {
    pub id: DbId,
    pub name: String,
    pub localized_name: Option<String>,
    pub code: String,
    pub status: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Country> for CountryResponse {
    fn from(c: &Country) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            localized_name: c.localized_name.clone(),
            code: c.code.clone(),
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<Country> for CountryResponse {
    fn from(c: Country) -> Self {
        Self::from(&c)
    }
}

/// A country together with its cities, for the nested listings.
#[derive(Debug, Clone, Serialize)]
pub struct CountryWithCities {
    #[serde(flatten)]
    pub country: CountryResponse,
    pub cities: Vec<CityResponse>,
}

/// DTO for creating a new country. Any `id` in the payload is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCountry {
    #[validate(custom(function = "atlas_core::validation::non_blank"))]
    pub name: String,
    pub localized_name: Option<String>,
    #[validate(custom(function = "atlas_core::validation::non_blank"))]
    pub code: String,
    /// Defaults to Active if omitted.
    pub status: Option<RecordStatus>,
}

/// DTO for a full replace of a country's mutable fields.
///
/// Every field is written; an omitted `status` is written as Active and an
/// omitted `localized_name` clears the column.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCountry {
    #[validate(custom(function = "atlas_core::validation::non_blank"))]
    pub name: String,
    pub localized_name: Option<String>,
    #[validate(custom(function = "atlas_core::validation::non_blank"))]
    pub code: String,
    pub status: Option<RecordStatus>,
}
