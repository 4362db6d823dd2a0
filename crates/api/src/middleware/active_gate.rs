//! Status gate for single-entity reads.
//!
//! Handlers call [`authorize_active`] before anything else. The decision
//! itself lives in [`atlas_core::access::check_active_access`]; this module
//! only fetches the status it needs.

use atlas_core::access::check_active_access;
use atlas_core::types::DbId;
use atlas_db::repositories::{CityRepo, CountryRepo};
use atlas_db::DbPool;

use super::auth::Caller;
use crate::error::AppResult;

/// Which table an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Country,
    City,
}

impl EntityKind {
    /// Display name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Country => "Country",
            EntityKind::City => "City",
        }
    }
}

/// Reject non-admin callers unless the entity exists and is Active.
///
/// Admins pass without a lookup.
pub async fn authorize_active(
    pool: &DbPool,
    caller: &Caller,
    kind: EntityKind,
    id: DbId,
) -> AppResult<()> {
    if caller.is_admin() {
        return Ok(());
    }

    let status = match kind {
        EntityKind::Country => CountryRepo::find_by_id(pool, id).await?.map(|c| c.status),
        EntityKind::City => CityRepo::find_by_id(pool, id).await?.map(|c| c.status),
    };

    if let Err(err) = check_active_access(false, status) {
        tracing::debug!(entity = kind.name(), id, "Active gate rejected caller");
        return Err(err.into());
    }
    Ok(())
}
