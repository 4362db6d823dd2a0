//! Visibility rules for non-administrative callers.
//!
//! Two checks guard single-entity access:
//!
//! 1. [`check_active_access`] -- the entity must exist and be Active unless
//!    the caller is an admin. Rejection is a uniform `Unauthorized` so the
//!    response does not reveal whether the row exists.
//! 2. [`check_not_deleted`] -- soft-deleted rows are invisible to non-admins
//!    and surface as `NotFound`.
//!
//! Both must pass for a non-admin read to succeed.

use crate::error::CoreError;
use crate::status::{RecordStatus, StatusId};
use crate::types::DbId;

/// Decide whether a caller may see an entity given its current status.
///
/// `status` is `None` when the entity does not exist.
pub fn check_active_access(is_admin: bool, status: Option<StatusId>) -> Result<(), CoreError> {
    if is_admin {
        return Ok(());
    }
    match status {
        Some(s) if s == RecordStatus::Active.id() => Ok(()),
        _ => Err(CoreError::Unauthorized(
            "Entity is not available".to_string(),
        )),
    }
}

/// Hide soft-deleted rows from non-admin callers.
pub fn check_not_deleted(
    is_admin: bool,
    is_deleted: bool,
    entity: &'static str,
    id: DbId,
) -> Result<(), CoreError> {
    if is_deleted && !is_admin {
        return Err(CoreError::NotFound { entity, id });
    }
    Ok(())
}
