//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?complete=` flag accepted by delete endpoints.
///
/// `false` (the default) soft-deletes; `true` removes rows physically.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub complete: bool,
}
