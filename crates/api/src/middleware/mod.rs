//! Caller identity and authorization.
//!
//! - [`auth::AuthUser`] -- Authenticated caller from a JWT Bearer token.
//! - [`auth::Caller`] -- Optional identity; anonymous when no token is sent.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`active_gate::authorize_active`] -- Hides non-Active entities from non-admins.

pub mod active_gate;
pub mod auth;
pub mod rbac;
