//! Well-known role name constants.
//!
//! Only the administrative role changes visibility rules. Every other role
//! (or no role at all) is treated as a regular consumer.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
