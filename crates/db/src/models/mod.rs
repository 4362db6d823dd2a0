//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row (not serializable)
//! - A `Serialize` response struct, the only shape exposed externally
//! - `Deserialize + Validate` create and full-replace update DTOs

pub mod city;
pub mod country;
