//! Domain logic for the country/city registry.
//!
//! This crate has no database or HTTP dependencies. The db crate persists
//! what is defined here and the api crate exposes it.

pub mod access;
pub mod error;
pub mod patch;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;
