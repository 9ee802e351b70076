//! Shared configuration, errors, route constants and wire vocabulary for the
//! classroom schedule service.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
