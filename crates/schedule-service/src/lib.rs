//! Schedule query and entry management services.

pub mod auth;
pub mod error;
pub mod schedule;
