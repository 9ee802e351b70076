//! Storage of schedule entries and lookup of classroom memberships.

pub mod directory;
pub mod error;
pub mod model;
pub mod store;
