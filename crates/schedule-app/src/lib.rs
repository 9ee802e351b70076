//! HTTP surface of the classroom schedule service.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod store_handler;
