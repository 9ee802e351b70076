mod app_specific;
mod schedule;

use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

pub use schedule_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APP_ROUTE_PREFIX, ENTRIES_ROUTE_PREFIX,
    SCHEDULE_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the `/api` router: app endpoints, schedule queries and entry
/// management, all behind the authentication middleware.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .hoop(AuthMiddleware)
        .push(app_specific::routes())
        .push(schedule::routes())
}
