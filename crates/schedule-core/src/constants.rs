/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const SCHEDULE_ROUTE_COMPONENT: &str = "schedule";
pub const SCHEDULE_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", SCHEDULE_ROUTE_COMPONENT);

pub const ENTRIES_ROUTE_COMPONENT: &str = "entries";
pub const ENTRIES_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", ENTRIES_ROUTE_COMPONENT);
