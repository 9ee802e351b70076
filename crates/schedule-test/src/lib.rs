//! Classroom schedule server - integration test support.
//!
//! Re-exports the workspace crates under one path for the integration tests.

pub mod component {
    pub use schedule_core::{config, constants, error, types};

    pub mod recur {
        pub use schedule_recur::*;
    }

    pub mod store {
        pub use schedule_store::directory::{MembershipDirectory, StaticDirectory};
        pub use schedule_store::model::classroom::Classroom;
        pub use schedule_store::model::entry::{NewEntry, StoredEntry};
        pub use schedule_store::store::{EntryStore, MemoryStore};
    }

    pub mod middleware {
        pub use schedule_app::middleware::*;
    }

    pub mod handlers {
        pub use schedule_app::config::ConfigHandler;
        pub use schedule_app::store_handler::{DirectoryHandler, StoreHandler};
    }
}

pub mod app {
    pub use schedule_app::*;

    pub mod api {
        pub use schedule_app::app::api::*;
    }
}
