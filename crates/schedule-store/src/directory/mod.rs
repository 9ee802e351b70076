//! Lookup of the classrooms a user belongs to.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use schedule_core::config::{DirectoryConfig, DirectoryMethod};

use crate::error::{StoreError, StoreResult};
use crate::model::classroom::Classroom;

pub mod http;
pub mod static_directory;

pub use http::HttpDirectory;
pub use static_directory::StaticDirectory;

/// Membership boundary: which classrooms of a tenant a user may see.
pub trait MembershipDirectory: Send + Sync {
    fn classrooms_for_user<'a>(
        &'a self,
        tenant_id: &'a str,
        user_id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Vec<Classroom>>>;
}

/// ## Summary
/// Builds the membership directory selected by configuration.
///
/// ## Errors
/// Returns an error if the HTTP directory is selected without a URL, or its
/// URL or client cannot be built.
pub fn from_config(
    config: &DirectoryConfig,
) -> StoreResult<Arc<dyn MembershipDirectory + Send + Sync>> {
    match config.method {
        DirectoryMethod::Static => {
            tracing::info!(
                membership_count = config.memberships.len(),
                "Using static membership directory"
            );
            Ok(Arc::new(StaticDirectory::from_config(&config.memberships)))
        }
        DirectoryMethod::Http => {
            let url = config.url.as_deref().ok_or_else(|| {
                StoreError::Directory("directory.url is not configured".to_string())
            })?;
            tracing::info!(%url, "Using HTTP membership directory");
            Ok(Arc::new(HttpDirectory::new(
                url,
                Duration::from_secs(config.timeout_secs),
            )?))
        }
    }
}
