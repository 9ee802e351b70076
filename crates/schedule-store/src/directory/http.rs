use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Url;
use serde::Deserialize;
use tracing::Instrument;

use super::MembershipDirectory;
use crate::error::{StoreError, StoreResult};
use crate::model::classroom::Classroom;

#[derive(Debug, Deserialize)]
struct ClassroomsResponse {
    classrooms: Vec<Classroom>,
}

/// Membership directory asking a remote classroom service over HTTP.
///
/// Issues `GET {base}/tenants/{tenant}/users/{user}/classrooms` and expects
/// `{"classrooms": [{"classroomId": ..., "name": ...}]}`.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDirectory {
    /// ## Summary
    /// Creates a directory client for the classroom service at `base_url`.
    ///
    /// ## Errors
    /// Returns an error if the URL cannot be parsed or cannot carry a path,
    /// or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::Directory(format!("invalid directory url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Directory(format!(
                "directory url cannot be a base: {base_url}"
            )));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    fn classrooms_url(&self, tenant_id: &str, user_id: &str) -> StoreResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::Directory("directory url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["tenants", tenant_id, "users", user_id, "classrooms"]);
        Ok(url)
    }
}

impl MembershipDirectory for HttpDirectory {
    #[tracing::instrument(skip(self))]
    fn classrooms_for_user<'a>(
        &'a self,
        tenant_id: &'a str,
        user_id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Vec<Classroom>>> {
        Box::pin(
            async move {
                let url = self.classrooms_url(tenant_id, user_id)?;
                tracing::debug!(%url, "Fetching user classrooms");

                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    tracing::warn!(%status, "Classroom service rejected membership lookup");
                    return Err(StoreError::Directory(format!(
                        "classroom service responded with {status}"
                    )));
                }

                let body: ClassroomsResponse = response.json().await.map_err(|e| {
                    StoreError::Directory(format!("invalid classroom service response: {e}"))
                })?;
                tracing::debug!(count = body.classrooms.len(), "User classrooms fetched");
                Ok(body.classrooms)
            }
            .in_current_span(),
        )
    }
}
