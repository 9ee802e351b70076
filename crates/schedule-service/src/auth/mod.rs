pub mod authenticate;
pub mod depot;

use serde::Serialize;

/// The caller identity established for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: String,
}
