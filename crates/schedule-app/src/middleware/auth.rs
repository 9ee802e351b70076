use salvo::Depot;
use tracing::error;

use crate::config::get_config_from_depot;
use schedule_service::auth::authenticate::authenticate;
use schedule_service::auth::depot::{DepotUser, depot_keys};
use schedule_service::error::ServiceError;

/// ## Summary
/// Middleware handler for authentication.
/// Use this as a handler in routes to protect them with authentication.
pub struct AuthMiddleware;

/// ## Summary
/// Authenticates the request and stores the resulting identity in the depot.
/// Requests without an identity are marked public; handlers that need a user
/// reject them with 401.
///
/// ## Side Effects
/// Inserts a `DepotUser` under `depot_keys::AUTHENTICATED_PRINCIPAL`.
///
/// ## Errors
/// Returns an HTTP 500 response if the configuration is missing from the depot.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        if req.method() == salvo::http::Method::OPTIONS {
            depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, DepotUser::Public);
            return;
        }

        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        match authenticate(req, &config) {
            Ok(user) => {
                tracing::debug!(user_id = %user.user_id, "User authenticated successfully");
                depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, DepotUser::User(user));
            }
            Err(ServiceError::NotAuthenticated) => {
                tracing::debug!("Request not authenticated, treating as public");
                depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, DepotUser::Public);
            }
            Err(ServiceError::InvalidConfiguration(msg)) => {
                tracing::warn!(%msg, "Authentication misconfigured, treating request as public");
                depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, DepotUser::Public);
            }
            Err(service_err) => {
                error!(error = ?service_err, "Authentication failed with error");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                res.body("Internal Server Error");
                ctrl.skip_rest();
            }
        }
    }
}
