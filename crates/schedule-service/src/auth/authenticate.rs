use schedule_core::config::{AuthMethod, Settings};

use super::AuthenticatedUser;
use crate::error::{ServiceError, ServiceResult};

/// Use the user configured in settings for single user authentication.
///
/// ## Errors
///
/// Returns `InvalidConfiguration` if the single user section is missing.
fn authenticate_single_user(config: &Settings) -> ServiceResult<AuthenticatedUser> {
    tracing::debug!("Authenticating single user");

    let single_user_config =
        config
            .auth
            .single_user
            .as_ref()
            .ok_or(ServiceError::InvalidConfiguration(
                "Single user config is missing".to_string(),
            ))?;

    Ok(AuthenticatedUser {
        user_id: single_user_config.user_id.clone(),
    })
}

/// Trust the user id a reverse proxy placed in the configured header.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if the header is absent, empty or not valid UTF-8.
fn authenticate_proxy(req: &salvo::Request, config: &Settings) -> ServiceResult<AuthenticatedUser> {
    let header = config.auth.proxy.user_header.as_str();

    let user_id = req
        .headers()
        .get(header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            tracing::trace!(header, "Proxy user header missing");
            ServiceError::NotAuthenticated
        })?;

    Ok(AuthenticatedUser {
        user_id: user_id.to_string(),
    })
}

/// ## Summary
/// Authenticate a user based on the configured authentication method.
///
/// ## Errors
/// Returns `NotAuthenticated` if the request carries no identity, or
/// `InvalidConfiguration` if the configured method is incomplete.
#[tracing::instrument(skip(req, config))]
pub fn authenticate(req: &salvo::Request, config: &Settings) -> ServiceResult<AuthenticatedUser> {
    tracing::trace!(auth_method = ?config.auth.method, "Authenticating request");

    match config.auth.method {
        AuthMethod::SingleUser => authenticate_single_user(config),
        AuthMethod::Proxy => authenticate_proxy(req, config),
    }
}
