use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::Deserialize;
use tracing::error;

use schedule_core::constants::SCHEDULE_ROUTE_COMPONENT;
use schedule_service::auth::depot::get_user_from_depot;
use schedule_service::schedule::expansion_options;
use schedule_service::schedule::query::{ScheduledOccurrence, query_schedule};
use schedule_service::schedule::window::QueryWindow;

use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult, ErrorResponse, render_error};
use crate::store_handler::{get_directory_from_depot, get_store_from_depot};

/// ## Summary
/// Schedule query payload; both bounds are RFC 3339 instants or `YYYY-MM-DD` dates.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQueryRequest {
    pub from: Option<String>,
    pub to: Option<String>,
}

async fn run_query(
    depot: &Depot,
    tenant_id: &str,
    user_id: &str,
    body: &ScheduleQueryRequest,
) -> AppResult<Vec<ScheduledOccurrence>> {
    let window = QueryWindow::parse(body.from.as_deref(), body.to.as_deref())?;

    let config = get_config_from_depot(depot)?;
    let store = get_store_from_depot(depot)?;
    let directory = get_directory_from_depot(depot)?;

    Ok(query_schedule(
        store.as_ref(),
        directory.as_ref(),
        tenant_id,
        user_id,
        window,
        &expansion_options(&config.schedule),
    )
    .await?)
}

/// ## Summary
/// POST /api/schedule/{tenant_id} - Occurrences of the caller's classrooms in a window
///
/// ## Errors
/// Returns HTTP 400 for a missing, malformed or inverted window or an entry
/// that expands past the occurrence limit.
/// Returns HTTP 401 if the request is not authenticated.
/// Returns HTTP 502 if the classroom service cannot be reached.
#[handler]
async fn query_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let user_id = match get_user_from_depot(depot) {
        Ok(user) => user.user_id.clone(),
        Err(e) => {
            render_error(res, &AppError::from(e));
            return;
        }
    };

    let Some(tenant_id) = req.param::<String>("tenant_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse {
            error: "Tenant id is required".to_string(),
        }));
        return;
    };

    let body = match req.parse_json::<ScheduleQueryRequest>().await {
        Ok(body) => body,
        Err(e) => {
            error!(error = ?e, "Failed to parse schedule query");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid request body".to_string(),
            }));
            return;
        }
    };

    match run_query(depot, &tenant_id, &user_id, &body).await {
        Ok(occurrences) => res.render(Json(occurrences)),
        Err(e) => render_error(res, &e),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SCHEDULE_ROUTE_COMPONENT)
        .push(Router::with_path("{tenant_id}").post(query_handler))
}
