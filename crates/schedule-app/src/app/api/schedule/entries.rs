use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::Serialize;

use schedule_core::constants::ENTRIES_ROUTE_COMPONENT;
use schedule_service::auth::depot::get_user_from_depot;
use schedule_service::error::ServiceError;
use schedule_service::schedule::entry::{
    EntryRequest, create_entry, delete_entry, get_entry, list_entries, update_entry,
};

use crate::error::{AppResult, render_error};
use crate::store_handler::get_store_from_depot;

fn respond<T: Serialize + Send>(res: &mut Response, result: AppResult<T>, status: StatusCode) {
    match result {
        Ok(body) => {
            res.status_code(status);
            res.render(Json(body));
        }
        Err(e) => render_error(res, &e),
    }
}

async fn entry_body(req: &mut Request) -> AppResult<EntryRequest> {
    req.parse_json::<EntryRequest>().await.map_err(|e| {
        tracing::debug!(error = ?e, "Failed to parse entry body");
        ServiceError::ValidationError("Invalid request body".to_string()).into()
    })
}

fn entry_id(req: &Request) -> AppResult<String> {
    req.param::<String>("id")
        .ok_or_else(|| ServiceError::ValidationError("Entry id is required".to_string()).into())
}

/// ## Summary
/// GET /api/entries?tenantId=&classroom= - Entries of one classroom
#[handler]
async fn list_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result: AppResult<_> = async {
        get_user_from_depot(depot)?;
        let store = get_store_from_depot(depot)?;
        let tenant_id = req.query::<String>("tenantId");
        let classroom = req.query::<String>("classroom");
        Ok(list_entries(store.as_ref(), tenant_id.as_deref(), classroom.as_deref()).await?)
    }
    .await;
    respond(res, result, StatusCode::OK);
}

/// ## Summary
/// POST /api/entries - Create a schedule entry
///
/// ## Errors
/// Returns HTTP 400 if a field is missing or malformed, or `end` is before `start`.
#[handler]
async fn create_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result: AppResult<_> = async {
        get_user_from_depot(depot)?;
        let store = get_store_from_depot(depot)?;
        let body = entry_body(req).await?;
        Ok(create_entry(store.as_ref(), body).await?)
    }
    .await;
    respond(res, result, StatusCode::CREATED);
}

/// ## Summary
/// GET /api/entries/{id}
#[handler]
async fn get_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result: AppResult<_> = async {
        get_user_from_depot(depot)?;
        let store = get_store_from_depot(depot)?;
        let id = entry_id(req)?;
        Ok(get_entry(store.as_ref(), &id).await?)
    }
    .await;
    respond(res, result, StatusCode::OK);
}

/// ## Summary
/// PUT /api/entries/{id} - Replace an entry's fields
#[handler]
async fn update_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result: AppResult<_> = async {
        get_user_from_depot(depot)?;
        let store = get_store_from_depot(depot)?;
        let id = entry_id(req)?;
        let body = entry_body(req).await?;
        Ok(update_entry(store.as_ref(), &id, body).await?)
    }
    .await;
    respond(res, result, StatusCode::OK);
}

/// ## Summary
/// DELETE /api/entries/{id} - Remove an entry and return it
#[handler]
async fn delete_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result: AppResult<_> = async {
        get_user_from_depot(depot)?;
        let store = get_store_from_depot(depot)?;
        let id = entry_id(req)?;
        Ok(delete_entry(store.as_ref(), &id).await?)
    }
    .await;
    respond(res, result, StatusCode::OK);
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(ENTRIES_ROUTE_COMPONENT)
        .get(list_handler)
        .post(create_handler)
        .push(
            Router::with_path("{id}")
                .get(get_handler)
                .put(update_handler)
                .delete(delete_handler),
        )
}
