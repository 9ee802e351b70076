use std::sync::Arc;

use salvo::async_trait;
use schedule_service::error::ServiceError;
use schedule_store::directory::MembershipDirectory;
use schedule_store::store::EntryStore;

use crate::error::AppResult;

pub type SharedStore = Arc<dyn EntryStore + Send + Sync>;
pub type SharedDirectory = Arc<dyn MembershipDirectory + Send + Sync>;

pub struct StoreHandler {
    pub store: SharedStore,
}

#[async_trait]
impl salvo::Handler for StoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.store));
    }
}

pub struct DirectoryHandler {
    pub directory: SharedDirectory,
}

#[async_trait]
impl salvo::Handler for DirectoryHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.directory));
    }
}

/// ## Summary
/// Retrieves the entry store from the depot.
///
/// ## Errors
/// Returns an error if the store is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<SharedStore> {
    depot.obtain::<SharedStore>().cloned().map_err(|_err| {
        ServiceError::InvariantViolation("Entry store not found in depot").into()
    })
}

/// ## Summary
/// Retrieves the membership directory from the depot.
///
/// ## Errors
/// Returns an error if the directory is not found in the depot.
pub fn get_directory_from_depot(depot: &salvo::Depot) -> AppResult<SharedDirectory> {
    depot.obtain::<SharedDirectory>().cloned().map_err(|_err| {
        ServiceError::InvariantViolation("Membership directory not found in depot").into()
    })
}
