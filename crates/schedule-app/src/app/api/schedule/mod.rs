use salvo::Router;

mod entries;
mod query;

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(query::routes())
        .push(entries::routes())
}
