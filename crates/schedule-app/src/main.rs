use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use schedule_app::app::api::routes;
use schedule_app::config::ConfigHandler;
use schedule_app::store_handler::{DirectoryHandler, StoreHandler};
use schedule_core::config::load_config;
use schedule_store::directory;
use schedule_store::store::MemoryStore;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(filter_layer).with(
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true),
    );
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!("Starting classroom schedule server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let directory = directory::from_config(&config.directory)?;
    let store = Arc::new(MemoryStore::new());

    tracing::info!(
        max_occurrences = config.schedule.max_occurrences,
        repeat_end_policy = ?config.schedule.repeat_end_policy,
        "Schedule store ready"
    );

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(StoreHandler { store })
        .hoop(DirectoryHandler { directory })
        .hoop(ConfigHandler {
            settings: Arc::new(config),
        })
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
