use std::sync::Arc;

use anyhow::Context;

use cornerstone_db::config::AppConfig;
use cornerstone_db::core::catalog::Catalog;
use cornerstone_db::core::tables::HttpTableSource;
use cornerstone_db::core::{logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();

    // Initialize logging
    let _log_guard = logging::init(&config);
    log::info!("{} v{} starting", cornerstone_db::NAME, cornerstone_db::VERSION);
    log::info!(
        "Upstream tables: {}/{}",
        config.upstream.base_url,
        config.upstream.language
    );

    let source = HttpTableSource::new(&config.upstream).context("Failed to create HTTP client")?;
    let catalog = Arc::new(Catalog::from_config(Arc::new(source), &config));
    let app = server::router(catalog);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    server::serve(listener, app, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for shutdown signal: {}", e);
        }
    })
    .await
    .context("Server error")?;

    Ok(())
}
