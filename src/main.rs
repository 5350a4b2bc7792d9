use anyhow::Context;
use product_catalog::{infrastructure::logger::Logger, router, AppState, Config};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    Logger::init(&config.logging)?;

    info!("Starting product catalog server...");

    let state = AppState::new(&config);
    if config.catalog.seed_sample_data {
        state.product_service.seed_sample_data().await;
    }

    let app = router(state, config.http.timeout());

    let addr = config.http.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("🚀 Product catalog running on http://{}", listener.local_addr()?);
    info!("📖 API endpoints:");
    info!("   GET    /products           - List products (?category=&search=&page=&limit=)");
    info!("   GET    /products/stats     - Product count per category");
    info!("   GET    /products/:id       - Get a product");
    info!("   POST   /products           - Create a product");
    info!("   PUT    /products/:id       - Update a product");
    info!("   DELETE /products/:id       - Delete a product");
    info!("   GET    /health             - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
