use std::net::SocketAddr;
use std::sync::Arc;

use sidemate_resize::config::ResizeConfig;
use sidemate_resize::router::build_router;
use sidemate_resize::store::S3Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sidemate_resize=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ResizeConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        region = %config.region,
        source_bucket = ?config.source_bucket,
        "Loaded resize configuration",
    );

    let store = Arc::new(S3Store::connect(&config.region).await);
    let app = build_router(store, config.source_bucket.clone());

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid RESIZE_HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting resize service");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl-C handler");
            tracing::info!("Received Ctrl-C, shutting down");
        })
        .await
        .expect("Server error");
}
