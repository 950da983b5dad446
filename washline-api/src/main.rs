use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use washline_api::{
    app,
    state::{AppState, AuthConfig},
};
use washline_catalog::default_services;
use washline_store::{MemoryStore, ServiceStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "washline_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = washline_store::app_config::Config::load()?;
    tracing::info!("starting washline API on port {}", config.server.port);

    let store = Arc::new(MemoryStore::new());
    store.seed(default_services()).await;

    let state = AppState {
        store,
        auth: AuthConfig {
            secret: config.auth.jwt_secret,
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
