use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod adapters;
mod app_state;
mod auth;
mod config;
mod domain;
mod factory;
mod router;
mod routes;

use crate::factory::RowStoreServiceFactory;

#[tokio::main]
async fn main() {
    dotenvy::from_filename("./learnlog-api/.env.local").ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnlog_api=debug,tower_http=debug".into()),
        )
        .init();

    let config = config::read_config().expect("Failed to read configuration");
    tracing::debug!(?config, "loaded configuration");

    let factory =
        RowStoreServiceFactory::new(&config).expect("Failed to create row store client");
    let app = router::create(Arc::new(factory), &config);

    let addr = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
