use miette::{IntoDiagnostic, Result};
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

use primecare_odoo::{Client, api};

const DEFAULT_GATEWAY_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "primecare_odoo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(ErrorLayer::default())
        .init();

    let client = Client::from_env()?;

    // One connectivity probe before serving: credential and network problems
    // surface at startup instead of on the first request.
    let uid = client.authenticate().await?;
    info!(uid, "connected to odoo as the service account");

    let addr = std::env::var("GATEWAY_ADDR").unwrap_or_else(|_| DEFAULT_GATEWAY_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.into_diagnostic()?;
    info!("gateway listening on {addr}");

    axum::serve(listener, api::router(client))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for the shutdown signal: {e}");
    }
}
