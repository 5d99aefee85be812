use axum::Router;
use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_contact::ContactService;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // A missing .env is normal in deployments; reported once tracing is up
    let dotenv = dotenvy::dotenv();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!(error = %e, "Failed to read .env file"),
    }

    let contact = ContactService::from_settings(&config.smtp, config.contact.clone())
        .map_err(|e| eyre::eyre!("Failed to initialize contact service: {}", e))?;

    if let Some(err) = contact.config_error() {
        warn!(error = %err, "Starting without a usable SMTP relay");
    }

    let state = AppState {
        config,
        contact: Arc::new(contact),
    };

    let app = build_app(&state)?;

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        "Starting campus contact API"
    );

    create_app(app, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Campus contact API shutdown complete");
    Ok(())
}

/// Composes API routes, documentation, middleware and health endpoints.
fn build_app(state: &AppState) -> eyre::Result<Router> {
    let api_routes = api::routes(state);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.server)?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check probing the SMTP relay
    Ok(router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone())))
}
