//! Emulator server library.
//!
//! Provides a reusable server function to serve the emulator either for the binary, or for the integration tests.

#![deny(missing_docs)]

mod health;

use std::net::SocketAddr;

use anyhow::anyhow;
use axum::{Router, routing::get};
use config::Config;
use tokio::net::TcpListener;

/// Configuration for serving the emulator.
pub struct ServeConfig {
    /// The socket address (IP and port) the server will bind to
    pub listen_address: SocketAddr,
    /// The deserialized emulator TOML configuration.
    pub config: Config,
}

/// Binds the listening socket and runs the emulator until the server fails.
///
/// Failing to bind is returned as an error before anything is served.
pub async fn serve(ServeConfig { listen_address, config }: ServeConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(listen_address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {listen_address}: {e}"))?;

    serve_listener(listener, config).await
}

/// Runs the emulator on an already bound listener.
pub async fn serve_listener(listener: TcpListener, config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let app = app(&config);
    let listen_address = listener.local_addr()?;

    log::info!(
        "Chat completion endpoint available at: http://{listen_address}{}",
        config.completions.path
    );

    if config.completions.debug {
        log::info!("Debug mode enabled, request and response bodies will be logged");
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow!("Failed to start HTTP server: {e}"))?;

    Ok(())
}

fn app(config: &Config) -> Router {
    let mut app = completion::router(&config.completions);
    let health_config = &config.server.health;

    if let Some(listen) = health_config.separate_listener() {
        let health_config = health_config.clone();

        tokio::spawn(async move {
            if let Err(e) = health::bind_health_endpoint(listen, health_config).await {
                log::error!("{e}");
            }
        });
    } else if health_config.enabled {
        let health_router = Router::new().route(&health_config.path, get(health::health));
        app = app.merge(health_router);
    }

    app
}
