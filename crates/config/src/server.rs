//! HTTP server configuration settings.

use std::net::SocketAddr;

use serde::Deserialize;

use crate::HealthConfig;

/// HTTP server configuration settings.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// The socket address the server should listen on.
    pub listen_address: Option<SocketAddr>,
    /// Health endpoint configuration.
    #[serde(default)]
    pub health: HealthConfig,
}

impl ServerConfig {
    /// Returns whether the health endpoint shares the listener of the completion endpoint.
    pub fn health_on_main_listener(&self) -> bool {
        self.health.enabled && self.health.listen.is_none()
    }
}
