//! Emulator configuration structures to map the emulator.toml configuration.

#![deny(missing_docs)]

mod completions;
mod health;
mod loader;
mod server;

use std::path::Path;

pub use completions::CompletionsConfig;
pub use health::HealthConfig;
use serde::Deserialize;
pub use server::ServerConfig;

/// Main configuration structure for the emulator.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Mock chat completion endpoint settings.
    #[serde(default)]
    pub completions: CompletionsConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        loader::load(path)
    }

    /// Validates the route layout of the configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        loader::validate_paths(self)
    }
}
