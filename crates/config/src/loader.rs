use std::path::Path;

use anyhow::{Context, bail};
use indoc::formatdoc;
use serde::Deserialize;
use toml::Value;

use crate::Config;

pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();

    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read configuration from {}", path.display()))?;

    let raw_config: Value = toml::from_str(&content)?;
    let config = Config::deserialize(raw_config)?;

    validate_paths(&config)?;

    log::debug!("Loaded configuration from {}", path.display());

    Ok(config)
}

pub(crate) fn validate_paths(config: &Config) -> anyhow::Result<()> {
    let completions_path = &config.completions.path;

    if !completions_path.starts_with('/') {
        bail!("Completions path must start with '/', got '{completions_path}'");
    }

    if !config.server.health.enabled {
        return Ok(());
    }

    let health_path = &config.server.health.path;

    if !health_path.starts_with('/') {
        bail!("Health path must start with '/', got '{health_path}'");
    }

    if config.server.health_on_main_listener() && health_path == completions_path {
        bail!(formatdoc! {r#"
            The health endpoint and the completions endpoint share the path '{health_path}'.

            Either move one of them:

              [server.health]
              path = "/health"

            Or bind the health endpoint to its own listener:

              [server.health]
              listen = "127.0.0.1:9090"
        "#, health_path = health_path});
    }

    Ok(())
}
