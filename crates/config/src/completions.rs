//! Mock chat completion endpoint configuration.

use std::borrow::Cow;

use serde::Deserialize;

/// Configuration for the emulated chat completion endpoint.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionsConfig {
    /// The route the endpoint is mounted on.
    pub path: Cow<'static, str>,
    /// Echo request and response bodies to the log.
    pub debug: bool,
}

impl Default for CompletionsConfig {
    fn default() -> Self {
        Self {
            path: Cow::Borrowed("/v1/chat/completions"),
            debug: false,
        }
    }
}
