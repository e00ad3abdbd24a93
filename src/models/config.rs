//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

/// Smallest accepted length of `secret`, which signs the flash cookies.
pub const MIN_SECRET_LENGTH: usize = 64;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Glob the Tera templates are loaded from.
    pub templates_dir: String,
    pub assets_dir: String,
    pub secret: String,
    /// Base URL of the remote REST API.
    pub api_url: String,
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,
    #[serde(default = "default_page_length")]
    pub default_page_length: usize,
}

fn default_api_timeout_secs() -> u64 {
    30
}

fn default_page_length() -> usize {
    10
}

impl ServerConfig {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }
}
