//! Runtime settings
//!
//! Settings are resolved once at startup from built-in defaults, an optional
//! config file and `LFM_*` environment variables (highest priority), then
//! handed to the routes through `web::Data`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_API_KEY: &str = "<YOUR API_KEY HERE>";
pub const DEFAULT_BASE_URL: &str = "/";

const ENV_PREFIX: &str = "LFM";

/// Settings structure
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Upstream API endpoint
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Upstream API key
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Public URL this site is served from, used in generated links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for each upstream request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory holding favicon.ico
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: default_api_key(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            static_dir: default_static_dir(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the environment
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to parse settings")?;

        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True while the placeholder key is still in use
    pub fn has_placeholder_key(&self) -> bool {
        self.api_key == DEFAULT_API_KEY || self.api_key.is_empty()
    }
}

// Default value functions for serde

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    25
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
