//! Service configuration

use anyhow::{Context, Result};
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

/// Service configuration
///
/// Read from an optional `manifest-api.{toml,yaml,json}` in the working
/// directory, then overridden by `MANIFEST_API_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address to bind
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_port() -> u16 {
    8080
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            max_body_bytes: default_max_body_bytes(),
            log_level: default_log_level(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from the config file and environment
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("manifest-api").required(false))
                .add_source(Environment::with_prefix("MANIFEST_API").try_parsing(true)),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("failed to read configuration sources")?
            .try_deserialize()
            .context("invalid manifest-api configuration")
    }

    /// `host:port` to bind the listener to
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
