use anyhow::{Context, Result};
use std::env;
use tracing::Level;

use crate::packer::Packer;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub packer: PackerConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct PackerConfig {
    /// Level for non-success outcomes
    pub log_level: Level,
    pub log_success: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            log_level: Level::WARN,
            log_success: false,
        }
    }
}

impl PackerConfig {
    fn from_vars(log_level: Option<String>, log_success: Option<String>) -> Result<Self> {
        Ok(PackerConfig {
            log_level: log_level
                .unwrap_or_else(|| "warn".to_string())
                .parse()
                .context("PACK_LOG_LEVEL must be one of error, warn, info, debug, trace")?,
            log_success: log_success
                .unwrap_or_else(|| "false".to_string())
                .parse()
                .context("PACK_LOG_SUCCESS must be true or false")?,
        })
    }

    pub fn packer(&self) -> Packer {
        Packer::new()
            .with_level(self.log_level)
            .log_success(self.log_success)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
            },
            packer: PackerConfig::from_vars(
                env::var("PACK_LOG_LEVEL").ok(),
                env::var("PACK_LOG_SUCCESS").ok(),
            )?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
