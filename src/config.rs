//! Configuration handling for the tool catalog.
//!
//! This module provides configuration management via CLI arguments and environment variables.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "data/tools.json";
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Tool catalog server configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "tool-catalog", version, about)]
pub struct Config {
    /// JSON file holding the catalog. Created on the first write if missing.
    #[arg(
        long,
        value_name = "PATH",
        default_value = DEFAULT_DATA_FILE,
        env = "CATALOG_DATA_FILE"
    )]
    pub data_file: PathBuf,

    /// HTTP host to bind to
    #[arg(
        long,
        default_value = DEFAULT_HTTP_HOST,
        env = "CATALOG_HTTP_HOST"
    )]
    pub http_host: String,

    /// HTTP port to bind to
    #[arg(
        long,
        default_value_t = DEFAULT_HTTP_PORT,
        env = "CATALOG_HTTP_PORT"
    )]
    pub http_port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "CATALOG_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "CATALOG_JSON_LOGS")]
    pub json_logs: bool,

    /// Allow cross-origin requests from any origin (for browser front ends served elsewhere)
    #[arg(long, env = "CATALOG_CORS")]
    pub cors: bool,
}

impl Config {
    /// Parse configuration from command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            log_level: "info".to_string(),
            json_logs: false,
            cors: false,
        }
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.data_file.as_os_str().is_empty() {
            return Err("data_file must not be empty".to_string());
        }
        if self.http_port == 0 {
            return Err("http_port must be greater than 0".to_string());
        }
        if self.http_host.trim().is_empty() {
            return Err("http_host must not be empty".to_string());
        }
        Ok(())
    }
}
