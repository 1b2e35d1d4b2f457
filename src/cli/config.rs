//! Server configuration
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. JSON file given with `--config`
//! 3. environment variables and command-line flags

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;
use crate::store::DatabaseUrl;

use super::args::ServeArgs;
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where records live (default: `file://./rollbook-data`)
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Bind address and CORS settings
    #[serde(flatten)]
    pub http: HttpServerConfig,

    /// Log line format (default: text)
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_database_url() -> String {
    "file://./rollbook-data".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            http: HttpServerConfig::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Layer file, environment and flags, then validate.
    pub fn resolve(args: &ServeArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(url) = &args.database_url {
            config.database_url = url.clone();
        }
        if let Some(host) = &args.host {
            config.http.host = host.clone();
        }
        if let Some(port) = args.port {
            config.http.port = port;
        }
        if let Some(format) = args.log_format {
            config.log_format = format;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        self.database()?;
        Ok(())
    }

    /// Parsed `database_url`.
    pub fn database(&self) -> CliResult<DatabaseUrl> {
        self.database_url
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid database_url: {}", e)))
    }
}
