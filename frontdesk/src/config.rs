//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. Sources are merged in order, later overriding earlier:
//!
//! 1. **YAML config file** — base configuration (default `config.yaml`; an
//!    absent file contributes nothing)
//! 2. **Environment variables** — `FRONTDESK_` prefixed, e.g.
//!    `FRONTDESK_PORT=8080`
//! 3. **DATABASE_URL** — special case, overrides `database_url` if set

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "FRONTDESK_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// SQLite connection URL, e.g. "sqlite://frontdesk.db"
    pub database_url: String,
    /// Maximum connections in the pool
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
            database_url: "sqlite://frontdesk.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Config {
    /// Load configuration from the YAML file and environment overrides.
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let mut config: Config = Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("FRONTDESK_"))
            .extract()?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "127.0.0.1:5001");
        assert!(config.database_url.starts_with("sqlite://"));
    }
}
