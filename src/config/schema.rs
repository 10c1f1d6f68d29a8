//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// When enabled, a missing signing secret is a startup error instead of
    /// a warning.
    #[serde(default)]
    pub production: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4850
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            production: false,
        }
    }
}

/// Token issuance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret. Interpolated from the environment in the
    /// default config (${CALLBOARD_JWT_SECRET}).
    #[serde(default)]
    pub secret: Option<String>,

    /// Credential lifetime in minutes
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

fn default_token_ttl_minutes() -> i64 {
    60
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            token_ttl_minutes: default_token_ttl_minutes(),
        }
    }
}

/// Client-side session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Callboard API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Where the bearer token is persisted between runs
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

fn default_api_url() -> String {
    "http://127.0.0.1:4850".to_string()
}

fn default_token_file() -> PathBuf {
    PathBuf::from("./.callboard/token")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token_file: default_token_file(),
        }
    }
}
