//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration for glochat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Relay server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Directory for persisted session state
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            state_dir: default_state_dir(),
        }
    }
}

fn default_state_dir() -> String {
    dirs::home_dir()
        .map(|h| h.join(".glochat").join("state"))
        .unwrap_or_else(|| std::path::PathBuf::from(".glochat/state"))
        .to_string_lossy()
        .to_string()
}

/// Upstream chat-completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key; normally supplied via GLOCHAT_API_KEY
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the chat-completion API
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum completion tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_api_base() -> String {
    "https://api.x.ai/v1".to_string()
}

fn default_model() -> String {
    "grok-beta".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Relay server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
        }
    }
}
