/*!
 * Application configuration.
 *
 * Loads, validates and saves the settings in `conf.json`. The API credential
 * is read from the environment and never written back.
 */

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::errors::AppError;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Completion provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// File watch settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Completion provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// API key, resolved from the environment at startup and never written to disk
    #[serde(skip)]
    pub api_key: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            api_key: String::new(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory with a custom front-end; the embedded page is served when unset
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Remove quote characters from model output before replying
    #[serde(default = "default_true")]
    pub strip_quotes: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
            strip_quotes: true,
        }
    }
}

impl ServerConfig {
    /// Socket address built from host and port
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

/// Watched file configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WatchConfig {
    /// File that is reset at startup and polled afterwards
    #[serde(default = "default_watch_file")]
    pub file_path: PathBuf,

    /// Poll interval in milliseconds
    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,

    /// Language written into the template
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Style written into the template
    #[serde(default = "default_style")]
    pub default_style: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            file_path: default_watch_file(),
            check_interval_ms: default_check_interval_ms(),
            default_language: default_language(),
            default_style: default_style(),
        }
    }
}

impl WatchConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_watch_file() -> PathBuf {
    PathBuf::from("write_here.txt")
}

fn default_check_interval_ms() -> u64 {
    500
}

fn default_language() -> String {
    "english".to_string()
}

fn default_style() -> String {
    "formal".to_string()
}

impl Config {
    /// Load the configuration from `path`, writing a default file first if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            log::warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            let config_json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize default config to JSON")?;
            std::fs::write(path, config_json)
                .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;
            Ok(config)
        }
    }

    /// Read the API key from the configured environment variable
    pub fn resolve_api_key(&mut self) -> Result<(), AppError> {
        let var = &self.provider.api_key_env;
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => {
                self.provider.api_key = key.trim().to_string();
                Ok(())
            }
            _ => Err(AppError::ConfigMissing(format!(
                "API key not found, set the {} environment variable",
                var
            ))),
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.provider.model.trim().is_empty() {
            return Err(anyhow!("A model identifier is required"));
        }

        let endpoint = Url::parse(&self.provider.endpoint)
            .with_context(|| format!("Invalid provider endpoint: {}", self.provider.endpoint))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(anyhow!("Provider endpoint must use http or https: {}", endpoint));
        }

        if self.provider.timeout_secs == 0 {
            return Err(anyhow!("Provider timeout must be at least one second"));
        }

        if self.watch.check_interval_ms == 0 {
            return Err(anyhow!("Watch interval must be greater than zero"));
        }

        if self.watch.file_path.as_os_str().is_empty() {
            return Err(anyhow!("Watch file path cannot be empty"));
        }

        self.server.bind_addr()?;

        Ok(())
    }
}
