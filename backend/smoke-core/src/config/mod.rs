use crate::error::config::ConfigError;
use crate::operations::{LoginCredentials, PostDraft};
use crate::{DEFAULT_GRAPHQL_ENDPOINT, DEFAULT_PROBE_BASE_URL};

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

pub const CONFIG_FILE_NAME: &str = "smoke.toml";
const CONFIG_VERSION: u32 = 1;

pub const ENV_PROBE_URL: &str = "SMOKE_PROBE_URL";
pub const ENV_GRAPHQL_URL: &str = "SMOKE_GRAPHQL_URL";
pub const ENV_USERNAME: &str = "SMOKE_USERNAME";
pub const ENV_PASSWORD: &str = "SMOKE_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "SMOKE_TIMEOUT_SECS";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_base_url")]
    pub base_url: String,
    #[serde(default = "default_probe_a")]
    pub a: f64,
    #[serde(default = "default_probe_b")]
    pub b: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: default_probe_base_url(),
            a: default_probe_a(),
            b: default_probe_b(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphqlConfig {
    #[serde(default = "default_graphql_endpoint")]
    pub endpoint: String,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            endpoint: default_graphql_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransportConfig {
    /// Per-request timeout. Unset means the HTTP client's own default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl TransportConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub graphql: GraphqlConfig,

    #[serde(default)]
    pub credentials: LoginCredentials,

    #[serde(default)]
    pub post: PostDraft,

    #[serde(default)]
    pub transport: TransportConfig,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            probe: ProbeConfig::default(),
            graphql: GraphqlConfig::default(),
            credentials: LoginCredentials::default(),
            post: PostDraft::default(),
            transport: TransportConfig::default(),
        }
    }
}

/// Result of attempting to load a .env file.
#[derive(Debug)]
pub struct EnvLoadResult {
    pub path: Option<PathBuf>,
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_probe_base_url() -> String {
    DEFAULT_PROBE_BASE_URL.to_string()
}
fn default_probe_a() -> f64 {
    5.0
}
fn default_probe_b() -> f64 {
    10.0
}
fn default_graphql_endpoint() -> String {
    DEFAULT_GRAPHQL_ENDPOINT.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl SmokeConfig {
    /// Load config from a TOML file.
    ///
    /// With `None`, looks for `smoke.toml` in the working directory and
    /// falls back to defaults when it is absent. An explicit path must exist.
    /// Values are not validated here; [`Self::apply_overrides_from`] validates
    /// once the environment has had its say.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = PathBuf::from(CONFIG_FILE_NAME);
                if !default_path.exists() {
                    info!(
                        "Config file not found at {}, using defaults",
                        default_path.display()
                    );
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file {}: {}", config_path.display(), e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: SmokeConfig = toml::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config TOML: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Apply `SMOKE_*` overrides from `.env` and the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        match try_load_dotenv().path {
            Some(path) => debug!("Applying overrides with {} loaded", path.display()),
            None => debug!("No .env file found - checking existing environment variables"),
        }

        self.apply_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_PROBE_URL) {
            debug!("{ENV_PROBE_URL} override: {url}");
            self.probe.base_url = url;
        }

        if let Some(url) = lookup(ENV_GRAPHQL_URL) {
            debug!("{ENV_GRAPHQL_URL} override: {url}");
            self.graphql.endpoint = url;
        }

        if let Some(username) = lookup(ENV_USERNAME) {
            debug!("{ENV_USERNAME} override: {username}");
            self.credentials.username = username;
        }

        if let Some(password) = lookup(ENV_PASSWORD) {
            debug!("{ENV_PASSWORD} override ({} chars)", password.len());
            self.credentials.password = password;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::EnvError {
                    location: ErrorLocation::from(Location::caller()),
                    variable: ENV_TIMEOUT_SECS.to_string(),
                    reason: format!("'{raw}' is not a whole number of seconds: {e}"),
                })?;
            self.transport.timeout_secs = Some(secs);
        }

        self.validate()
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        validate_http_url("probe.base_url", &self.probe.base_url)?;
        validate_http_url("graphql.endpoint", &self.graphql.endpoint)?;

        if self.credentials.username.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "credentials.username cannot be empty".to_string(),
            });
        }

        if self.transport.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "transport.timeout_secs must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[track_caller]
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: format!("Invalid URL for {field}: '{value}': {e}"),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Unsupported scheme '{other}' for {field}: {value}"),
        }),
    }
}

/// Load `.env` from the working directory, if present.
pub fn try_load_dotenv() -> EnvLoadResult {
    match dotenvy::dotenv() {
        Ok(path) => {
            info!("Loaded .env from: {}", path.display());
            EnvLoadResult { path: Some(path) }
        }
        Err(e) if e.not_found() => EnvLoadResult { path: None },
        Err(e) => {
            warn!("Failed to load .env: {e}");
            EnvLoadResult { path: None }
        }
    }
}
