//! Configuration file loading with precedence handling.

use crate::model::ProductLimits;
use crate::table::PageSize;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "CARGOTRACK_CONFIG";
/// Environment variable overriding the page size.
pub const ENV_PAGE_SIZE: &str = "CARGOTRACK_PAGE_SIZE";
/// Environment variable overriding the reverse geocoding endpoint.
pub const ENV_GEOCODER_URL: &str = "CARGOTRACK_GEOCODER_URL";

/// Default reverse geocoding endpoint (Nominatim).
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting parsed but its value is unusable.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting name (config key or environment variable).
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/cargotrack/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows per table page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Query length at which search starts filtering as you type.
    #[serde(default)]
    pub search_min_chars: Option<usize>,

    /// Default product count that ends aggregation.
    #[serde(default)]
    pub max_products: Option<u32>,

    /// Default aggregate weight (kg) that ends aggregation.
    #[serde(default)]
    pub max_weight_kg: Option<f64>,

    /// Refuse departure dates before today in the add form.
    #[serde(default)]
    pub reject_past_departure: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Reverse geocoding section.
    #[serde(default)]
    pub geocoding: Option<GeocodingSection>,
}

/// `[geocoding]` section from TOML.
///
/// ```toml
/// [geocoding]
/// enabled = true
/// endpoint = "https://nominatim.openstreetmap.org/reverse"
/// timeout_ms = 5000
/// retries = 1
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeocodingSection {
    /// Whether map clicks are resolved to place names at all.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Reverse geocoding URL.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Per-request timeout in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Extra attempts after a failed request.
    #[serde(default)]
    pub retries: Option<u32>,
    /// `User-Agent` header sent with each request.
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Resolved geocoding settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodingConfig {
    /// Whether lookups are performed.
    pub enabled: bool,
    /// Reverse geocoding URL.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra attempts after a failed request.
    pub retries: u32,
    /// `User-Agent` header.
    pub user_agent: String,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_GEOCODER_URL.to_string(),
            timeout: Duration::from_millis(5000),
            retries: 1,
            user_agent: concat!("cargotrack/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Rows per table page.
    pub page_size: PageSize,
    /// Live search threshold.
    pub search_min_chars: usize,
    /// Default product thresholds.
    pub limits: ProductLimits,
    /// Whether past departure dates are refused.
    pub reject_past_departure: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Reverse geocoding settings.
    pub geocoding: GeocodingConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            search_min_chars: 3,
            limits: ProductLimits::default(),
            reject_past_departure: false,
            log_file_path: default_log_path(),
            geocoding: GeocodingConfig::default(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/cargotrack/cargotrack.log` on Linux, or the
/// platform equivalent. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("cargotrack").join("cargotrack.log")
    } else {
        PathBuf::from("cargotrack.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/cargotrack/config.toml` on Linux.
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cargotrack").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CARGOTRACK_CONFIG` environment variable
/// 3. Default path `~/.config/cargotrack/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// # Errors
///
/// `ConfigError::InvalidValue` when `page_size` is zero or a product
/// threshold is not positive.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let page_size = match config.page_size {
        Some(raw) => PageSize::new(raw).ok_or_else(|| invalid("page_size", "must be at least 1"))?,
        None => defaults.page_size,
    };

    let max_products = config.max_products.unwrap_or(defaults.limits.max_products);
    if max_products == 0 {
        return Err(invalid("max_products", "must be at least 1"));
    }

    let max_weight_kg = config
        .max_weight_kg
        .unwrap_or(defaults.limits.max_weight_kg);
    if max_weight_kg.is_nan() || max_weight_kg <= 0.0 {
        return Err(invalid("max_weight_kg", "must be a positive number"));
    }

    let geocoding = merge_geocoding(config.geocoding.unwrap_or_default(), defaults.geocoding);

    Ok(ResolvedConfig {
        page_size,
        search_min_chars: config.search_min_chars.unwrap_or(defaults.search_min_chars),
        limits: ProductLimits {
            max_products,
            max_weight_kg,
        },
        reject_past_departure: config
            .reject_past_departure
            .unwrap_or(defaults.reject_past_departure),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        geocoding,
    })
}

fn merge_geocoding(section: GeocodingSection, defaults: GeocodingConfig) -> GeocodingConfig {
    GeocodingConfig {
        enabled: section.enabled.unwrap_or(defaults.enabled),
        endpoint: section.endpoint.unwrap_or(defaults.endpoint),
        timeout: section
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.timeout),
        retries: section.retries.unwrap_or(defaults.retries),
        user_agent: section.user_agent.unwrap_or(defaults.user_agent),
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CARGOTRACK_PAGE_SIZE`: override page size
/// - `CARGOTRACK_GEOCODER_URL`: override geocoding endpoint
///
/// # Errors
///
/// `ConfigError::InvalidValue` if `CARGOTRACK_PAGE_SIZE` is not a positive integer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(ENV_PAGE_SIZE) {
        config.page_size = raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(PageSize::new)
            .ok_or_else(|| invalid(ENV_PAGE_SIZE, "must be a positive integer"))?;
    }

    if let Ok(url) = std::env::var(ENV_GEOCODER_URL) {
        config.geocoding.endpoint = url;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    page_size_override: Option<PageSize>,
    no_geocode: bool,
) -> ResolvedConfig {
    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    if no_geocode {
        config.geocoding.enabled = false;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
