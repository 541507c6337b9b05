// Configuration utilities for chartmatch
//
// The configuration is a JSON document. Service settings live in a "services"
// subtree, a top-level entry with the same name is accepted as well.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde_json::Value;
use thiserror::Error;

use crate::helpers::preview::PreviewConfig;
use crate::helpers::spotify::SpotifyConfig;
use crate::logging::LoggingConfig;
use crate::matching::{ArtistAliasTable, DiacriticTable, Normalizer};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {0}")]
    InvalidValue(String),
}

/// Helper function to get service configuration with backward compatibility
///
/// This function first tries to find the service in the "services" structure,
/// then falls back to the top-level structure.
///
/// # Arguments
/// * `config` - The configuration JSON object
/// * `service_name` - The name of the service to look up (e.g., "spotify", "preview")
///
/// # Returns
/// * `Option<&serde_json::Value>` - The service configuration if found, None otherwise
///
/// # Example
/// ```rust
/// use serde_json::json;
/// use chartmatch::config::get_service_config;
///
/// let config = json!({
///   "services": {
///     "spotify": { "search_limit": 5 }
///   }
/// });
///
/// if let Some(spotify_config) = get_service_config(&config, "spotify") {
///     assert_eq!(spotify_config["search_limit"], 5);
/// }
///
/// let old_config = json!({
///   "spotify": { "search_limit": 10 }
/// });
///
/// if let Some(spotify_config) = get_service_config(&old_config, "spotify") {
///     assert_eq!(spotify_config["search_limit"], 10);
/// }
/// ```
pub fn get_service_config<'a>(config: &'a Value, service_name: &str) -> Option<&'a Value> {
    if let Some(services) = config.get("services") {
        if let Some(service_config) = services.get(service_name) {
            debug!("Found {} configuration in services section", service_name);
            return Some(service_config);
        }
    }

    if let Some(service_config) = config.get(service_name) {
        debug!("Found {} configuration at top level (legacy structure)", service_name);
        return Some(service_config);
    }

    debug!("No {} configuration found in either services section or top level", service_name);
    None
}

/// Read a JSON configuration file
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<Value, ConfigError> {
    let content = fs::read_to_string(path.as_ref())?;
    let config: Value = serde_json::from_str(&content)?;
    info!("Loaded configuration from {}", path.as_ref().display());
    Ok(config)
}

/// Everything the resolver run needs, assembled from the JSON configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub spotify: SpotifyConfig,
    pub preview: PreviewConfig,
    pub diacritics: DiacriticTable,
    pub aliases: ArtistAliasTable,
    pub logging: LoggingConfig,
    /// HTTP timeout for all services
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spotify: SpotifyConfig::default(),
            preview: PreviewConfig::default(),
            diacritics: DiacriticTable::with_defaults(),
            aliases: ArtistAliasTable::with_defaults(),
            logging: LoggingConfig::default(),
            http_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Build settings from a configuration document
    ///
    /// The "normalizer" section can add diacritic corrections
    /// (`"diacritics": {"Plain": "Accented"}`) and artist aliases
    /// (`"aliases": ["Big & Rich"]`) on top of the built-in tables.
    pub fn from_json(config: &Value) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        if let Some(spotify) = get_service_config(config, "spotify") {
            settings.spotify = SpotifyConfig::from_json(spotify);
        }
        if let Some(preview) = get_service_config(config, "preview") {
            settings.preview = PreviewConfig::from_json(preview);
        }

        if let Some(normalizer) = config.get("normalizer") {
            if let Some(diacritics) = normalizer.get("diacritics") {
                let extra: BTreeMap<String, String> = serde_json::from_value(diacritics.clone())
                    .map_err(|_| ConfigError::InvalidValue("normalizer.diacritics".to_string()))?;
                settings.diacritics.extend(&extra);
            }
            if let Some(aliases) = normalizer.get("aliases") {
                let extra: Vec<String> = serde_json::from_value(aliases.clone())
                    .map_err(|_| ConfigError::InvalidValue("normalizer.aliases".to_string()))?;
                for alias in extra {
                    settings.aliases.add(&alias);
                }
            }
        }

        if let Some(logging) = config.get("logging") {
            settings.logging = serde_json::from_value(logging.clone())
                .map_err(|_| ConfigError::InvalidValue("logging".to_string()))?;
        }

        if let Some(timeout) = config.get("http_timeout_secs") {
            settings.http_timeout_secs = timeout
                .as_u64()
                .ok_or_else(|| ConfigError::InvalidValue("http_timeout_secs".to_string()))?;
        }

        settings.spotify = settings.spotify.with_env_credentials();
        Ok(settings)
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.diacritics.clone())
    }
}
