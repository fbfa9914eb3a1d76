//! Configuration loading and resolution
//!
//! Resolution priority, highest first:
//! 1. Command-line argument or environment variable (collected by the binary
//!    into [`ConfigOverrides`])
//! 2. TOML config file
//! 3. Compiled default
//!
//! The resolved [`LookupConfig`] is built once at startup and handed to the
//! upstream client and the assembler. Business logic never reads the
//! environment directly.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Compiled default for the upstream API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://raider.io/api/v1";
/// Compiled default season used when a run URL carries none
pub const DEFAULT_SEASON: &str = "season-tww-2";
/// Compiled default transport timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Compiled default listener address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

/// Resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    /// Upstream API base URL, without trailing slash
    pub api_base_url: String,
    /// Opaque upstream access key, sent as a query parameter
    pub access_key: Option<String>,
    /// Season used for run details when the run URL names none
    pub default_season: String,
    /// Season whose score snapshot is reported
    pub current_season: String,
    pub request_timeout_secs: u64,
    /// Per run-detail call budget; `None` leaves only the transport timeout
    pub detail_timeout_secs: Option<u64>,
    pub bind_address: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            access_key: None,
            default_season: DEFAULT_SEASON.to_string(),
            current_season: DEFAULT_SEASON.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            detail_timeout_secs: None,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl LookupConfig {
    /// Access key if configured and non-blank
    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref().filter(|k| is_valid_key(k))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn detail_timeout(&self) -> Option<Duration> {
        self.detail_timeout_secs.map(Duration::from_secs)
    }

    /// Check field constraints
    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "api_base_url must be an http(s) URL, got {:?}",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be greater than 0".to_string()));
        }
        if self.detail_timeout_secs == Some(0) {
            return Err(Error::Config("detail_timeout_secs must be greater than 0".to_string()));
        }
        if self.default_season.trim().is_empty() || self.current_season.trim().is_empty() {
            return Err(Error::Config("season identifiers must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Values collected from the command line and environment
///
/// Every field is optional; unset fields fall through to the TOML file and
/// then to compiled defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub access_key: Option<String>,
    pub default_season: Option<String>,
    pub current_season: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub detail_timeout_secs: Option<u64>,
    pub bind_address: Option<String>,
}

/// On-disk TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub api_base_url: Option<String>,
    pub access_key: Option<String>,
    pub default_season: Option<String>,
    pub current_season: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub detail_timeout_secs: Option<u64>,
    pub bind_address: Option<String>,
}

/// Merge overrides, TOML values and compiled defaults, then validate
pub fn resolve_config(overrides: &ConfigOverrides, toml_config: Option<&TomlConfig>) -> Result<LookupConfig> {
    let file = toml_config.cloned().unwrap_or_default();
    let defaults = LookupConfig::default();

    let config = LookupConfig {
        api_base_url: overrides
            .api_base_url
            .clone()
            .or(file.api_base_url)
            .unwrap_or(defaults.api_base_url)
            .trim_end_matches('/')
            .to_string(),
        access_key: overrides.access_key.clone().or(file.access_key),
        default_season: overrides
            .default_season
            .clone()
            .or(file.default_season)
            .unwrap_or(defaults.default_season),
        current_season: overrides
            .current_season
            .clone()
            .or(file.current_season)
            .unwrap_or(defaults.current_season),
        request_timeout_secs: overrides
            .request_timeout_secs
            .or(file.request_timeout_secs)
            .unwrap_or(defaults.request_timeout_secs),
        detail_timeout_secs: overrides.detail_timeout_secs.or(file.detail_timeout_secs),
        bind_address: overrides
            .bind_address
            .clone()
            .or(file.bind_address)
            .unwrap_or(defaults.bind_address),
    };

    config.validate()?;
    Ok(config)
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

/// Default config file location (`<config_dir>/mplus-lookup/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mplus-lookup").join("config.toml"))
}

/// Locate and load the TOML config
///
/// An explicitly named file must exist and parse. The default location is
/// optional: a missing file yields `None`, and an unparsable one is logged
/// and ignored so startup continues on defaults.
pub fn locate_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    if let Some(path) = explicit {
        let config = load_toml_config(path)?;
        info!("Loaded config file {}", path.display());
        return Ok(Some(config));
    }

    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }

    match load_toml_config(&path) {
        Ok(config) => {
            info!("Loaded config file {}", path.display());
            Ok(Some(config))
        }
        Err(e) => {
            warn!("Ignoring default config file: {}", e);
            Ok(None)
        }
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LookupConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.detail_timeout(), None);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_blank_access_key_is_ignored() {
        let config = LookupConfig {
            access_key: Some("   ".to_string()),
            ..LookupConfig::default()
        };
        assert_eq!(config.access_key(), None);
    }

    #[test]
    fn test_overrides_beat_toml_beat_defaults() {
        let overrides = ConfigOverrides {
            current_season: Some("season-cli".to_string()),
            ..ConfigOverrides::default()
        };
        let file = TomlConfig {
            current_season: Some("season-file".to_string()),
            default_season: Some("season-file-default".to_string()),
            ..TomlConfig::default()
        };

        let config = resolve_config(&overrides, Some(&file)).unwrap();
        assert_eq!(config.current_season, "season-cli");
        assert_eq!(config.default_season, "season-file-default");
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let overrides = ConfigOverrides {
            api_base_url: Some("http://localhost:9000/api/".to_string()),
            ..ConfigOverrides::default()
        };
        let config = resolve_config(&overrides, None).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000/api");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_url = ConfigOverrides {
            api_base_url: Some("ftp://example".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(matches!(resolve_config(&bad_url, None), Err(Error::Config(_))));

        let zero_timeout = ConfigOverrides {
            detail_timeout_secs: Some(0),
            ..ConfigOverrides::default()
        };
        assert!(matches!(resolve_config(&zero_timeout, None), Err(Error::Config(_))));
    }
}
