//! Command-line interface
//!
//! Every option also reads an `MPLUS_*` environment variable. Unset options
//! fall through to the TOML config file, then to compiled defaults.

use clap::Parser;
use mplus_common::config::ConfigOverrides;
use std::path::PathBuf;

/// Mythic+ character lookup service
#[derive(Debug, Parser)]
#[command(name = "mplus-lookup", version, about)]
pub struct Cli {
    /// TOML config file (default: <config dir>/mplus-lookup/config.toml)
    #[arg(long, env = "MPLUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Upstream API base URL
    #[arg(long, env = "MPLUS_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Upstream access key
    #[arg(long, env = "MPLUS_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// Season used when a run URL names none
    #[arg(long, env = "MPLUS_DEFAULT_SEASON")]
    pub default_season: Option<String>,

    /// Season whose score is reported
    #[arg(long, env = "MPLUS_CURRENT_SEASON")]
    pub current_season: Option<String>,

    /// HTTP client timeout in seconds
    #[arg(long, env = "MPLUS_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Per run-detail fetch budget in seconds
    #[arg(long, env = "MPLUS_DETAIL_TIMEOUT_SECS")]
    pub detail_timeout_secs: Option<u64>,

    /// Listen address
    #[arg(long, env = "MPLUS_BIND_ADDRESS")]
    pub bind_address: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_base_url: self.api_base_url.clone(),
            access_key: self.access_key.clone(),
            default_season: self.default_season.clone(),
            current_season: self.current_season.clone(),
            request_timeout_secs: self.request_timeout_secs,
            detail_timeout_secs: self.detail_timeout_secs,
            bind_address: self.bind_address.clone(),
        }
    }
}
