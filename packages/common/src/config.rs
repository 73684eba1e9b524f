use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::password::PasswordPolicy;

/// Page sizes used by the settings lists.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    /// Page size when the query does not carry one. Default: 10.
    #[serde(default = "default_page_size")]
    pub default_limit: u64,
    /// Upper bound on a requested page size. Default: 100.
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
}

fn default_page_size() -> u64 {
    10
}
fn default_max_limit() -> u64 {
    100
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_page_size(),
            max_limit: default_max_limit(),
        }
    }
}

impl ListingConfig {
    /// Clamp a requested page size into `1..=max_limit`.
    pub fn clamp_limit(&self, requested: u64) -> u64 {
        requested.clamp(1, self.max_limit.max(1))
    }

    /// Page size for a query: the requested size, or `default_limit`,
    /// clamped into `1..=max_limit`.
    pub fn page_size(&self, requested: Option<u64>) -> u64 {
        self.clamp_limit(requested.unwrap_or(self.default_limit))
    }
}

/// Application configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TallyConfig {
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub password: PasswordPolicy,
}

impl TallyConfig {
    /// Load from `config/config.toml` (or the path in `TALLYMATIC_CONFIG`),
    /// then environment overrides such as `TALLYMATIC__LISTING__MAX_LIMIT`.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("TALLYMATIC_CONFIG").unwrap_or_else(|_| "config/config".to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("listing.default_limit", 10_i64)?
            .set_default("listing.max_limit", 100_i64)?
            .set_default("password.min_length", 8_i64)?
            .set_default("password.max_length", 10_i64)?
            .set_default("password.min_digits", 4_i64)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("TALLYMATIC").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }
}
