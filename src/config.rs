use crate::constants::*;
use crate::error::{Result, ScraperError};
use crate::normalize::{NumericNormalizer, SignPolicy};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime configuration. Every section is optional; a missing `config.toml`
/// yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub normalizer: NormalizerConfig,
    pub urls: SourceUrls,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub sign_policy: SignPolicy,
}

impl NormalizerConfig {
    pub fn normalizer(&self) -> NumericNormalizer {
        NumericNormalizer::new(self.sign_policy)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceUrls {
    pub marketbeat_unusual_calls: String,
    pub marketbeat_unusual_puts: String,
    pub yahoo_futures: String,
    pub yahoo_indices: String,
    pub yahoo_crypto: String,
    pub yahoo_trending: String,
    pub yahoo_most_active: String,
    pub yahoo_gainers: String,
    pub yahoo_losers: String,
    pub yahoo_watchlists_base: String,
    pub cboe_put_call: String,
    pub bls_cpi_schedule: String,
    pub retail_sales_calendar: String,
    pub marketwatch_ratings: String,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            marketbeat_unusual_calls: MARKETBEAT_UNUSUAL_CALLS_URL.to_string(),
            marketbeat_unusual_puts: MARKETBEAT_UNUSUAL_PUTS_URL.to_string(),
            yahoo_futures: YAHOO_FUTURES_URL.to_string(),
            yahoo_indices: YAHOO_INDICES_URL.to_string(),
            yahoo_crypto: YAHOO_CRYPTO_URL.to_string(),
            yahoo_trending: YAHOO_TRENDING_URL.to_string(),
            yahoo_most_active: YAHOO_MOST_ACTIVE_URL.to_string(),
            yahoo_gainers: YAHOO_GAINERS_URL.to_string(),
            yahoo_losers: YAHOO_LOSERS_URL.to_string(),
            yahoo_watchlists_base: YAHOO_WATCHLISTS_BASE_URL.to_string(),
            cboe_put_call: CBOE_PUT_CALL_URL.to_string(),
            bls_cpi_schedule: BLS_CPI_SCHEDULE_URL.to_string(),
            retail_sales_calendar: RETAIL_SALES_CALENDAR_URL.to_string(),
            marketwatch_ratings: MARKETWATCH_RATINGS_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads from `$MARKET_SCRAPER_CONFIG`, falling back to `./config.toml`.
    /// A missing default file is not an error; a missing explicit one is.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_path(path),
            Err(_) => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_path(default_path)
                } else {
                    debug!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.http.timeout_seconds == 0 {
            return Err(ScraperError::Config(
                "http.timeout_seconds must be greater than zero".into(),
            ));
        }
        Ok(config)
    }
}
