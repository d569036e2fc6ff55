//! Provider configuration.
//!
//! Built once at startup from the environment and passed by reference into
//! provider construction. Nothing reads the environment after this.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use skinprice_market_data::provider::apify_actor::DEFAULT_ACTOR_ID;
use skinprice_market_data::{PollPolicy, DEFAULT_ATTEMPT_TIMEOUT};

use crate::errors::ConfigError;

pub const ENV_CSFLOAT_API_KEY: &str = "CSFLOAT_API_KEY";
pub const ENV_APIFY_TOKEN: &str = "APIFY_TOKEN";
pub const ENV_APIFY_ACTOR_ID: &str = "APIFY_ACTOR_ID";
pub const ENV_PRICE_PROVIDERS: &str = "PRICE_PROVIDERS";
pub const ENV_POLL_INTERVAL_MS: &str = "APIFY_POLL_INTERVAL_MS";
pub const ENV_MAX_POLL_ATTEMPTS: &str = "APIFY_MAX_POLL_ATTEMPTS";
pub const ENV_PROVIDER_TIMEOUT_MS: &str = "PRICE_PROVIDER_TIMEOUT_MS";

const DEFAULT_PROVIDERS: &[ProviderSelector] = &[ProviderSelector::CsFloat, ProviderSelector::Apify];

/// A provider that can be named in `PRICE_PROVIDERS`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ProviderSelector {
    CsFloat,
    Apify,
    Buff163,
    SteamDt,
    Steam,
}

impl ProviderSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderSelector::CsFloat => "csfloat",
            ProviderSelector::Apify => "apify",
            ProviderSelector::Buff163 => "buff163",
            ProviderSelector::SteamDt => "steamdt",
            ProviderSelector::Steam => "steam",
        }
    }

    /// Environment variable holding this provider's credential, if it needs one.
    pub fn credential_var(&self) -> Option<&'static str> {
        match self {
            ProviderSelector::CsFloat => Some(ENV_CSFLOAT_API_KEY),
            ProviderSelector::Apify | ProviderSelector::Buff163 | ProviderSelector::SteamDt => {
                Some(ENV_APIFY_TOKEN)
            }
            ProviderSelector::Steam => None,
        }
    }
}

impl fmt::Display for ProviderSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csfloat" | "csgofloat" => Ok(ProviderSelector::CsFloat),
            "apify" => Ok(ProviderSelector::Apify),
            "buff163" | "buff" => Ok(ProviderSelector::Buff163),
            "steamdt" => Ok(ProviderSelector::SteamDt),
            "steam" => Ok(ProviderSelector::Steam),
            _ => Err(ConfigError::UnknownProvider(s.trim().to_string())),
        }
    }
}

/// Price provider settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderConfig {
    /// Providers in the order they are tried
    pub providers: Vec<ProviderSelector>,
    pub csfloat_api_key: Option<String>,
    pub apify_token: Option<String>,
    pub apify_actor_id: String,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    /// Deadline for one provider attempt
    pub attempt_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let poll = PollPolicy::default();
        Self {
            providers: DEFAULT_PROVIDERS.to_vec(),
            csfloat_api_key: None,
            apify_token: None,
            apify_actor_id: DEFAULT_ACTOR_ID.to_string(),
            poll_interval: poll.interval,
            max_poll_attempts: poll.max_attempts,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

impl ProviderConfig {
    /// Read and validate the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read and validate the configuration through `lookup`.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let providers = match get(ENV_PRICE_PROVIDERS) {
            Some(list) => parse_provider_list(&list)?,
            None => defaults.providers,
        };

        let config = Self {
            providers,
            csfloat_api_key: get(ENV_CSFLOAT_API_KEY),
            apify_token: get(ENV_APIFY_TOKEN),
            apify_actor_id: get(ENV_APIFY_ACTOR_ID).unwrap_or(defaults.apify_actor_id),
            poll_interval: parse_number(ENV_POLL_INTERVAL_MS, get(ENV_POLL_INTERVAL_MS))?
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            max_poll_attempts: parse_number(ENV_MAX_POLL_ATTEMPTS, get(ENV_MAX_POLL_ATTEMPTS))?
                .map(|n: u64| u32::try_from(n).unwrap_or(u32::MAX))
                .unwrap_or(defaults.max_poll_attempts),
            attempt_timeout: parse_number(ENV_PROVIDER_TIMEOUT_MS, get(ENV_PROVIDER_TIMEOUT_MS))?
                .map(Duration::from_millis)
                .unwrap_or(defaults.attempt_timeout),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that every selected provider has its credential.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.providers.is_empty() {
            return Err(ConfigError::NoProviders);
        }
        if self.max_poll_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: ENV_MAX_POLL_ATTEMPTS,
                value: "0".to_string(),
            });
        }

        for selector in &self.providers {
            let Some(variable) = selector.credential_var() else {
                continue;
            };
            if self.credential(variable).is_none() {
                return Err(ConfigError::MissingCredential {
                    provider: selector.to_string(),
                    variable,
                });
            }
        }
        Ok(())
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.poll_interval,
            max_attempts: self.max_poll_attempts,
        }
    }

    fn credential(&self, variable: &str) -> Option<&str> {
        match variable {
            ENV_CSFLOAT_API_KEY => self.csfloat_api_key.as_deref(),
            ENV_APIFY_TOKEN => self.apify_token.as_deref(),
            _ => None,
        }
    }
}

fn parse_provider_list(list: &str) -> Result<Vec<ProviderSelector>, ConfigError> {
    let mut providers = Vec::new();
    for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        let selector: ProviderSelector = name.parse()?;
        if !providers.contains(&selector) {
            providers.push(selector);
        }
    }
    Ok(providers)
}

fn parse_number(key: &'static str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    value
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue { key, value: raw })
        })
        .transpose()
}
