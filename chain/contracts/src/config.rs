//! Program configuration
//!
//! Defaults match the limits of the first deployed program. Values can be
//! overridden from the environment or from a JSON document.

use crowdfunding_types::campaign::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crowdfunding_types::numeric::Lamports;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ConfigError;

/// One year.
pub const DEFAULT_MAX_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    /// Maximum campaign name length in bytes.
    pub max_name_len: usize,
    /// Maximum description length in bytes.
    pub max_description_len: usize,
    /// Longest campaign duration accepted by `create`.
    pub max_duration_secs: u64,
    /// Storage deposit the owner locks in a campaign record on creation.
    pub campaign_deposit: Lamports,
    /// Storage deposit a contributor locks in their contribution record;
    /// returned on refund.
    pub contribution_deposit: Lamports,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            max_name_len: MAX_NAME_LEN,
            max_description_len: MAX_DESCRIPTION_LEN,
            max_duration_secs: DEFAULT_MAX_DURATION_SECS,
            campaign_deposit: 0,
            contribution_deposit: 0,
        }
    }
}

impl ProgramConfig {
    /// Load overrides from `CROWDFUNDING_*` environment variables.
    ///
    /// Unset variables keep their defaults; unparsable ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            max_name_len: parse_or(&lookup, "CROWDFUNDING_MAX_NAME_LEN", defaults.max_name_len)?,
            max_description_len: parse_or(
                &lookup,
                "CROWDFUNDING_MAX_DESCRIPTION_LEN",
                defaults.max_description_len,
            )?,
            max_duration_secs: parse_or(
                &lookup,
                "CROWDFUNDING_MAX_DURATION_SECS",
                defaults.max_duration_secs,
            )?,
            campaign_deposit: parse_or(
                &lookup,
                "CROWDFUNDING_CAMPAIGN_DEPOSIT",
                defaults.campaign_deposit,
            )?,
            contribution_deposit: parse_or(
                &lookup,
                "CROWDFUNDING_CONTRIBUTION_DEPOSIT",
                defaults.contribution_deposit,
            )?,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
    }
}
