use passgate_infra::config::FeatureConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

fn default_ttl_access_token() -> u64 {
    15 * SECONDS_PER_DAY
}

fn default_ttl_refresh_token() -> u64 {
    30 * SECONDS_PER_DAY
}

// six months, fixed at 180 days as lifetimes are absolute durations
fn default_ttl_personal_access_token() -> u64 {
    180 * SECONDS_PER_DAY
}

fn default_scope_catalog() -> HashMap<String, String> {
    [
        ("read", "Read user information"),
        ("write", "Modify user information"),
    ]
    .into_iter()
    .map(|(name, description)| (name.to_string(), description.to_string()))
    .collect()
}

fn default_default_scopes() -> Vec<String> {
    vec!["read".to_string()]
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTtlConfig {
    /// The maximum time to live for an access token in seconds
    #[serde(default = "default_ttl_access_token")]
    pub ttl_access_token: u64,
    /// The maximum time to live for a refresh token in seconds
    #[serde(default = "default_ttl_refresh_token")]
    pub ttl_refresh_token: u64,
    /// The maximum time to live for a personal access token in seconds
    #[serde(default = "default_ttl_personal_access_token")]
    pub ttl_personal_access_token: u64,
}

impl Default for TokenTtlConfig {
    fn default() -> Self {
        Self {
            ttl_access_token: default_ttl_access_token(),
            ttl_refresh_token: default_ttl_refresh_token(),
            ttl_personal_access_token: default_ttl_personal_access_token(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeConfig {
    /// Scope names with their human readable descriptions.
    #[serde(default = "default_scope_catalog")]
    pub scopes: HashMap<String, String>,
    /// The scopes granted to a token request that names none.
    #[serde(default = "default_default_scopes")]
    pub default_scopes: Vec<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            scopes: default_scope_catalog(),
            default_scopes: default_default_scopes(),
        }
    }
}

/// The auth feature configuration. Every field falls back to the built-in policy,
/// so an empty section is a valid deployment.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    #[serde(flatten)]
    pub token: TokenTtlConfig,

    #[serde(flatten)]
    pub scope: ScopeConfig,
}

impl FeatureConfig for AuthConfig {
    const NAME: &'static str = "auth";
}
