use crate::{
    app_config::AuthConfig,
    services::{ScopeError, ScopeRegistry, TokenSettings, TokenSettingsError},
};
use anyhow::Error as AnyError;
use passgate_infra::config::AppConfig;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AuthSettingsError {
    #[error(transparent)]
    TokenSettings(#[from] TokenSettingsError),

    #[error(transparent)]
    Scope(#[from] ScopeError),
}

/// The validated token and scope policy of the process. Built once at bootstrap,
/// read-only afterwards.
#[derive(Clone, Debug)]
pub struct AuthSettings {
    pub token: TokenSettings,
    pub scopes: ScopeRegistry,
}

impl AuthSettings {
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthSettingsError> {
        let token = TokenSettings::from_config(&config.token)?;
        let scopes = ScopeRegistry::from_config(&config.scope)?;
        Ok(Self { token, scopes })
    }

    /// Bootstrap hook: load the stage configuration and build the runtime settings.
    pub fn load(stage: &str, config_file: Option<PathBuf>) -> Result<Self, AnyError> {
        let config = AppConfig::<AuthConfig>::load(stage, config_file)?;
        let settings = Self::from_config(&config.feature)?;

        let mut default_scopes: Vec<_> = settings.scopes.default_scopes().iter().map(String::as_str).collect();
        default_scopes.sort_unstable();
        log::info!(
            "Token policy: access {}s, refresh {}s, personal access {}s, scopes [{}], default [{}]",
            settings.token.ttl_access_token.num_seconds(),
            settings.token.ttl_refresh_token.num_seconds(),
            settings.token.ttl_personal_access_token.num_seconds(),
            settings.scopes.names().join(", "),
            default_scopes.join(", ")
        );

        Ok(settings)
    }
}

#[cfg(test)]
#[path = "./settings_service_test.rs"]
mod settings_service_test;
