use crate::app_config::TokenTtlConfig;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    Access,
    Refresh,
    PersonalAccess,
}

impl TokenKind {
    // return if token is minted outside the standard grant flow
    pub fn is_direct_issue(&self) -> bool {
        matches!(self, Self::PersonalAccess)
    }

    pub fn all() -> &'static [TokenKind] {
        &[TokenKind::Access, TokenKind::Refresh, TokenKind::PersonalAccess]
    }
}

#[derive(Debug, ThisError)]
pub enum TokenSettingsError {
    #[error("Time to live of {0:?} tokens must be a positive number of seconds")]
    InvalidTtl(TokenKind),
}

/// Validated token lifetimes.
#[derive(Clone, Debug)]
pub struct TokenSettings {
    pub ttl_access_token: Duration,
    pub ttl_refresh_token: Duration,
    pub ttl_personal_access_token: Duration,
}

impl TokenSettings {
    pub fn from_config(config: &TokenTtlConfig) -> Result<Self, TokenSettingsError> {
        Ok(Self {
            ttl_access_token: Self::ttl_from_seconds(TokenKind::Access, config.ttl_access_token)?,
            ttl_refresh_token: Self::ttl_from_seconds(TokenKind::Refresh, config.ttl_refresh_token)?,
            ttl_personal_access_token: Self::ttl_from_seconds(
                TokenKind::PersonalAccess,
                config.ttl_personal_access_token,
            )?,
        })
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.ttl_access_token,
            TokenKind::Refresh => self.ttl_refresh_token,
            TokenKind::PersonalAccess => self.ttl_personal_access_token,
        }
    }

    /// Expiry of a token of the given kind minted at the given instant.
    pub fn expire_at(&self, kind: TokenKind, minted_at: DateTime<Utc>) -> DateTime<Utc> {
        minted_at + self.ttl(kind)
    }

    fn ttl_from_seconds(kind: TokenKind, seconds: u64) -> Result<Duration, TokenSettingsError> {
        let seconds = i64::try_from(seconds).map_err(|_| TokenSettingsError::InvalidTtl(kind))?;
        if seconds == 0 {
            return Err(TokenSettingsError::InvalidTtl(kind));
        }
        Duration::try_seconds(seconds).ok_or(TokenSettingsError::InvalidTtl(kind))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn built_in_lifetimes() {
        let settings = TokenSettings::from_config(&TokenTtlConfig::default()).unwrap();
        assert_eq!(settings.ttl(TokenKind::Access), Duration::days(15));
        assert_eq!(settings.ttl(TokenKind::Refresh), Duration::days(30));
        assert_eq!(settings.ttl(TokenKind::PersonalAccess), Duration::days(180));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let config = TokenTtlConfig {
            ttl_refresh_token: 0,
            ..Default::default()
        };
        let err = TokenSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, TokenSettingsError::InvalidTtl(TokenKind::Refresh)));
    }

    #[test]
    fn oversized_ttl_is_rejected() {
        let config = TokenTtlConfig {
            ttl_personal_access_token: u64::MAX,
            ..Default::default()
        };
        let err = TokenSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, TokenSettingsError::InvalidTtl(TokenKind::PersonalAccess)));
    }

    #[test]
    fn only_personal_access_tokens_skip_the_grant_flow() {
        assert!(TokenKind::PersonalAccess.is_direct_issue());
        assert!(!TokenKind::Access.is_direct_issue());
        assert!(!TokenKind::Refresh.is_direct_issue());
    }

    #[test]
    fn expiry_follows_kind() {
        let settings = TokenSettings::from_config(&TokenTtlConfig::default()).unwrap();
        let minted_at = Utc::now();
        for &kind in TokenKind::all() {
            assert_eq!(settings.expire_at(kind, minted_at), minted_at + settings.ttl(kind));
        }
    }
}
