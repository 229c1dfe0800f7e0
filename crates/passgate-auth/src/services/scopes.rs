use crate::app_config::ScopeConfig;
use std::collections::{HashMap, HashSet};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ScopeError {
    #[error("Scope names must not be empty")]
    EmptyScopeName,

    #[error("Unknown {0:?} scope")]
    UnknownScope(String),

    #[error("Missing {0:?} scope to perform the operation")]
    MissingScope(String),
}

/// The scope catalog of the token issuer together with the set applied to
/// requests that name no scopes.
#[derive(Clone, Debug)]
pub struct ScopeRegistry {
    scopes: HashMap<String, String>,
    default_scopes: HashSet<String>,
}

impl ScopeRegistry {
    pub fn from_config(config: &ScopeConfig) -> Result<Self, ScopeError> {
        if config.scopes.keys().any(|name| name.is_empty()) {
            return Err(ScopeError::EmptyScopeName);
        }

        let mut default_scopes = HashSet::new();
        for name in &config.default_scopes {
            if !config.scopes.contains_key(name) {
                return Err(ScopeError::UnknownScope(name.clone()));
            }
            default_scopes.insert(name.clone());
        }

        Ok(Self {
            scopes: config.scopes.clone(),
            default_scopes,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.scopes.get(name).map(String::as_str)
    }

    /// Registered scope names in display order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.scopes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn default_scopes(&self) -> &HashSet<String> {
        &self.default_scopes
    }

    /// Resolve a token request into the granted scopes. A request naming no
    /// scopes receives the default set.
    pub fn grant(&self, requested: &[String]) -> Result<ScopeSet, ScopeError> {
        if requested.is_empty() {
            return Ok(ScopeSet {
                scopes: self.default_scopes.clone(),
            });
        }

        let mut scopes = HashSet::new();
        for name in requested {
            if !self.contains(name) {
                return Err(ScopeError::UnknownScope(name.clone()));
            }
            scopes.insert(name.clone());
        }
        Ok(ScopeSet { scopes })
    }
}

/// The scopes granted to a single token.
#[derive(Clone, Debug)]
pub struct ScopeSet {
    scopes: HashSet<String>,
}

impl ScopeSet {
    pub fn has(&self, name: &str) -> bool {
        self.scopes.contains(name)
    }

    pub fn require(&self, name: &str) -> Result<(), ScopeError> {
        if self.has(name) {
            Ok(())
        } else {
            Err(ScopeError::MissingScope(name.to_string()))
        }
    }

    pub fn scopes(&self) -> &HashSet<String> {
        &self.scopes
    }
}
