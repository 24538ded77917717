use std::fmt::{Debug, Formatter};

use cerberus_sign_core::{utils::Redact, Context, Error, Result};

use crate::constants::*;
use crate::Credential;

/// Config carries all the configuration for signing Cerberus API requests.
#[derive(Clone, Default)]
pub struct Config {
    /// `api_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CERBERUS_API_KEY`]
    pub api_key: Option<String>,
    /// `api_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CERBERUS_API_SECRET`]
    pub api_secret: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set api_key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set api_secret
    pub fn with_api_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.api_secret = Some(api_secret.into());
        self
    }

    /// Load config from env.
    ///
    /// Values already set on this config take precedence.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(CERBERUS_API_KEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CERBERUS_API_SECRET) {
            self.api_secret.get_or_insert(v);
        }

        self
    }

    /// Build the credential described by this config.
    ///
    /// Both fields must be present. Their content is not checked: an empty
    /// value is passed through and left for the server to reject.
    pub fn credential(&self) -> Result<Credential> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            Error::config_invalid(format!(
                "api_key is required, set it explicitly or via {CERBERUS_API_KEY}"
            ))
        })?;
        let api_secret = self.api_secret.clone().ok_or_else(|| {
            Error::config_invalid(format!(
                "api_secret is required, set it explicitly or via {CERBERUS_API_SECRET}"
            ))
        })?;

        Ok(Credential::new(api_key, api_secret))
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(Redact::from))
            .field("api_secret", &self.api_secret.as_ref().map(Redact::from))
            .finish()
    }
}
