//! Client-side validation configuration
//!
//! Models never read global state. A `Configuration` is passed to every
//! constructor; `Configuration::shared()` exists for the deserialization
//! and CLI boundaries only.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. CLI flags (`--no-validation`)
//! 2. Environment variable (`PIPELINE_MODELS_CLIENT_SIDE_VALIDATION`)
//! 3. Defaults (validation enabled)

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Environment variable toggling client-side validation
pub const VALIDATION_ENV: &str = "PIPELINE_MODELS_CLIENT_SIDE_VALIDATION";

static SHARED: Lazy<Configuration> = Lazy::new(|| match Configuration::from_env() {
    Ok(config) => config,
    Err(e) => {
        tracing::warn!(error = %e, "Falling back to default configuration");
        Configuration::default()
    }
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Reject null required fields at construction/assignment
    pub client_side_validation: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            client_side_validation: true,
        }
    }
}

impl Configuration {
    pub fn without_validation() -> Self {
        Self {
            client_side_validation: false,
        }
    }

    /// Process-wide default, initialized from the environment on first use
    pub fn shared() -> &'static Configuration {
        &SHARED
    }

    /// Load from `PIPELINE_MODELS_CLIENT_SIDE_VALIDATION`
    ///
    /// Missing variable keeps the default.
    pub fn from_env() -> Result<Self> {
        match std::env::var(VALIDATION_ENV) {
            Ok(raw) => Ok(Self {
                client_side_validation: parse_flag(&raw)?,
            }),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(ModelError::ConfigError {
                reason: format!("{}: {}", VALIDATION_ENV, e),
            }),
        }
    }

    /// Apply a CLI override on top of this configuration
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.client_side_validation = enabled;
        self
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ModelError::ConfigError {
            reason: format!("{}: expected a boolean, got '{}'", VALIDATION_ENV, other),
        }),
    }
}
