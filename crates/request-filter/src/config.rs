//! Filter settings from defaults or environment variables.

use crate::domain::errors::ConfigError;
use crate::ports::outbound::DEFAULT_REQUEST_MAX_BYTES;
use serde::{Deserialize, Serialize};
use std::env;

/// Policy every channel writer must satisfy.
pub const CHANNEL_WRITERS: &str = "/Channel/Writers";
pub const CHANNEL_READERS: &str = "/Channel/Readers";
pub const CHANNEL_ADMINS: &str = "/Channel/Admins";

/// Static settings for the admission chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Policy the signature filter evaluates against.
    pub policy_name: String,

    /// Whether client signatures are checked against the policy at all.
    pub client_signature_verification_required: bool,

    /// Largest accepted request payload.
    pub request_max_bytes: u64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            policy_name: CHANNEL_WRITERS.to_string(),
            client_signature_verification_required: false,
            request_max_bytes: DEFAULT_REQUEST_MAX_BYTES,
        }
    }
}

impl FilterSettings {
    /// Create settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RF_POLICY_NAME`: Policy name (default: /Channel/Writers)
    /// - `RF_CLIENT_SIGNATURE_VERIFICATION`: Enforce client signatures (default: false)
    /// - `RF_REQUEST_MAX_BYTES`: Max payload size in bytes (default: 1048576)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(name) = lookup("RF_POLICY_NAME") {
            settings.policy_name = name;
        }

        if let Some(val) = lookup("RF_CLIENT_SIGNATURE_VERIFICATION") {
            settings.client_signature_verification_required = match val.to_lowercase().as_str()
            {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "RF_CLIENT_SIGNATURE_VERIFICATION",
                        value: val,
                    })
                }
            };
        }

        if let Some(val) = lookup("RF_REQUEST_MAX_BYTES") {
            settings.request_max_bytes =
                val.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "RF_REQUEST_MAX_BYTES",
                    value: val.clone(),
                })?;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy_name.is_empty() {
            return Err(ConfigError::EmptyPolicyName);
        }
        if self.request_max_bytes == 0 {
            return Err(ConfigError::ZeroRequestMaxBytes);
        }
        Ok(())
    }
}
