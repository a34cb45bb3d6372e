// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::BuilderError;
use crate::signing::hex_decode;

/// Builder configuration
///
/// Loaded from YAML or built in code:
/// ```yaml
/// url: https://images.example.com
/// key: ${IMGPROXY_KEY}
/// salt: ${IMGPROXY_SALT}
/// autoreset: true
/// preset_only: false
/// options:
///   resizing_type: fill
///   quality: 80
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Base URL of the proxy, without trailing slash
    pub url: String,
    /// Hex-encoded HMAC key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Hex-encoded HMAC salt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
    /// Reset to default options after every build
    #[serde(default)]
    pub autoreset: bool,
    /// Emit only the preset directive
    #[serde(default, alias = "presetOnly")]
    pub preset_only: bool,
    /// Initial options, applied in the order written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl BuilderConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_signing(mut self, key: impl Into<String>, salt: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self.salt = Some(salt.into());
        self
    }

    pub fn with_autoreset(mut self, autoreset: bool) -> Self {
        self.autoreset = autoreset;
        self
    }

    pub fn with_preset_only(mut self, preset_only: bool) -> Self {
        self.preset_only = preset_only;
        self
    }

    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, BuilderError> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| BuilderError::invalid_config(e.to_string()))?;

        // First, check that all referenced environment variables exist
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                BuilderError::invalid_config(format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                ))
            })?;
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        serde_yaml::from_str(&substituted)
            .map_err(|e| BuilderError::invalid_config(format!("Failed to parse config: {}", e)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BuilderError> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            BuilderError::invalid_config(format!("Failed to read config file: {}", e))
        })?;
        Self::from_yaml_with_env(&yaml)
    }

    /// Key and salt, only when both are set and non-empty
    pub fn signing_pair(&self) -> Option<(&str, &str)> {
        match (self.key.as_deref(), self.salt.as_deref()) {
            (Some(key), Some(salt)) if !key.is_empty() && !salt.is_empty() => Some((key, salt)),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), BuilderError> {
        if self.url.trim().is_empty() {
            return Err(BuilderError::invalid_config("url cannot be empty"));
        }

        if let Some(key) = self.key.as_deref().filter(|k| !k.is_empty()) {
            hex_decode("key", key)?;
        }
        if let Some(salt) = self.salt.as_deref().filter(|s| !s.is_empty()) {
            hex_decode("salt", salt)?;
        }

        if let Some(options) = &self.options {
            if !options.is_object() {
                return Err(BuilderError::invalid_config(format!(
                    "options must be an object, got {}",
                    options
                )));
            }
        }

        Ok(())
    }
}
