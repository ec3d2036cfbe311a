//! Store credentials and API settings.
//!
//! # Sources
//!
//! Resolved in this order, first hit wins:
//!
//! 1. an explicit YAML file (`--config <path>`)
//! 2. the `SHOPIFY` environment variable, holding the same document as JSON
//! 3. `<home>/.shopsync/config.yaml`
//!
//! ```yaml
//! api_version: "2024-10"
//! scopes: [read_themes, write_themes, write_files]
//! timeout_secs: 30
//! shops:
//!   - shop: acme-de
//!     title: Acme Germany
//!     access_token: shpat_xxx
//! ```
//!
//! # API pattern
//!
//! As elsewhere in the workspace, path-dependent functions come in two forms:
//! `fn_at(home, …)` for tests and `fn(…)` which derives home from
//! `dirs::home_dir()`. Every loader validates before returning.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::ShopDomain;

/// Name of the environment variable carrying the JSON config document.
pub const ENV_VAR: &str = "SHOPIFY";

/// Credentials for a single storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Shop handle, without the `.myshopify.com` suffix.
    pub shop: ShopDomain,
    /// Human-readable store name.
    #[serde(default)]
    pub title: String,
    pub access_token: String,
}

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopifyConfig {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub shops: Vec<ShopConfig>,
    /// Overall per-request timeout handed to the HTTP agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ShopifyConfig {
    /// Look up the credentials of `domain`.
    pub fn shop(&self, domain: &ShopDomain) -> Option<&ShopConfig> {
        self.shops.iter().find(|s| &s.shop == domain)
    }

    /// Check every required field, reporting all missing ones at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.api_version.trim().is_empty() {
            missing.push("api_version".to_string());
        }
        if self.shops.is_empty() {
            missing.push("shops".to_string());
        }
        for (i, shop) in self.shops.iter().enumerate() {
            if shop.shop.as_str().trim().is_empty() {
                missing.push(format!("shops[{i}].shop"));
            }
            if shop.access_token.trim().is_empty() {
                missing.push(format!("shops[{i}].access_token"));
            }
        }
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let mut seen = HashSet::new();
        for shop in &self.shops {
            if !seen.insert(&shop.shop) {
                return Err(ConfigError::Invalid(format!(
                    "shop '{}' is configured more than once",
                    shop.shop
                )));
            }
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document (the `SHOPIFY` variable format).
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.shopsync/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".shopsync").join("config.yaml")
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Resolve config with an explicit environment value (testable form).
pub fn load_with_env_at(
    home: &Path,
    explicit: Option<&Path>,
    env_value: Option<&str>,
) -> Result<ShopifyConfig, ConfigError> {
    if let Some(path) = explicit {
        return ShopifyConfig::from_yaml_file(path);
    }
    if let Some(json) = env_value.filter(|v| !v.trim().is_empty()) {
        return ShopifyConfig::from_json_str(json);
    }
    let path = config_path_at(home);
    if !path.exists() {
        return Err(ConfigError::NotFound { path });
    }
    ShopifyConfig::from_yaml_file(&path)
}

/// Resolve config reading the real `SHOPIFY` variable.
pub fn load_at(home: &Path, explicit: Option<&Path>) -> Result<ShopifyConfig, ConfigError> {
    let env_value = std::env::var(ENV_VAR).ok();
    load_with_env_at(home, explicit, env_value.as_deref())
}

/// `load_at` convenience wrapper.
pub fn load(explicit: Option<&Path>) -> Result<ShopifyConfig, ConfigError> {
    load_at(&home()?, explicit)
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
