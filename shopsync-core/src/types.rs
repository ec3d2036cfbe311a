//! Domain types shared by every shopsync crate.
//!
//! All values here are transient: they describe what the storefront platform
//! returned for one request, or what a sync run produced. Nothing is persisted.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// The shop handle of a storefront, e.g. `acme-de` for `acme-de.myshopify.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopDomain(pub String);

impl ShopDomain {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<shop>.myshopify.com`
    pub fn myshopify_domain(&self) -> String {
        format!("{}.myshopify.com", self.0)
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ShopDomain {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ShopDomain {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Numeric identifier of a theme within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeId(pub u64);

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ThemeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for ThemeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Publication role of a theme. Unknown roles are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ThemeRole {
    /// The live, published theme. At most one per store.
    Main,
    #[default]
    Unpublished,
    Demo,
    Development,
    Other(String),
}

impl ThemeRole {
    pub fn as_str(&self) -> &str {
        match self {
            ThemeRole::Main => "main",
            ThemeRole::Unpublished => "unpublished",
            ThemeRole::Demo => "demo",
            ThemeRole::Development => "development",
            ThemeRole::Other(s) => s,
        }
    }
}

impl From<&str> for ThemeRole {
    fn from(s: &str) -> Self {
        match s {
            "main" => ThemeRole::Main,
            "unpublished" => ThemeRole::Unpublished,
            "demo" => ThemeRole::Demo,
            "development" => ThemeRole::Development,
            other => ThemeRole::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for ThemeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ThemeRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ThemeRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ThemeRole::from(s.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A theme as returned by `GET /themes.json` and `GET /themes/{id}.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: ThemeId,
    #[serde(default)]
    pub name: String,
    pub role: ThemeRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl Theme {
    pub fn is_main(&self) -> bool {
        self.role == ThemeRole::Main
    }
}

/// A single file inside a theme. `value` is absent in list responses and for
/// binary assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Path-like key, e.g. `templates/product.json`. Never rewritten.
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<ThemeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl Asset {
    /// A bare key/value asset, as sent in an upsert body.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            content_type: None,
            size: None,
            theme_id: None,
            updated_at: None,
        }
    }

    /// The asset's text value, treating an empty string as no value.
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Sync result
// ---------------------------------------------------------------------------

/// Outcome of one template sync invocation.
///
/// Built fresh per run, handed back to the caller, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl SyncResult {
    pub fn succeeded(template_count: usize, target_count: usize) -> Self {
        Self {
            success: true,
            message: format!("{template_count} template(s) synced with {target_count} target(s)"),
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: format!("{} errors, see details", errors.len()),
            errors,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
