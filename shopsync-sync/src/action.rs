//! Single JSON entry point for callers that schedule or front the sync.
//!
//! A request names an `action` plus whichever parameters it needs:
//!
//! | action         | parameters                                                        | `data`                 |
//! |----------------|-------------------------------------------------------------------|------------------------|
//! | `getShops`     | —                                                                 | configured shops       |
//! | `getThemes`    | `shopDomain`                                                      | non-unpublished themes |
//! | `getTemplates` | `shopDomain`, `themeId`                                           | template assets        |
//! | `sync`         | `sourceShopDomain`, `sourceThemeId`, `templateKeys`, `targetShopDomains` | (a [`SyncResult`]) |
//!
//! [`dispatch`] never fails: every error becomes `{success: false, error}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use shopsync_client::StorefrontClient;
use shopsync_core::{ShopDomain, ShopifyConfig, SyncResult, ThemeId, ThemeRole};
use shopsync_template::filter_templates;

use crate::error::SyncError;
use crate::orchestrator::{SyncRequest, TemplateSync};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A theme id as sent by callers: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeIdParam {
    Number(u64),
    Text(String),
}

impl ThemeIdParam {
    fn parse(&self, field: &str) -> Result<ThemeId, SyncError> {
        match self {
            ThemeIdParam::Number(n) => Ok(ThemeId(*n)),
            ThemeIdParam::Text(s) => s.parse().map_err(|_| {
                SyncError::InvalidRequest(format!("{field} must be a numeric theme id, got '{s}'"))
            }),
        }
    }
}

/// JSON request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<ThemeIdParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_shop_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_theme_id: Option<ThemeIdParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_shop_domains: Option<Vec<String>>,
}

/// Generic JSON reply for the listing actions and for failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionReply {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// JSON response: a sync result for `sync`, a generic reply otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionResponse {
    Sync(SyncResult),
    Reply(ActionReply),
}

impl ActionResponse {
    pub fn success(&self) -> bool {
        match self {
            ActionResponse::Sync(result) => result.success,
            ActionResponse::Reply(reply) => reply.success,
        }
    }
}

/// Shop entry returned by `getShops`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopSummary {
    pub id: ShopDomain,
    pub myshopify_domain: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetShops,
    GetThemes,
    GetTemplates,
    Sync,
}

impl FromStr for Action {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "getShops" => Ok(Action::GetShops),
            "getThemes" => Ok(Action::GetThemes),
            "getTemplates" => Ok(Action::GetTemplates),
            "sync" => Ok(Action::Sync),
            other => Err(SyncError::InvalidRequest(format!("Unknown action: {other}"))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::GetShops => "getShops",
            Action::GetThemes => "getThemes",
            Action::GetTemplates => "getTemplates",
            Action::Sync => "sync",
        })
    }
}

/// Run one request to completion.
pub fn dispatch<C: StorefrontClient + ?Sized>(
    config: &ShopifyConfig,
    client: &C,
    request: &ActionRequest,
) -> ActionResponse {
    match run(config, client, request) {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "template sync action failed");
            ActionResponse::Reply(ActionReply::error(err.to_string()))
        }
    }
}

fn run<C: StorefrontClient + ?Sized>(
    config: &ShopifyConfig,
    client: &C,
    request: &ActionRequest,
) -> Result<ActionResponse, SyncError> {
    let action: Action = request
        .action
        .as_deref()
        .ok_or_else(|| SyncError::InvalidRequest("action is required".to_string()))?
        .parse()?;
    tracing::debug!(%action, "dispatching action");

    match action {
        Action::GetShops => {
            let shops = list_shops(config);
            Ok(reply(serde_json::to_value(shops)))
        }
        Action::GetThemes => {
            let shop = required_shop(request)?;
            let themes: Vec<_> = client
                .list_themes(&shop)?
                .into_iter()
                .filter(|t| t.role != ThemeRole::Unpublished)
                .collect();
            Ok(reply(serde_json::to_value(themes)))
        }
        Action::GetTemplates => {
            let (shop, theme_id) = match (&request.shop_domain, &request.theme_id) {
                (Some(shop), Some(theme_id)) => {
                    (ShopDomain::from(shop.as_str()), theme_id.parse("themeId")?)
                }
                _ => {
                    return Err(SyncError::InvalidRequest(
                        "Shop domain and theme ID are required".to_string(),
                    ))
                }
            };
            let templates = filter_templates(client.list_assets(&shop, theme_id)?);
            Ok(reply(serde_json::to_value(templates)))
        }
        Action::Sync => {
            let sync_request = sync_request(request)?;
            let result = TemplateSync::new(client).sync_templates(&sync_request)?;
            Ok(ActionResponse::Sync(result))
        }
    }
}

/// Configured shops in config order.
pub fn list_shops(config: &ShopifyConfig) -> Vec<ShopSummary> {
    config
        .shops
        .iter()
        .map(|shop| ShopSummary {
            id: shop.shop.clone(),
            myshopify_domain: shop.shop.myshopify_domain(),
            name: shop.title.clone(),
        })
        .collect()
}

fn reply(data: Result<Value, serde_json::Error>) -> ActionResponse {
    match data {
        Ok(value) => ActionResponse::Reply(ActionReply::ok(value)),
        Err(err) => ActionResponse::Reply(ActionReply::error(format!(
            "failed to encode response: {err}"
        ))),
    }
}

fn required_shop(request: &ActionRequest) -> Result<ShopDomain, SyncError> {
    request
        .shop_domain
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(ShopDomain::from)
        .ok_or_else(|| SyncError::InvalidRequest("Shop domain is required".to_string()))
}

fn sync_request(request: &ActionRequest) -> Result<SyncRequest, SyncError> {
    match (
        &request.source_shop_domain,
        &request.source_theme_id,
        &request.template_keys,
        &request.target_shop_domains,
    ) {
        (Some(source), Some(theme_id), Some(keys), Some(targets)) => Ok(SyncRequest::new(
            source.as_str(),
            theme_id.parse("sourceThemeId")?,
            keys.iter().cloned(),
            targets.iter().map(|t| ShopDomain::from(t.as_str())),
        )),
        _ => Err(SyncError::InvalidRequest(
            "sourceShopDomain, sourceThemeId, templateKeys, and targetShopDomains are required"
                .to_string(),
        )),
    }
}
