//! Blocking HTTP implementation of [`StorefrontClient`] on top of `ureq`.
//!
//! # Endpoints
//!
//! | Operation         | Request                                              |
//! |-------------------|------------------------------------------------------|
//! | `list_themes`     | `GET  {base}/themes.json`                            |
//! | `get_theme`       | `GET  {base}/themes/{id}.json`                       |
//! | `list_assets`     | `GET  {base}/themes/{id}/assets.json`                |
//! | `get_asset`       | `GET  {base}/themes/{id}/assets.json?asset[key]=...` |
//! | `create_asset`    | `PUT  {base}/themes/{id}/assets.json`                |
//! | `run_graph_query` | `POST {base}/graphql.json`                           |
//!
//! `{base}` is `https://<shop>.myshopify.com/admin/api/<api_version>`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use shopsync_core::{Asset, ShopConfig, ShopDomain, ShopifyConfig, Theme, ThemeId};

use crate::error::ClientError;
use crate::StorefrontClient;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ThemesEnvelope {
    themes: Vec<Theme>,
}

#[derive(Deserialize)]
struct ThemeEnvelope {
    theme: Theme,
}

#[derive(Deserialize)]
struct AssetsEnvelope {
    assets: Vec<Asset>,
}

#[derive(Deserialize)]
struct AssetEnvelope {
    asset: Asset,
}

#[derive(Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Storefront client backed by one shared `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct HttpStorefrontClient {
    agent: ureq::Agent,
    config: ShopifyConfig,
    origin: Option<String>,
}

impl HttpStorefrontClient {
    /// Build a client for every shop in `config`.
    pub fn new(config: ShopifyConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Self {
            agent: builder.build(),
            config,
            origin: None,
        }
    }

    /// Send every request to `origin` (e.g. `http://127.0.0.1:4010`) instead
    /// of `https://<shop>.myshopify.com`.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into().trim_end_matches('/').to_string());
        self
    }

    pub fn config(&self) -> &ShopifyConfig {
        &self.config
    }

    /// `{origin}/admin/api/{api_version}` for `shop`.
    pub fn base_url(&self, shop: &ShopDomain) -> String {
        let origin = match &self.origin {
            Some(origin) => origin.clone(),
            None => format!("https://{}", shop.myshopify_domain()),
        };
        format!("{origin}/admin/api/{}", self.config.api_version)
    }

    fn shop_config(&self, shop: &ShopDomain) -> Result<&ShopConfig, ClientError> {
        self.config
            .shop(shop)
            .ok_or_else(|| ClientError::UnknownShop(shop.clone()))
    }

    fn request(&self, method: &str, shop: &ShopDomain, path: &str) -> Result<ureq::Request, ClientError> {
        let creds = self.shop_config(shop)?;
        let url = format!("{}{}", self.base_url(shop), path);
        tracing::debug!(%shop, method, %url, "storefront request");
        Ok(self
            .agent
            .request(method, &url)
            .set(ACCESS_TOKEN_HEADER, &creds.access_token)
            .set("Content-Type", "application/json"))
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        shop: &ShopDomain,
        path: &str,
        what: &str,
    ) -> Result<T, ClientError> {
        let request = self.request("GET", shop, path)?;
        decode(request.call(), what)
    }
}

impl StorefrontClient for HttpStorefrontClient {
    fn list_themes(&self, shop: &ShopDomain) -> Result<Vec<Theme>, ClientError> {
        let env: ThemesEnvelope = self.get_json(shop, "/themes.json", "themes")?;
        Ok(env.themes)
    }

    fn get_theme(&self, shop: &ShopDomain, theme_id: ThemeId) -> Result<Theme, ClientError> {
        let env: ThemeEnvelope =
            self.get_json(shop, &format!("/themes/{theme_id}.json"), &format!("theme {theme_id}"))?;
        Ok(env.theme)
    }

    fn list_assets(&self, shop: &ShopDomain, theme_id: ThemeId) -> Result<Vec<Asset>, ClientError> {
        let env: AssetsEnvelope = self.get_json(
            shop,
            &format!("/themes/{theme_id}/assets.json"),
            &format!("assets of theme {theme_id}"),
        )?;
        Ok(env.assets)
    }

    fn get_asset(
        &self,
        shop: &ShopDomain,
        theme_id: ThemeId,
        key: &str,
    ) -> Result<Asset, ClientError> {
        let request = self
            .request("GET", shop, &format!("/themes/{theme_id}/assets.json"))?
            .query("asset[key]", key);
        let env: AssetEnvelope = decode(request.call(), &format!("asset {key}"))?;
        Ok(env.asset)
    }

    fn create_asset(
        &self,
        shop: &ShopDomain,
        theme_id: ThemeId,
        key: &str,
        value: &str,
    ) -> Result<Asset, ClientError> {
        let request = self.request("PUT", shop, &format!("/themes/{theme_id}/assets.json"))?;
        let body = json!({ "asset": Asset::new(key, value) });
        let env: AssetEnvelope = decode(request.send_json(body), &format!("asset {key}"))?;
        tracing::debug!(%shop, %theme_id, key, "asset written");
        Ok(env.asset)
    }

    fn run_graph_query(
        &self,
        shop: &ShopDomain,
        query: &str,
        variables: Option<Value>,
    ) -> Result<Value, ClientError> {
        let request = self.request("POST", shop, "/graphql.json")?;
        let mut body = json!({ "query": query });
        if let Some(variables) = variables {
            body["variables"] = variables;
        }
        let env: GraphQlEnvelope = decode(request.send_json(body), "graphql")?;
        match env.data {
            Some(data) if !data.is_null() => Ok(data),
            _ if !env.errors.is_empty() => Err(ClientError::GraphQl(
                env.errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            )),
            _ => Ok(Value::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

/// Map a ureq outcome to a decoded body or a [`ClientError`].
fn decode<T: DeserializeOwned>(
    outcome: Result<ureq::Response, ureq::Error>,
    what: &str,
) -> Result<T, ClientError> {
    match outcome {
        Ok(response) => response
            .into_json::<T>()
            .map_err(|e| ClientError::Decode(format!("{what}: {e}"))),
        Err(ureq::Error::Status(404, _)) => Err(ClientError::NotFound(what.to_string())),
        Err(ureq::Error::Status(status, response)) => {
            let status_text = response.status_text().to_string();
            let body = response.into_string().unwrap_or_default();
            let message = if body.trim().is_empty() {
                status_text
            } else {
                format!("{status_text}: {}", body.trim())
            };
            Err(ClientError::Transport { status, message })
        }
        Err(ureq::Error::Transport(transport)) => {
            Err(ClientError::Connection(transport.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
