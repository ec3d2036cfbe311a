//! # shopsync-client
//!
//! The storefront adapter: a [`StorefrontClient`] trait covering theme, asset
//! and GraphQL calls, and [`HttpStorefrontClient`], its blocking HTTP
//! implementation.
//!
//! Every call is a single blocking request/response exchange. Nothing here
//! retries or runs concurrently.

pub mod error;
pub mod http;

pub use error::ClientError;
pub use http::HttpStorefrontClient;

use serde_json::Value;
use shopsync_core::{Asset, ShopDomain, Theme, ThemeId};

/// Authenticated read/write access to a storefront's theme and query APIs.
///
/// The store is passed per call; implementations look up its credentials.
pub trait StorefrontClient {
    /// `GET /themes.json`
    fn list_themes(&self, shop: &ShopDomain) -> Result<Vec<Theme>, ClientError>;

    /// `GET /themes/{id}.json`
    fn get_theme(&self, shop: &ShopDomain, theme_id: ThemeId) -> Result<Theme, ClientError>;

    /// `GET /themes/{id}/assets.json`. Listed assets carry no `value`.
    fn list_assets(&self, shop: &ShopDomain, theme_id: ThemeId) -> Result<Vec<Asset>, ClientError>;

    /// `GET /themes/{id}/assets.json?asset[key]=<key>`.
    ///
    /// Returns [`ClientError::NotFound`] when the theme has no asset with `key`.
    fn get_asset(
        &self,
        shop: &ShopDomain,
        theme_id: ThemeId,
        key: &str,
    ) -> Result<Asset, ClientError>;

    /// `PUT /themes/{id}/assets.json`. Upsert: overwrites an existing asset.
    fn create_asset(
        &self,
        shop: &ShopDomain,
        theme_id: ThemeId,
        key: &str,
        value: &str,
    ) -> Result<Asset, ClientError>;

    /// `POST /graphql.json`. Returns the response's `data` member.
    fn run_graph_query(
        &self,
        shop: &ShopDomain,
        query: &str,
        variables: Option<Value>,
    ) -> Result<Value, ClientError>;
}
