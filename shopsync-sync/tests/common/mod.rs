//! In-memory storefront used by the sync integration tests.
//!
//! Every call is appended to a log so tests can assert on exactly which
//! requests were made, and in what order.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::{json, Value};
use shopsync_client::{ClientError, StorefrontClient};
use shopsync_core::{Asset, ShopConfig, ShopDomain, ShopifyConfig, Theme, ThemeId, ThemeRole};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListThemes(String),
    GetTheme(String, u64),
    ListAssets(String, u64),
    GetAsset(String, u64, String),
    CreateAsset(String, u64, String),
    FilesQuery(String, String),
    FileCreate(String, Vec<Value>),
}

#[derive(Debug, Clone)]
struct StoredFile {
    token: String,
    src: String,
    alt: Option<String>,
}

#[derive(Debug, Default)]
struct FakeShop {
    themes: Vec<Theme>,
    assets: HashMap<u64, BTreeMap<String, String>>,
    files: Vec<StoredFile>,
    broken_gets: HashSet<String>,
    broken_creates: HashSet<String>,
    broken_themes: bool,
    broken_graph: bool,
}

#[derive(Debug, Default)]
pub struct FakeStorefront {
    shops: RefCell<HashMap<String, FakeShop>>,
    calls: RefCell<Vec<Call>>,
}

fn transport(message: &str) -> ClientError {
    ClientError::Transport {
        status: 500,
        message: message.to_string(),
    }
}

impl FakeStorefront {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_shop(self, shop: &str, f: impl FnOnce(&mut FakeShop)) -> Self {
        f(self.shops.borrow_mut().entry(shop.to_string()).or_default());
        self
    }

    /// Register an empty shop (no themes).
    pub fn shop(self, shop: &str) -> Self {
        self.with_shop(shop, |_| {})
    }

    pub fn theme(self, shop: &str, id: u64, role: &str) -> Self {
        self.with_shop(shop, |s| {
            s.themes.push(Theme {
                id: ThemeId(id),
                name: format!("theme-{id}"),
                role: ThemeRole::from(role),
                created_at: None,
                updated_at: None,
            });
            s.assets.entry(id).or_default();
        })
    }

    pub fn asset(self, shop: &str, theme: u64, key: &str, value: &str) -> Self {
        self.with_shop(shop, |s| {
            s.assets
                .entry(theme)
                .or_default()
                .insert(key.to_string(), value.to_string());
        })
    }

    pub fn file(self, shop: &str, token: &str, src: &str, alt: Option<&str>) -> Self {
        self.with_shop(shop, |s| {
            s.files.push(StoredFile {
                token: token.to_string(),
                src: src.to_string(),
                alt: alt.map(str::to_string),
            })
        })
    }

    pub fn broken_get(self, shop: &str, key: &str) -> Self {
        self.with_shop(shop, |s| {
            s.broken_gets.insert(key.to_string());
        })
    }

    pub fn broken_create(self, shop: &str, key: &str) -> Self {
        self.with_shop(shop, |s| {
            s.broken_creates.insert(key.to_string());
        })
    }

    pub fn broken_themes(self, shop: &str) -> Self {
        self.with_shop(shop, |s| s.broken_themes = true)
    }

    pub fn broken_graph(self, shop: &str) -> Self {
        self.with_shop(shop, |s| s.broken_graph = true)
    }

    // -- inspection ---------------------------------------------------------

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn creates_on(&self, shop: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateAsset(s, _, key) if s == shop => Some(key),
                _ => None,
            })
            .collect()
    }

    pub fn graph_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::FilesQuery(..) | Call::FileCreate(..)))
            .collect()
    }

    pub fn calls_to(&self, shop: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| match c {
                Call::ListThemes(s)
                | Call::GetTheme(s, _)
                | Call::ListAssets(s, _)
                | Call::GetAsset(s, _, _)
                | Call::CreateAsset(s, _, _)
                | Call::FilesQuery(s, _)
                | Call::FileCreate(s, _) => s == shop,
            })
            .count()
    }

    pub fn stored(&self, shop: &str, theme: u64, key: &str) -> Option<String> {
        self.shops
            .borrow()
            .get(shop)
            .and_then(|s| s.assets.get(&theme))
            .and_then(|a| a.get(key).cloned())
    }

    pub fn config(&self) -> ShopifyConfig {
        let mut shops: Vec<String> = self.shops.borrow().keys().cloned().collect();
        shops.sort();
        ShopifyConfig {
            api_version: "2024-10".into(),
            scopes: vec![],
            shops: shops
                .into_iter()
                .map(|s| ShopConfig {
                    title: s.to_uppercase(),
                    shop: ShopDomain::from(s),
                    access_token: "tok".into(),
                })
                .collect(),
            timeout_secs: None,
        }
    }

    fn log(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn with<T>(
        &self,
        shop: &ShopDomain,
        f: impl FnOnce(&mut FakeShop) -> Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        let mut shops = self.shops.borrow_mut();
        let state = shops
            .get_mut(shop.as_str())
            .ok_or_else(|| ClientError::UnknownShop(shop.clone()))?;
        f(state)
    }
}

impl StorefrontClient for FakeStorefront {
    fn list_themes(&self, shop: &ShopDomain) -> Result<Vec<Theme>, ClientError> {
        self.log(Call::ListThemes(shop.to_string()));
        self.with(shop, |s| {
            if s.broken_themes {
                return Err(transport("themes unavailable"));
            }
            Ok(s.themes.clone())
        })
    }

    fn get_theme(&self, shop: &ShopDomain, theme_id: ThemeId) -> Result<Theme, ClientError> {
        self.log(Call::GetTheme(shop.to_string(), theme_id.0));
        self.with(shop, |s| {
            s.themes
                .iter()
                .find(|t| t.id == theme_id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound(format!("theme {theme_id}")))
        })
    }

    fn list_assets(&self, shop: &ShopDomain, theme_id: ThemeId) -> Result<Vec<Asset>, ClientError> {
        self.log(Call::ListAssets(shop.to_string(), theme_id.0));
        self.with(shop, |s| {
            let assets = s
                .assets
                .get(&theme_id.0)
                .ok_or_else(|| ClientError::NotFound(format!("theme {theme_id}")))?;
            Ok(assets
                .keys()
                .map(|k| Asset {
                    key: k.clone(),
                    value: None,
                    content_type: None,
                    size: None,
                    theme_id: Some(theme_id),
                    updated_at: None,
                })
                .collect())
        })
    }

    fn get_asset(
        &self,
        shop: &ShopDomain,
        theme_id: ThemeId,
        key: &str,
    ) -> Result<Asset, ClientError> {
        self.log(Call::GetAsset(shop.to_string(), theme_id.0, key.to_string()));
        self.with(shop, |s| {
            if s.broken_gets.contains(key) {
                return Err(transport("asset read failed"));
            }
            s.assets
                .get(&theme_id.0)
                .and_then(|a| a.get(key))
                .map(|v| Asset::new(key, v.as_str()))
                .ok_or_else(|| ClientError::NotFound(format!("asset {key}")))
        })
    }

    fn create_asset(
        &self,
        shop: &ShopDomain,
        theme_id: ThemeId,
        key: &str,
        value: &str,
    ) -> Result<Asset, ClientError> {
        self.log(Call::CreateAsset(shop.to_string(), theme_id.0, key.to_string()));
        self.with(shop, |s| {
            if s.broken_creates.contains(key) {
                return Err(transport("asset write failed"));
            }
            s.assets
                .entry(theme_id.0)
                .or_default()
                .insert(key.to_string(), value.to_string());
            Ok(Asset::new(key, value))
        })
    }

    fn run_graph_query(
        &self,
        shop: &ShopDomain,
        query: &str,
        variables: Option<Value>,
    ) -> Result<Value, ClientError> {
        let variables = variables.unwrap_or(Value::Null);
        if query.contains("fileCreate") {
            let files = variables["files"].as_array().cloned().unwrap_or_default();
            self.log(Call::FileCreate(shop.to_string(), files));
            return self.with(shop, |s| {
                if s.broken_graph {
                    return Err(transport("mutation failed"));
                }
                Ok(json!({"fileCreate": {"files": [], "userErrors": []}}))
            });
        }

        let search = variables["query"].as_str().unwrap_or_default().to_string();
        self.log(Call::FilesQuery(shop.to_string(), search.clone()));
        self.with(shop, |s| {
            if s.broken_graph {
                return Err(transport("query failed"));
            }
            let wanted: HashSet<&str> = search.split(" OR ").collect();
            let edges: Vec<Value> = s
                .files
                .iter()
                .filter(|f| wanted.contains(f.token.as_str()))
                .map(|f| json!({"node": {"preview": {"image": {"src": f.src, "altText": f.alt}}}}))
                .collect();
            Ok(json!({"files": {"edges": edges}}))
        })
    }
}
