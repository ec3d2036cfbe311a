//! shopsync core library — domain types, configuration, errors.
//!
//! - [`types`] — newtypes, theme/asset structs, [`SyncResult`]
//! - [`config`] — [`ShopifyConfig`] load + validation
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{ShopConfig, ShopifyConfig};
pub use error::ConfigError;
pub use types::{Asset, ShopDomain, SyncResult, Theme, ThemeId, ThemeRole};
