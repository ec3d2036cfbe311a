//! Subcommands. Each one builds an [`ActionRequest`] and runs it through the
//! same dispatcher the JSON entry point uses.

pub mod action;
pub mod shops;
pub mod sync;
pub mod templates;
pub mod themes;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use shopsync_client::HttpStorefrontClient;
use shopsync_core::{config, ShopifyConfig};
use shopsync_sync::{dispatch, ActionRequest, ActionResponse};

/// Flags shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub json: bool,
}

/// Loaded configuration plus an HTTP client built from it.
pub struct Session {
    config: ShopifyConfig,
    client: HttpStorefrontClient,
}

impl Session {
    pub fn open(opts: &GlobalOpts) -> Result<Self> {
        let config = config::load(opts.config.as_deref())
            .context("failed to load shop configuration")?;
        let client = HttpStorefrontClient::new(config.clone());
        Ok(Self { config, client })
    }

    pub fn dispatch(&self, request: &ActionRequest) -> ActionResponse {
        dispatch(&self.config, &self.client, request)
    }
}

/// Print `response` as pretty JSON.
pub fn print_json(response: &ActionResponse) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

/// Unwrap a listing reply's `data` into `T`, or turn its error into `Err`.
pub fn reply_data<T: DeserializeOwned>(response: ActionResponse) -> Result<T> {
    match response {
        ActionResponse::Reply(reply) if reply.success => {
            let data = reply.data.unwrap_or(Value::Null);
            serde_json::from_value(data).context("unexpected response data")
        }
        ActionResponse::Reply(reply) => Err(anyhow!(reply
            .error
            .unwrap_or_else(|| "unknown error".to_string()))),
        ActionResponse::Sync(_) => Err(anyhow!("unexpected sync result for a listing action")),
    }
}
