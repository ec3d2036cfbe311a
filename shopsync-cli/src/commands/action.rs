//! `shopsync action` — raw JSON request in, JSON response out.
//!
//! Failures are part of the response body, so this command exits 0 whenever
//! it could read a request and print a response.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Args;

use shopsync_sync::ActionRequest;

use super::{print_json, GlobalOpts, Session};

/// Arguments for `shopsync action`.
#[derive(Args, Debug)]
pub struct ActionArgs {
    /// JSON request body. Read from stdin when omitted.
    #[arg(long, value_name = "JSON")]
    pub request: Option<String>,
}

impl ActionArgs {
    pub fn run(self, opts: &GlobalOpts) -> Result<()> {
        let raw = match self.request {
            Some(raw) => raw,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read request from stdin")?;
                buf
            }
        };
        let request: ActionRequest =
            serde_json::from_str(&raw).context("request is not a valid action JSON object")?;

        let session = Session::open(opts)?;
        print_json(&session.dispatch(&request))
    }
}
