//! `shopsync sync` — propagate templates to target shops.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use shopsync_sync::{action::ThemeIdParam, ActionRequest, ActionResponse};

use super::{print_json, GlobalOpts, Session};

/// Arguments for `shopsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Shop to copy from.
    #[arg(long)]
    pub source: String,

    /// Theme id on the source shop.
    #[arg(long = "theme", value_name = "ID")]
    pub theme_id: String,

    /// Template key to copy, e.g. "templates/index.json". Repeatable.
    #[arg(long = "template", value_name = "KEY", required = true)]
    pub templates: Vec<String>,

    /// Shop to copy into (its main theme). Repeatable.
    #[arg(long = "target", value_name = "SHOP", required = true)]
    pub targets: Vec<String>,
}

impl SyncArgs {
    pub fn run(self, opts: &GlobalOpts) -> Result<()> {
        let session = Session::open(opts)?;
        let response = session.dispatch(&ActionRequest {
            action: Some("sync".to_string()),
            source_shop_domain: Some(self.source),
            source_theme_id: Some(ThemeIdParam::Text(self.theme_id)),
            template_keys: Some(self.templates),
            target_shop_domains: Some(self.targets),
            ..Default::default()
        });

        if opts.json {
            print_json(&response)?;
            if !response.success() {
                bail!("sync did not complete successfully");
            }
            return Ok(());
        }

        match response {
            ActionResponse::Sync(result) if result.success => {
                println!("{} {}", "✓".green().bold(), result.message);
                Ok(())
            }
            ActionResponse::Sync(result) => {
                println!("{} {}", "✗".red().bold(), result.message);
                for error in &result.errors {
                    println!("  {} {error}", "-".red());
                }
                bail!("{}", result.message)
            }
            ActionResponse::Reply(reply) => {
                bail!(
                    "sync failed: {}",
                    reply.error.unwrap_or_else(|| "unknown error".to_string())
                )
            }
        }
    }
}
