//! `shopsync templates <shop> <theme-id>` — list JSON templates of a theme.

use anyhow::{Context, Result};
use clap::Args;

use shopsync_core::Asset;
use shopsync_sync::{action::ThemeIdParam, ActionRequest};

use super::{print_json, reply_data, GlobalOpts, Session};

/// Arguments for `shopsync templates`.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Shop handle, e.g. "acme-de".
    pub shop: String,

    /// Numeric theme id (see `shopsync themes <shop>`).
    pub theme_id: String,
}

impl TemplatesArgs {
    pub fn run(self, opts: &GlobalOpts) -> Result<()> {
        let session = Session::open(opts)?;
        let response = session.dispatch(&ActionRequest {
            action: Some("getTemplates".to_string()),
            shop_domain: Some(self.shop.clone()),
            theme_id: Some(ThemeIdParam::Text(self.theme_id.clone())),
            ..Default::default()
        });
        if opts.json {
            return print_json(&response);
        }

        let templates: Vec<Asset> = reply_data(response).with_context(|| {
            format!(
                "failed to list templates for '{}' theme {}",
                self.shop, self.theme_id
            )
        })?;
        if templates.is_empty() {
            println!("No templates in theme {}.", self.theme_id);
            return Ok(());
        }
        for template in templates {
            println!("  {}", template.key);
        }
        Ok(())
    }
}
