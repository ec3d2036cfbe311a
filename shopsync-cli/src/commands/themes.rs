//! `shopsync themes <shop>` — list a shop's themes.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use shopsync_core::Theme;
use shopsync_sync::ActionRequest;

use super::{print_json, reply_data, GlobalOpts, Session};

/// Arguments for `shopsync themes`.
#[derive(Args, Debug)]
pub struct ThemesArgs {
    /// Shop handle, e.g. "acme-de".
    pub shop: String,
}

#[derive(Tabled)]
struct ThemeRow {
    id: u64,
    name: String,
    role: String,
}

impl ThemesArgs {
    pub fn run(self, opts: &GlobalOpts) -> Result<()> {
        let session = Session::open(opts)?;
        let response = session.dispatch(&ActionRequest {
            action: Some("getThemes".to_string()),
            shop_domain: Some(self.shop.clone()),
            ..Default::default()
        });
        if opts.json {
            return print_json(&response);
        }

        let themes: Vec<Theme> = reply_data(response)
            .with_context(|| format!("failed to list themes for '{}'", self.shop))?;
        let rows: Vec<ThemeRow> = themes
            .into_iter()
            .map(|t| ThemeRow {
                id: t.id.0,
                role: if t.is_main() {
                    t.role.to_string().green().bold().to_string()
                } else {
                    t.role.to_string()
                },
                name: t.name,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
