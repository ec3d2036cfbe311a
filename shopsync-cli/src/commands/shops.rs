//! `shopsync shops` — list configured shops.

use anyhow::Result;
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use shopsync_sync::{action::ShopSummary, ActionRequest};

use super::{print_json, reply_data, GlobalOpts, Session};

/// Arguments for `shopsync shops`.
#[derive(Args, Debug)]
pub struct ShopsArgs {}

#[derive(Tabled)]
struct ShopRow {
    #[tabled(rename = "shop")]
    id: String,
    #[tabled(rename = "domain")]
    domain: String,
    #[tabled(rename = "name")]
    name: String,
}

impl ShopsArgs {
    pub fn run(self, opts: &GlobalOpts) -> Result<()> {
        let session = Session::open(opts)?;
        let response = session.dispatch(&ActionRequest {
            action: Some("getShops".to_string()),
            ..Default::default()
        });
        if opts.json {
            return print_json(&response);
        }

        let shops: Vec<ShopSummary> = reply_data(response)?;
        let rows: Vec<ShopRow> = shops
            .into_iter()
            .map(|s| ShopRow {
                id: s.id.to_string(),
                domain: s.myshopify_domain,
                name: s.name,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
