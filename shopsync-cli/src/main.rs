//! shopsync — copy storefront theme templates between shops.
//!
//! # Usage
//!
//! ```text
//! shopsync shops
//! shopsync themes <shop>
//! shopsync templates <shop> <theme-id>
//! shopsync sync --source <shop> --theme <id> --template <key>... --target <shop>...
//! shopsync action [--request <json>]
//! ```
//!
//! Global flags: `--config <path>` (YAML; otherwise `$SHOPIFY` or
//! `~/.shopsync/config.yaml`) and `--json` (print raw responses).

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    action::ActionArgs, shops::ShopsArgs, sync::SyncArgs, templates::TemplatesArgs,
    themes::ThemesArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "shopsync",
    version,
    about = "Propagate theme templates, sections and images across storefronts",
    long_about = None,
)]
struct Cli {
    /// YAML config file with API version and shop credentials.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print raw JSON responses instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List configured shops.
    Shops(ShopsArgs),

    /// List a shop's themes (unpublished themes are hidden).
    Themes(ThemesArgs),

    /// List the JSON templates of a theme.
    Templates(TemplatesArgs),

    /// Copy templates from a source theme to the main theme of each target shop.
    Sync(SyncArgs),

    /// Run a raw JSON action request and print the JSON response.
    Action(ActionArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let opts = commands::GlobalOpts {
        config: cli.config,
        json: cli.json,
    };
    match cli.command {
        Commands::Shops(args) => args.run(&opts),
        Commands::Themes(args) => args.run(&opts),
        Commands::Templates(args) => args.run(&opts),
        Commands::Sync(args) => args.run(&opts),
        Commands::Action(args) => args.run(&opts),
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
