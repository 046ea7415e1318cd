//! Opal CMS Tools MCP server.
//!
//! Exposes content-management tools over MCP stdio:
//!
//! - `cms_content_types_list` / `cms_content_type_get`
//! - `cms_language_branches_list` / `cms_language_branch_get`
//! - `cms_content_get` / `cms_content_children` / `cms_content_create` /
//!   `cms_content_patch` / `cms_content_delete` / `cms_content_move`
//! - `cms_content_ask` — free-text instruction resolution
//!
//! Settings come from `--config`, the `OPAL_CONFIG` env var, or
//! `~/.config/opal/config.toml`.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use opal_ask::AskResolver;
use opal_client::CmsClient;
use opal_core::CmsSettings;
use opal_mcp::{AskTools, CompositeRegistry, ContentTools, DefinitionTools, OpalMcpServer};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings file.
    #[arg(short, long, env = "OPAL_CONFIG")]
    config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    quiet: bool,
}

/// Initialise tracing-based logging on stderr.
///
/// stdout carries the MCP protocol and must stay clean.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let settings = CmsSettings::load(args.config.as_deref())?;
    let fallback_root = settings.defaults.root.clone();
    let client = Arc::new(CmsClient::new(settings)?);

    let resolver = AskResolver::new(
        client.clone(),
        client.clone(),
        client.clone(),
        client.clone(),
    )?
    .with_fallback_root(fallback_root);

    let registry = CompositeRegistry::new()
        .with(DefinitionTools::with_shared(client.clone()))
        .with(ContentTools::with_shared(client.clone()))
        .with(AskTools::new(resolver));

    tracing::info!("starting Opal CMS MCP server");
    opal_mcp::serve_stdio(OpalMcpServer::new(registry)).await?;
    tracing::info!("Opal CMS MCP server stopped");

    Ok(())
}
