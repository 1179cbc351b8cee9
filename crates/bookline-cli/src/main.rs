//! bookline - Open Library subject loader
//!
//! Fetches one subject listing from the Open Library catalog, flattens
//! its works into book records, and appends them to a `books` table.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "bookline")]
#[command(about = "Load Open Library subject listings into a relational table")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./bookline.toml or ~/.config/bookline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Request timeout in seconds for the catalog fetch
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Run extract → transform → load for one subject
    Run(cmd::run::RunArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = Arc::new(bookline_core::ProgressContext::new());
    let multi = progress.is_tty().then(|| progress.multi());
    bookline_core::init_logging(cli.debug, multi);

    // Resolved once here (file + environment), never re-read during the run
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    bookline_core::set_http_config(bookline_core::HttpConfig {
        timeout: cli
            .timeout
            .or(config.http.timeout_secs)
            .map(Duration::from_secs),
    });

    match cli.command {
        Command::Run(args) => cmd::run::run(args, &config, &progress),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let set_or_not = |v: &Option<String>| {
                if v.is_some() { "configured" } else { "not set" }
            };
            let or_unset = |v: &Option<String>| v.clone().unwrap_or_else(|| "not set".to_string());

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            let db = &config.database;
            table.add_row(vec!["Catalog base URL".to_string(), config.catalog.base_url.clone()]);
            table.add_row(vec![
                "HTTP timeout".to_string(),
                config
                    .http
                    .timeout_secs
                    .map_or("none".to_string(), |s| format!("{s}s")),
            ]);
            table.add_row(vec!["DB host".to_string(), or_unset(&db.host)]);
            table.add_row(vec!["DB name".to_string(), or_unset(&db.name)]);
            table.add_row(vec!["DB user".to_string(), or_unset(&db.user)]);
            table.add_row(vec!["DB password".to_string(), set_or_not(&db.password).to_string()]);
            table.add_row(vec!["Database URL".to_string(), set_or_not(&db.url).to_string()]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
