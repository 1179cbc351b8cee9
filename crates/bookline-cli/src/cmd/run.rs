//! `bookline run` - fetch one subject and load it into the books table

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use bookline_core::{SharedProgress, fmt_num};
use bookline_openlibrary::config::DEFAULT_CATEGORY;
use bookline_openlibrary::{BookRecord, Catalog, DbConfig};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Subject key on Open Library (e.g. fiction, science_fiction)
    #[arg(default_value = DEFAULT_CATEGORY)]
    pub category: String,

    /// Database host (overrides DB_HOST / config file)
    #[arg(long)]
    pub db_host: Option<String>,

    /// Database name (overrides DB_NAME / config file)
    #[arg(long)]
    pub db_name: Option<String>,

    /// Database user (overrides DB_USER / config file)
    #[arg(long)]
    pub db_user: Option<String>,

    /// Database password (overrides DB_PASSWORD / config file)
    #[arg(long)]
    pub db_password: Option<String>,

    /// Full connection URL, e.g. sqlite://books.db?mode=rwc (overrides the parts above)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Fetch and transform only, print a preview instead of loading
    #[arg(long)]
    pub dry_run: bool,

    /// Rows shown in the dry-run preview
    #[arg(long, default_value_t = 20)]
    pub preview_rows: usize,
}

impl RunArgs {
    /// Apply CLI overrides on top of file/env settings
    fn db_config(&self, config: &Config) -> DbConfig {
        let base = DbConfig::from(&config.database);
        DbConfig {
            host: self.db_host.clone().or(base.host),
            name: self.db_name.clone().or(base.name),
            user: self.db_user.clone().or(base.user),
            password: self.db_password.clone().or(base.password),
            url: self.database_url.clone().or(base.url),
        }
    }
}

pub fn run(args: RunArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let pipeline_config = bookline_openlibrary::Config {
        db: args.db_config(config),
        category: args.category,
        catalog: Catalog::new(config.catalog.base_url.as_str()),
        dry_run: args.dry_run,
    };

    let summary = bookline_openlibrary::run(&pipeline_config, progress)
        .with_context(|| format!("pipeline failed for '{}'", pipeline_config.category))?;

    if summary.loaded.is_none() {
        println!("{}", preview_table(&summary.records, args.preview_rows));
        if summary.records.len() > args.preview_rows {
            println!("... {} more", summary.records.len() - args.preview_rows);
        }
    }

    log::info!(
        "Done: '{}' {} works, {} rows loaded in {:.1?}",
        summary.category,
        fmt_num(summary.records.len() as u64),
        summary.loaded.map_or("no".to_string(), fmt_num),
        summary.elapsed
    );
    Ok(())
}

/// Render the first `limit` records in column order
fn preview_table(records: &[BookRecord], limit: usize) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(
            BookRecord::COLUMNS
                .iter()
                .map(|c| Cell::new(c).fg(Color::Cyan)),
        );
    for r in records.iter().take(limit) {
        table.add_row(vec![
            r.title.clone(),
            r.category.clone(),
            r.author.clone().unwrap_or_default(),
            r.published_year.map(|y| y.to_string()).unwrap_or_default(),
            r.link.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> RunArgs {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            run: RunArgs,
        }
        let argv = std::iter::once("bookline").chain(extra.iter().copied());
        Wrapper::parse_from(argv).run
    }

    #[test]
    fn category_defaults_to_fiction() {
        let args = args(&[]);
        assert_eq!(args.category, "fiction");
        assert!(!args.dry_run);
    }

    #[test]
    fn cli_overrides_config() {
        let mut config = Config::default();
        config.database.host = Some("file-host".to_string());
        config.database.name = Some("file-db".to_string());
        config.database.url = None;

        let db = args(&["history", "--db-host", "cli-host"]).db_config(&config);
        assert_eq!(db.host.as_deref(), Some("cli-host"));
        assert_eq!(db.name.as_deref(), Some("file-db"));
    }

    #[test]
    fn preview_has_five_columns() {
        let records = vec![BookRecord {
            title: "Dune".to_string(),
            category: "fiction".to_string(),
            author: None,
            published_year: Some(1965),
            link: "https://openlibrary.org/works/OL1W".to_string(),
        }];
        let mut table = preview_table(&records, 10);
        assert_eq!(table.column_count(), 5);
        let rendered = table.to_string();
        assert!(rendered.contains("published_year"));
        assert!(rendered.contains("Dune"));
    }
}
