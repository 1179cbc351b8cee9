//! Pipeline orchestration: extract → transform → load

use std::time::{Duration, Instant};

use bookline_core::ProgressContext;

use crate::config::Config;
use crate::error::PipelineError;
use crate::extract::extract;
use crate::load::load;
use crate::transform::{BookRecord, transform};

/// Result of one pipeline run
#[derive(Debug)]
pub struct RunSummary {
    pub category: String,
    /// Transformed records, in listing order
    pub records: Vec<BookRecord>,
    /// Rows appended to the table; `None` on a dry run
    pub loaded: Option<u64>,
    pub elapsed: Duration,
}

/// Run the pipeline once for `config.category`.
///
/// Stages run strictly in sequence; the first failing stage aborts the run.
pub fn run(config: &Config, progress: &ProgressContext) -> Result<RunSummary, PipelineError> {
    let start = Instant::now();
    let category = config.category.as_str();

    let pb = progress.stage_line("extract");
    pb.set_message(config.catalog.subject_url(category));
    let response = extract(&config.catalog, category);
    pb.finish_and_clear();
    let response = response?;

    let pb = progress.stage_line("transform");
    let records = transform(&config.catalog, category, &response);
    pb.finish_and_clear();
    let records = records?;
    log::info!("Transformed {} works for '{category}'", records.len());

    let loaded = if config.dry_run {
        log::info!("Dry run, skipping load");
        None
    } else {
        let pb = progress.stage_line("load");
        pb.set_message(format!("{} rows → {}", records.len(), config.db.display_name()));
        let loaded = load(&records, &config.db);
        pb.finish_and_clear();
        Some(loaded?)
    };

    Ok(RunSummary {
        category: category.to_string(),
        records,
        loaded,
        elapsed: start.elapsed(),
    })
}
