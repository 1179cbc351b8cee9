//! Bookline Open Library - subject listing pipeline
//!
//! Fetches one subject (category) listing from the Open Library catalog,
//! flattens its works into five-column book records, and appends them
//! to a relational `books` table.
//!
//! # Example
//!
//! ```no_run
//! use bookline_core::ProgressContext;
//! use bookline_openlibrary::{Config, DbConfig, run};
//!
//! let config = Config {
//!     category: "fiction".to_string(),
//!     db: DbConfig {
//!         url: Some("sqlite://books.db?mode=rwc".to_string()),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! let summary = run(&config, &ProgressContext::new()).expect("Pipeline failed");
//! println!("Loaded {:?} rows", summary.loaded);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod runner;
pub mod schema;
pub mod transform;

// Re-exports for convenience
pub use catalog::{Catalog, OPEN_LIBRARY_ORIGIN};
pub use config::Config;
pub use error::{FaultKind, PipelineError};
pub use extract::extract;
pub use load::{DbConfig, LoadError, load, load_into};
pub use runner::{RunSummary, run};
pub use transform::{BookRecord, TransformError, WorkRow, transform};
