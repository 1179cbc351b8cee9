//! Open Library pipeline configuration

use crate::catalog::Catalog;
use crate::load::DbConfig;

/// Category fetched when none is given
pub const DEFAULT_CATEGORY: &str = "fiction";

/// Runtime configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct Config {
    /// Subject key on the catalog (e.g. "fiction")
    pub category: String,
    pub catalog: Catalog,
    pub db: DbConfig,
    /// Extract and transform only; skip the database
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            catalog: Catalog::default(),
            db: DbConfig::default(),
            dry_run: false,
        }
    }
}
