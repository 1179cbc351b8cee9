//! Load stage: append book records to the `books` table
//!
//! Each call opens one fresh connection (no pool), ensures the table
//! exists, and appends every record in a single multi-row INSERT.
//! Rows are never updated or deduplicated.

use bookline_core::SHARED_RUNTIME;
use sqlx::{AnyConnection, Connection};

use crate::schema::{BOOKS, Dialect};
use crate::transform::BookRecord;

/// Database connection parameters, resolved once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbConfig {
    pub host: Option<String>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Full connection URL; takes precedence over the parts above
    pub url: Option<String>,
}

impl DbConfig {
    /// Connection URL for this target.
    ///
    /// Without an explicit `url`, builds
    /// `postgresql://{user}:{password}@{host}/{name}` with no escaping.
    /// Missing parts render empty and surface as a connection failure.
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        for (part, value) in [
            ("host", &self.host),
            ("name", &self.name),
            ("user", &self.user),
            ("password", &self.password),
        ] {
            if value.is_none() {
                log::warn!("Database {part} is not set");
            }
        }
        let part = |v: &Option<String>| v.clone().unwrap_or_default();
        format!(
            "postgresql://{}:{}@{}/{}",
            part(&self.user),
            part(&self.password),
            part(&self.host),
            part(&self.name)
        )
    }

    /// Database name for user-facing messages
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("target")
    }
}

/// Error from the load stage
#[derive(Debug)]
pub enum LoadError {
    /// Connection URL scheme is not a supported database
    UnsupportedUrl(String),
    Connect(sqlx::Error),
    CreateTable(sqlx::Error),
    Insert(sqlx::Error),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedUrl(scheme) => {
                write!(f, "unsupported database URL scheme '{scheme}'")
            }
            Self::Connect(e) => write!(f, "cannot connect to database: {e}"),
            Self::CreateTable(e) => write!(f, "cannot create table {}: {e}", BOOKS.name),
            Self::Insert(e) => write!(f, "insert into {} failed: {e}", BOOKS.name),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedUrl(_) => None,
            Self::Connect(e) | Self::CreateTable(e) | Self::Insert(e) => Some(e),
        }
    }
}

/// Append `records` to the configured database and report the row count.
pub fn load(records: &[BookRecord], db: &DbConfig) -> Result<u64, LoadError> {
    let loaded = load_into(records, &db.connection_url())?;
    println!(
        "{loaded} observations successfully loaded into {} database",
        db.display_name()
    );
    Ok(loaded)
}

/// Append `records` to the `books` table at `url`, creating it if absent.
///
/// Returns the number of inserted rows. An empty record set still
/// creates the table but issues no INSERT.
pub fn load_into(records: &[BookRecord], url: &str) -> Result<u64, LoadError> {
    let dialect = Dialect::from_url(url).ok_or_else(|| {
        LoadError::UnsupportedUrl(url.split(':').next().unwrap_or_default().to_string())
    })?;
    sqlx::any::install_default_drivers();

    SHARED_RUNTIME.handle().block_on(async {
        let mut conn = AnyConnection::connect(url)
            .await
            .map_err(LoadError::Connect)?;

        sqlx::query(&BOOKS.create_table_sql(dialect))
            .execute(&mut conn)
            .await
            .map_err(LoadError::CreateTable)?;
        log::debug!("Table {} ready ({dialect:?})", BOOKS.name);

        let loaded = if records.is_empty() {
            log::warn!("No records to load");
            0
        } else {
            insert_books(&mut conn, dialect, records)
                .await
                .map_err(LoadError::Insert)?
        };

        if let Err(e) = conn.close().await {
            log::warn!("Closing database connection failed: {e}");
        }
        Ok(loaded)
    })
}

/// One INSERT statement for all records
async fn insert_books(
    conn: &mut AnyConnection,
    dialect: Dialect,
    records: &[BookRecord],
) -> Result<u64, sqlx::Error> {
    let sql = BOOKS.insert_sql(dialect, records.len());
    let mut query = sqlx::query(&sql);
    // Same order as BOOKS.columns
    for record in records {
        query = query
            .bind(record.category.clone())
            .bind(record.title.clone())
            .bind(record.author.clone())
            .bind(record.published_year)
            .bind(record.link.clone());
    }
    let result = query.execute(&mut *conn).await?;
    log::debug!("Inserted {} rows into {}", result.rows_affected(), BOOKS.name);
    Ok(result.rows_affected())
}
