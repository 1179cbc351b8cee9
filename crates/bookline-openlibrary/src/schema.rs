//! Relational schema for persisted book records
//!
//! The `books` table shape is declared once here and rendered to SQL per
//! dialect. Column order in [`BOOKS`] is the insert order.

/// Logical column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

/// Table with an auto-incrementing integer key plus data columns
#[derive(Debug)]
pub struct TableSchema {
    pub name: &'static str,
    pub key: &'static str,
    pub columns: &'static [Column],
}

/// books: one row per transformed work, append-only
pub const BOOKS: TableSchema = TableSchema {
    name: "books",
    key: "id",
    columns: &[
        Column {
            name: "category",
            ty: ColumnType::Text,
        },
        Column {
            name: "title",
            ty: ColumnType::Text,
        },
        Column {
            name: "author",
            ty: ColumnType::Text,
        },
        Column {
            name: "published_year",
            ty: ColumnType::Integer,
        },
        Column {
            name: "link",
            ty: ColumnType::Text,
        },
    ],
};

/// SQL dialect of the target database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Detect dialect from a connection URL scheme
    pub fn from_url(url: &str) -> Option<Self> {
        let (scheme, _) = url.split_once(':')?;
        match scheme {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }

    fn key_column(self, key: &str) -> String {
        match self {
            Self::Postgres => format!("{key} SERIAL PRIMARY KEY"),
            Self::Sqlite => format!("{key} INTEGER PRIMARY KEY AUTOINCREMENT"),
        }
    }

    fn type_name(self, ty: ColumnType) -> &'static str {
        match ty {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
        }
    }

    /// Bind placeholder for the 1-based parameter `n`
    fn placeholder(self, n: usize) -> String {
        match self {
            Self::Postgres => format!("${n}"),
            Self::Sqlite => "?".to_string(),
        }
    }
}

impl TableSchema {
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    /// Idempotent DDL: no-op when the table already exists
    pub fn create_table_sql(&self, dialect: Dialect) -> String {
        let mut defs = vec![dialect.key_column(self.key)];
        defs.extend(
            self.columns
                .iter()
                .map(|c| format!("{} {}", c.name, dialect.type_name(c.ty))),
        );
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            defs.join(", ")
        )
    }

    /// Single multi-row INSERT for `rows` rows, parameters in column order.
    ///
    /// `rows` must be non-zero; an empty VALUES list is not valid SQL.
    pub fn insert_sql(&self, dialect: Dialect, rows: usize) -> String {
        debug_assert!(rows > 0, "insert_sql needs at least one row");
        let width = self.columns.len();
        let values: Vec<String> = (0..rows)
            .map(|row| {
                let params: Vec<String> = (1..=width)
                    .map(|col| dialect.placeholder(row * width + col))
                    .collect();
                format!("({})", params.join(", "))
            })
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES {}",
            self.name,
            self.column_names().collect::<Vec<_>>().join(", "),
            values.join(", ")
        )
    }
}
