//! Transform stage: subject listing JSON → book records

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::Catalog;

// === Row struct (deserialized from JSON) ===

/// One entry of the listing's `works` array.
///
/// Only the four consumed fields are read; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct WorkRow {
    pub title: String,

    /// Ordered author list. Missing or `null` counts as empty;
    /// `null` entries are kept in place.
    #[serde(default)]
    pub authors: Option<Vec<Option<AuthorRef>>>,

    #[serde(default)]
    pub first_publish_year: Option<i32>,

    /// Relative resource path (e.g. "/works/OL45804W")
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorRef {
    #[serde(default)]
    pub name: Option<String>,
}

impl WorkRow {
    /// Name of the author at position 0, if any. Later entries are never consulted.
    pub fn primary_author(&self) -> Option<&str> {
        self.authors.as_deref()?.first()?.as_ref()?.name.as_deref()
    }
}

// === Output record ===

/// Flat book row as persisted in the `books` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub title: String,
    pub category: String,
    pub author: Option<String>,
    pub published_year: Option<i32>,
    pub link: String,
}

impl BookRecord {
    /// Column order of a transformed record set
    pub const COLUMNS: [&'static str; 5] = ["title", "category", "author", "published_year", "link"];

    fn from_work(catalog: &Catalog, category: &str, work: WorkRow) -> Self {
        let author = work.primary_author().map(str::to_string);
        Self {
            link: catalog.link_for(&work.key),
            title: work.title,
            category: category.to_string(),
            author,
            published_year: work.first_publish_year,
        }
    }
}

/// Structural problem in a subject listing
#[derive(Debug)]
pub enum TransformError {
    /// Response has no `works` key
    MissingWorks,
    /// `works` is present but not an array
    WorksNotList,
    /// A `works` entry doesn't have the expected shape
    MalformedWork {
        index: usize,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingWorks => write!(f, "response has no 'works' key"),
            Self::WorksNotList => write!(f, "'works' is not a list"),
            Self::MalformedWork { index, source } => write!(f, "works[{index}]: {source}"),
        }
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedWork { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Flatten a subject listing into book records.
///
/// One record per `works` entry, in input order. Every record carries
/// `category`, an absolute link, and the first listed author (if any).
/// Fails without partial output on the first structural problem.
pub fn transform(
    catalog: &Catalog,
    category: &str,
    response: &Value,
) -> Result<Vec<BookRecord>, TransformError> {
    let works = response
        .get("works")
        .ok_or(TransformError::MissingWorks)?
        .as_array()
        .ok_or(TransformError::WorksNotList)?;

    works
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let work = WorkRow::deserialize(entry)
                .map_err(|source| TransformError::MalformedWork { index, source })?;
            Ok(BookRecord::from_work(catalog, category, work))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dune(authors: Value) -> Value {
        json!({
            "works": [{
                "title": "Dune",
                "authors": authors,
                "first_publish_year": 1965,
                "key": "/works/OL1W"
            }]
        })
    }

    #[test]
    fn single_work() {
        let response = dune(json!([{"name": "Frank Herbert"}]));
        let records = transform(&Catalog::default(), "fiction", &response).unwrap();
        assert_eq!(
            records,
            vec![BookRecord {
                title: "Dune".to_string(),
                category: "fiction".to_string(),
                author: Some("Frank Herbert".to_string()),
                published_year: Some(1965),
                link: "https://openlibrary.org/works/OL1W".to_string(),
            }]
        );
    }

    #[test]
    fn empty_authors_leaves_author_absent() {
        let records = transform(&Catalog::default(), "fiction", &dune(json!([]))).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author, None);
        assert_eq!(records[0].title, "Dune");
        assert_eq!(records[0].published_year, Some(1965));
        assert_eq!(records[0].link, "https://openlibrary.org/works/OL1W");
    }

    #[test]
    fn null_or_missing_authors_tolerated() {
        let records = transform(&Catalog::default(), "fiction", &dune(Value::Null)).unwrap();
        assert_eq!(records[0].author, None);

        let response = json!({"works": [{"title": "Anon", "key": "/works/OL2W"}]});
        let records = transform(&Catalog::default(), "fiction", &response).unwrap();
        assert_eq!(records[0].author, None);
        assert_eq!(records[0].published_year, None);
    }

    #[test]
    fn null_author_entry_leaves_author_absent() {
        let records =
            transform(&Catalog::default(), "fiction", &dune(json!([null, {"name": "B"}]))).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author, None);

        let records =
            transform(&Catalog::default(), "fiction", &dune(json!([{"name": "A"}, null]))).unwrap();
        assert_eq!(records[0].author.as_deref(), Some("A"));
    }

    #[test]
    fn first_author_wins() {
        let response = dune(json!([
            {"key": "/authors/A1", "name": "Frank Herbert"},
            {"key": "/authors/A2", "name": "Brian Herbert"},
            {"key": "/authors/A3", "name": "Kevin J. Anderson"}
        ]));
        let records = transform(&Catalog::default(), "fiction", &response).unwrap();
        assert_eq!(records[0].author.as_deref(), Some("Frank Herbert"));
    }

    #[test]
    fn rows_keep_order_and_category() {
        let response = json!({
            "works": [
                {"title": "A", "authors": [], "key": "/works/OL1W"},
                {"title": "B", "authors": [{"name": "x"}], "key": "/works/OL2W", "first_publish_year": 2001},
                {"title": "C", "authors": [], "key": "/works/OL3W", "edition_count": 12, "cover_id": 99}
            ]
        });
        let records = transform(&Catalog::default(), "history", &response).unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
        assert!(records.iter().all(|r| r.category == "history"));
        for (record, n) in records.iter().zip(1..) {
            assert_eq!(record.link, format!("https://openlibrary.org/works/OL{n}W"));
        }
    }

    #[test]
    fn link_uses_catalog_origin() {
        let catalog = Catalog::new("http://localhost:9000");
        let records = transform(&catalog, "fiction", &dune(json!([]))).unwrap();
        assert_eq!(records[0].link, "http://localhost:9000/works/OL1W");
    }

    #[test]
    fn empty_works() {
        let records = transform(&Catalog::default(), "fiction", &json!({"works": []})).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn missing_works_key() {
        let response = json!({"name": "fiction", "work_count": 0});
        let err = transform(&Catalog::default(), "fiction", &response).unwrap_err();
        assert!(matches!(err, TransformError::MissingWorks));

        // Non-object responses have no keys at all
        let err = transform(&Catalog::default(), "fiction", &json!([1, 2])).unwrap_err();
        assert!(matches!(err, TransformError::MissingWorks));
    }

    #[test]
    fn works_not_a_list() {
        let err = transform(&Catalog::default(), "fiction", &json!({"works": {}})).unwrap_err();
        assert!(matches!(err, TransformError::WorksNotList));
    }

    #[test]
    fn malformed_entry_reports_index() {
        let response = json!({
            "works": [
                {"title": "Ok", "key": "/works/OL1W"},
                {"title": "No key"}
            ]
        });
        let err = transform(&Catalog::default(), "fiction", &response).unwrap_err();
        match err {
            TransformError::MalformedWork { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
        assert!(format!("{}", transform(&Catalog::default(), "f", &response).unwrap_err())
            .starts_with("works[1]:"));
    }

    #[test]
    fn column_order() {
        assert_eq!(
            BookRecord::COLUMNS,
            ["title", "category", "author", "published_year", "link"]
        );
    }
}
