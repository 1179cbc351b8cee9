//! Catalog endpoint description

/// Scheme + host of the public Open Library service
pub const OPEN_LIBRARY_ORIGIN: &str = "https://openlibrary.org";

/// A catalog service reachable under one base origin.
///
/// Relative resource paths returned by the API (e.g. `/works/OL1W`)
/// become absolute links by plain concatenation onto the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    base_url: String,
}

impl Catalog {
    /// One trailing `/` is dropped so paths can be appended as-is.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Subject listing endpoint, with extended details requested.
    ///
    /// The category is interpolated verbatim.
    pub fn subject_url(&self, category: &str) -> String {
        format!("{}/subjects/{category}.json?details=true", self.base_url)
    }

    /// Absolute link for a relative resource key
    pub fn link_for(&self, key: &str) -> String {
        format!("{}{key}", self.base_url)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(OPEN_LIBRARY_ORIGIN)
    }
}
