//! Extract stage: one GET against the subject listing endpoint

use bookline_core::FetchError;
use serde_json::Value;

use crate::catalog::Catalog;

/// Fetch the subject listing for `category` as raw JSON.
///
/// Any HTTP status is accepted; only transport failures and non-JSON
/// bodies are errors. No retry.
pub fn extract(catalog: &Catalog, category: &str) -> Result<Value, FetchError> {
    let url = catalog.subject_url(category);
    log::info!("Fetching subject '{category}' from {}", catalog.base_url());
    let response = bookline_core::get_json(&url)?;
    log::debug!(
        "Subject '{category}': {} works in response",
        response
            .get("works")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    );
    Ok(response)
}
