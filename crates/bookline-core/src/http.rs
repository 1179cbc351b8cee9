//! Shared HTTP client and JSON fetching.
//!
//! Uses async reqwest on a shared tokio runtime, but presents a sync
//! interface so the pipeline stages stay plain blocking calls.

use std::sync::{LazyLock, OnceLock};
use std::time::Duration;

/// Process-wide HTTP settings, fixed once at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConfig {
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

static HTTP_CONFIG: OnceLock<HttpConfig> = OnceLock::new();

/// Install the HTTP settings. Must run before the first request; later calls are ignored.
pub fn set_http_config(config: HttpConfig) {
    if HTTP_CONFIG.set(config).is_err() {
        log::warn!("HTTP config already initialized, ignoring {config:?}");
    }
}

/// Current HTTP settings (defaults if never set)
pub fn http_config() -> HttpConfig {
    HTTP_CONFIG.get().copied().unwrap_or_default()
}

/// Error from a catalog fetch
#[derive(Debug)]
pub enum FetchError {
    /// Transport failure with optional status code
    Http {
        status: Option<u16>,
        message: String,
    },
    /// Response body was not valid JSON
    Decode(serde_json::Error),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Decode(e) => write!(f, "invalid JSON body: {e}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http { .. } => None,
            Self::Decode(e) => Some(e),
        }
    }
}

impl FetchError {
    /// Create HTTP error from reqwest error
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

/// Shared async HTTP client.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = http_config().timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Shared tokio runtime for HTTP and database I/O.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// HTTP GET → parsed JSON body.
///
/// The status code is not checked: an error page with a JSON body is
/// returned like any other response. Only transport failures and
/// undecodable bodies are errors.
pub fn get_json(url: &str) -> Result<serde_json::Value, FetchError> {
    let (status, body) = SHARED_RUNTIME
        .handle()
        .block_on(async {
            let response = http_client().get(url).send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        })
        .map_err(|e| FetchError::from_reqwest(&e))?;

    if !status.is_success() {
        log::warn!("GET {url} returned {status}, decoding body anyway");
    }
    log::debug!("GET {url}: {status}, {} bytes", body.len());

    serde_json::from_str(&body).map_err(FetchError::Decode)
}
