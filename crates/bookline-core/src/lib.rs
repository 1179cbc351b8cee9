//! Bookline Core - Shared infrastructure for catalog pipelines
//!
//! HTTP access on a shared runtime, logging setup, and TTY-aware
//! progress lines used by the pipeline and CLI crates.

pub mod http;
pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use http::{FetchError, HttpConfig, SHARED_RUNTIME, get_json, http_client, set_http_config};
pub use logging::{SpinnerLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
