//! Driver failure taxonomy.

use thiserror::Error;

/// Failures surfaced by page drivers.
#[derive(Debug, Error)]
pub enum PageError {
    /// The page could not be navigated to `url`.
    #[error("Navigation to `{url}` failed: {reason}")]
    Navigation { url: String, reason: String },

    /// No element matched the selector.
    #[error("No element matched selector `{0}`")]
    ElementNotFound(String),

    /// The session was closed and cannot serve further operations.
    #[error("Page session is closed")]
    Closed,

    /// The operation did not finish within its deadline.
    #[error("Operation `{op}` timed out after {ms}ms")]
    Timeout { op: String, ms: u64 },
}
