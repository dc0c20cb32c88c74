//! Ports under the page target: the driver seam and the log capability.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::PageError;

/// Browser-shaped cookie record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Expiry as a Unix timestamp in seconds; session cookie when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            expires: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Driver seam for one automated page session.
///
/// A real browser backend sits below this trait; [`crate::SimulatedPage`]
/// is the in-memory implementation used by tests and demos. Waiting for a
/// selector is its own operation so compound behaviors (wait-then-click,
/// wait-then-type) stay observable at the seam.
#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn goto(&self, url: &Url) -> Result<(), PageError>;
    async fn wait_for(&self, selector: &str) -> Result<(), PageError>;
    async fn click(&self, selector: &str) -> Result<(), PageError>;
    async fn type_text(&self, selector: &str, text: &str) -> Result<(), PageError>;
    async fn cookies(&self) -> Result<Vec<Cookie>, PageError>;
    async fn delete_cookies(&self, cookies: &[Cookie]) -> Result<(), PageError>;
    async fn current_url(&self) -> Result<Url, PageError>;
    async fn close(&self) -> Result<(), PageError>;
}

/// Severity of a page-level log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Injectable sink for page-level log output.
///
/// The page target never writes to a global logger on its own; callers
/// decide where messages go by supplying a sink.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Default sink: forwards messages into `tracing` at the mapped level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!("{}", message),
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warn => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        }
    }
}

/// Buffering sink for tests and capture scenarios.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything logged so far, oldest first.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().clone()
    }

    /// Messages only, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: LogLevel, message: &str) {
        self.entries.lock().push((level, message.to_string()));
    }
}
