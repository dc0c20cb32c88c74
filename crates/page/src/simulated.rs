//! In-memory page driver.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::warn;
use url::Url;

use crate::config::PageConfig;
use crate::errors::PageError;
use crate::ports::{Cookie, PageDriver};

#[derive(Debug, Default)]
struct SimState {
    current_url: Option<Url>,
    visited: Vec<Url>,
    clicked: Vec<String>,
    typed: Vec<(String, String)>,
    cookies: Vec<Cookie>,
    closed: bool,
}

/// Page session that records interactions instead of driving a browser.
///
/// Selectors resolve instantly unless marked missing with
/// [`SimulatedPage::with_missing_selector`]. Every operation after
/// [`PageDriver::close`] fails with [`PageError::Closed`].
pub struct SimulatedPage {
    state: Mutex<SimState>,
    missing: HashSet<String>,
    config: PageConfig,
}

impl SimulatedPage {
    pub fn new() -> Self {
        Self::launch(&PageConfig::default())
    }

    /// Builds a session honoring the given launch configuration.
    pub fn launch(config: &PageConfig) -> Self {
        Self {
            state: Mutex::new(SimState::default()),
            missing: HashSet::new(),
            config: config.clone(),
        }
    }

    /// Seeds the cookie jar.
    pub fn with_cookie(self, cookie: Cookie) -> Self {
        self.state.lock().cookies.push(cookie);
        self
    }

    /// Marks a selector as never resolving.
    pub fn with_missing_selector(mut self, selector: impl Into<String>) -> Self {
        self.missing.insert(selector.into());
        self
    }

    /// The configuration the session was launched with.
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn visited(&self) -> Vec<Url> {
        self.state.lock().visited.clone()
    }

    pub fn clicked(&self) -> Vec<String> {
        self.state.lock().clicked.clone()
    }

    pub fn typed(&self) -> Vec<(String, String)> {
        self.state.lock().typed.clone()
    }

    pub fn cookie_count(&self) -> usize {
        self.state.lock().cookies.len()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    fn guard_open(state: &SimState) -> Result<(), PageError> {
        if state.closed {
            Err(PageError::Closed)
        } else {
            Ok(())
        }
    }

    fn resolve(&self, selector: &str) -> Result<(), PageError> {
        if self.missing.contains(selector) {
            Err(PageError::ElementNotFound(selector.to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for SimulatedPage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageDriver for SimulatedPage {
    async fn goto(&self, url: &Url) -> Result<(), PageError> {
        let mut state = self.state.lock();
        Self::guard_open(&state)?;
        state.current_url = Some(url.clone());
        state.visited.push(url.clone());
        Ok(())
    }

    async fn wait_for(&self, selector: &str) -> Result<(), PageError> {
        let state = self.state.lock();
        Self::guard_open(&state)?;
        self.resolve(selector)
    }

    async fn click(&self, selector: &str) -> Result<(), PageError> {
        let mut state = self.state.lock();
        Self::guard_open(&state)?;
        self.resolve(selector)?;
        state.clicked.push(selector.to_string());
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), PageError> {
        let mut state = self.state.lock();
        Self::guard_open(&state)?;
        self.resolve(selector)?;
        state.typed.push((selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn cookies(&self) -> Result<Vec<Cookie>, PageError> {
        let state = self.state.lock();
        Self::guard_open(&state)?;
        Ok(state.cookies.clone())
    }

    async fn delete_cookies(&self, cookies: &[Cookie]) -> Result<(), PageError> {
        let mut state = self.state.lock();
        Self::guard_open(&state)?;
        state
            .cookies
            .retain(|held| !cookies.iter().any(|c| c.name == held.name));
        Ok(())
    }

    async fn current_url(&self) -> Result<Url, PageError> {
        let state = self.state.lock();
        Self::guard_open(&state)?;
        match &state.current_url {
            Some(url) => Ok(url.clone()),
            // Nothing loaded yet; report the blank page a fresh session shows.
            None => Url::parse("about:blank").map_err(|e| PageError::Navigation {
                url: "about:blank".to_string(),
                reason: e.to_string(),
            }),
        }
    }

    async fn close(&self) -> Result<(), PageError> {
        let mut state = self.state.lock();
        if state.closed {
            warn!("Simulated page closed twice");
            return Ok(());
        }
        state.closed = true;
        Ok(())
    }
}
