//! The canonical action target for page automation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use conveyor_engine::{ActionTarget, TargetError};
use serde_json::Value;
use tokio::time::timeout;
use tracing::debug;
use url::Url;

use crate::config::PageConfig;
use crate::errors::PageError;
use crate::ports::{LogLevel, LogSink, PageDriver, TracingSink};

/// Drives a [`PageDriver`] through the named-operation interface.
///
/// Dispatch is an explicit match over the operation set; unknown names are
/// rejected. Compound operations (`click`, `type`) wait for their selector
/// before acting, and `goto` is bounded by the configured navigation
/// deadline.
///
/// Operations:
///
/// | op             | args             | output          |
/// |----------------|------------------|-----------------|
/// | `goto`         | url              |                 |
/// | `click`        | selector         |                 |
/// | `type`         | selector, text   |                 |
/// | `wait`         | selector         |                 |
/// | `current_url`  |                  | url string      |
/// | `clear_cookies`|                  |                 |
/// | `log`          | message          |                 |
/// | `new_instance` | command          | command string  |
/// | `end`          |                  |                 |
/// | `close`        |                  |                 |
pub struct PageTarget<D> {
    driver: D,
    config: PageConfig,
    sink: Arc<dyn LogSink>,
}

impl<D: PageDriver> PageTarget<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            config: PageConfig::default(),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_config(mut self, config: PageConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the sink page-level messages are emitted through.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    fn emit(&self, level: LogLevel, op: &str, message: &str) {
        self.sink.log(level, &format!("[{}] {}", op, message));
    }
}

fn str_arg<'a>(op: &str, args: &'a [Value], index: usize, name: &str) -> Result<&'a str, TargetError> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| TargetError::InvalidArguments {
            op: op.to_string(),
            reason: format!("expected a string `{}` at position {}", name, index),
        })
}

fn driver_failure(err: PageError) -> TargetError {
    TargetError::Failed(anyhow::Error::new(err))
}

#[async_trait]
impl<D: PageDriver> ActionTarget<Value> for PageTarget<D> {
    async fn invoke(&self, op: &str, args: &[Value]) -> Result<Option<Value>, TargetError> {
        debug!("Page op `{}` with {} args", op, args.len());
        match op {
            "goto" => {
                let raw = str_arg(op, args, 0, "url")?;
                let url = Url::parse(raw).map_err(|e| TargetError::InvalidArguments {
                    op: op.to_string(),
                    reason: format!("`{}` is not a valid url: {}", raw, e),
                })?;
                let deadline = Duration::from_millis(self.config.nav_timeout_ms);
                match timeout(deadline, self.driver.goto(&url)).await {
                    Ok(result) => result.map_err(driver_failure)?,
                    Err(_) => {
                        return Err(driver_failure(PageError::Timeout {
                            op: op.to_string(),
                            ms: self.config.nav_timeout_ms,
                        }))
                    }
                }
                self.emit(LogLevel::Info, op, raw);
                Ok(None)
            }
            "click" => {
                let selector = str_arg(op, args, 0, "selector")?;
                self.driver.wait_for(selector).await.map_err(driver_failure)?;
                self.driver.click(selector).await.map_err(driver_failure)?;
                self.emit(LogLevel::Debug, op, selector);
                Ok(None)
            }
            "type" => {
                let selector = str_arg(op, args, 0, "selector")?;
                let text = str_arg(op, args, 1, "text")?;
                self.driver.wait_for(selector).await.map_err(driver_failure)?;
                self.driver
                    .type_text(selector, text)
                    .await
                    .map_err(driver_failure)?;
                self.emit(LogLevel::Debug, op, selector);
                Ok(None)
            }
            "wait" => {
                let selector = str_arg(op, args, 0, "selector")?;
                self.driver.wait_for(selector).await.map_err(driver_failure)?;
                Ok(None)
            }
            "current_url" => {
                let url = self.driver.current_url().await.map_err(driver_failure)?;
                Ok(Some(Value::String(url.to_string())))
            }
            "clear_cookies" => {
                let cookies = self.driver.cookies().await.map_err(driver_failure)?;
                let count = cookies.len();
                self.driver
                    .delete_cookies(&cookies)
                    .await
                    .map_err(driver_failure)?;
                self.emit(LogLevel::Info, op, &format!("removed {} cookies", count));
                Ok(None)
            }
            "log" => {
                let message = str_arg(op, args, 0, "message")?;
                self.emit(LogLevel::Info, op, message);
                Ok(None)
            }
            "new_instance" => {
                let command = str_arg(op, args, 0, "command")?;
                self.emit(LogLevel::Info, op, &format!("handing off `{}`", command));
                Ok(Some(Value::String(command.to_string())))
            }
            "end" => {
                self.emit(LogLevel::Info, op, "end of sequence");
                Ok(None)
            }
            "close" => {
                self.driver.close().await.map_err(driver_failure)?;
                self.emit(LogLevel::Info, op, "page closed");
                Ok(None)
            }
            other => Err(TargetError::UnknownOperation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Cookie, MemorySink};
    use crate::simulated::SimulatedPage;
    use serde_json::json;

    fn target() -> PageTarget<SimulatedPage> {
        PageTarget::new(SimulatedPage::new())
    }

    #[tokio::test]
    async fn goto_navigates_and_current_url_reports_it() {
        let target = target();
        target
            .invoke("goto", &[json!("https://example.org/a")])
            .await
            .unwrap();

        let url = target.invoke("current_url", &[]).await.unwrap();
        assert_eq!(url, Some(json!("https://example.org/a")));
        assert_eq!(target.driver().visited().len(), 1);
    }

    #[tokio::test]
    async fn click_and_type_wait_for_their_selector() {
        let target = target();
        target.invoke("click", &[json!("#submit")]).await.unwrap();
        target
            .invoke("type", &[json!("#user"), json!("ada")])
            .await
            .unwrap();

        assert_eq!(target.driver().clicked(), vec!["#submit"]);
        assert_eq!(
            target.driver().typed(),
            vec![("#user".to_string(), "ada".to_string())]
        );
    }

    #[tokio::test]
    async fn missing_selector_surfaces_as_failure() {
        let target = PageTarget::new(SimulatedPage::new().with_missing_selector("#ghost"));
        let err = target.invoke("click", &[json!("#ghost")]).await.unwrap_err();

        match err {
            TargetError::Failed(source) => {
                let page_err = source.downcast_ref::<PageError>().unwrap();
                assert!(matches!(page_err, PageError::ElementNotFound(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unknown_operation_is_rejected() {
        let err = target().invoke("hover", &[]).await.unwrap_err();
        assert!(matches!(err, TargetError::UnknownOperation(op) if op == "hover"));
    }

    #[tokio::test]
    async fn bad_arguments_are_rejected() {
        let target = target();

        let err = target.invoke("goto", &[]).await.unwrap_err();
        assert!(matches!(err, TargetError::InvalidArguments { .. }));

        let err = target.invoke("goto", &[json!("::not a url::")]).await.unwrap_err();
        assert!(matches!(err, TargetError::InvalidArguments { .. }));

        let err = target.invoke("type", &[json!("#user")]).await.unwrap_err();
        assert!(matches!(err, TargetError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn clear_cookies_empties_the_jar() {
        let page = SimulatedPage::new()
            .with_cookie(Cookie::new("session", "abc"))
            .with_cookie(Cookie::new("theme", "dark"));
        let sink = Arc::new(MemorySink::new());
        let target = PageTarget::new(page).with_sink(sink.clone());

        target.invoke("clear_cookies", &[]).await.unwrap();

        assert_eq!(target.driver().cookie_count(), 0);
        assert_eq!(sink.messages(), vec!["[clear_cookies] removed 2 cookies"]);
    }

    #[tokio::test]
    async fn log_and_new_instance_go_through_the_sink() {
        let sink = Arc::new(MemorySink::new());
        let target = PageTarget::new(SimulatedPage::new()).with_sink(sink.clone());

        target.invoke("log", &[json!("starting checkout")]).await.unwrap();
        let echoed = target
            .invoke("new_instance", &[json!("audit-run")])
            .await
            .unwrap();

        assert_eq!(echoed, Some(json!("audit-run")));
        assert_eq!(
            sink.messages(),
            vec![
                "[log] starting checkout",
                "[new_instance] handing off `audit-run`"
            ]
        );
        assert_eq!(sink.entries()[0].0, LogLevel::Info);
    }

    #[tokio::test]
    async fn close_then_navigate_fails() {
        let target = target();
        target.invoke("close", &[]).await.unwrap();
        assert!(target.driver().is_closed());

        let err = target
            .invoke("goto", &[json!("https://example.org")])
            .await
            .unwrap_err();
        match err {
            TargetError::Failed(source) => {
                assert!(matches!(
                    source.downcast_ref::<PageError>().unwrap(),
                    PageError::Closed
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn end_marks_the_sequence() {
        let sink = Arc::new(MemorySink::new());
        let target = PageTarget::new(SimulatedPage::new()).with_sink(sink.clone());

        let output = target.invoke("end", &[]).await.unwrap();
        assert!(output.is_none());
        assert_eq!(sink.messages(), vec!["[end] end of sequence"]);
    }
}
