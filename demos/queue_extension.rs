//! Middleware-driven queue extension.
//!
//! A marker on one action expands into a cookie purge while the run is in
//! flight. Run with `cargo run --example queue_extension`.

use async_trait::async_trait;
use serde_json::Value;

use conveyor::{
    Action, Cookie, Middleware, PageTarget, RunOptions, Script, Sequencer, SimulatedPage,
    StepContext,
};

struct FreshSession;

#[async_trait]
impl Middleware<Value> for FreshSession {
    async fn after_action(
        &self,
        _state: &Value,
        cx: &mut StepContext<'_>,
    ) -> anyhow::Result<Option<Value>> {
        if cx.signal() == Some("fresh-session") {
            cx.inject([Action::new("clear_cookies"), Action::new("current_url")]);
        }
        Ok(None)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let page = SimulatedPage::new()
        .with_cookie(Cookie::new("session", "stale").with_domain("example.org"))
        .with_cookie(Cookie::new("tracker", "xyz"));
    let sequencer = Sequencer::new(PageTarget::new(page));

    let script = Script::new(vec![
        Action::new("goto")
            .with_arg("https://example.org/account")
            .with_signal("fresh-session"),
        Action::new("close"),
    ]);

    let outcome = sequencer
        .run(script, RunOptions::new().with_middleware(FreshSession))
        .await?;

    println!("executed {} steps (2 were scripted):", outcome.steps);
    for action in &outcome.history {
        println!("  - {}", action.op);
    }
    println!(
        "cookies left: {}",
        sequencer.target().driver().cookie_count()
    );
    Ok(())
}
