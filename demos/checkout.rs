//! Scripted checkout flow against the simulated page.
//!
//! Run with `cargo run --example checkout`.

use async_trait::async_trait;

use conveyor::{
    Action, Middleware, PageConfig, PageTarget, RunOptions, Script, Sequencer, SimulatedPage,
    StepContext,
};

/// Counts navigations and element interactions as run state.
#[derive(Debug, Clone, Default)]
struct Activity {
    navigations: u32,
    interactions: u32,
}

struct ActivityMeter;

#[async_trait]
impl Middleware<Activity> for ActivityMeter {
    async fn after_action(
        &self,
        state: &Activity,
        cx: &mut StepContext<'_>,
    ) -> anyhow::Result<Option<Activity>> {
        let mut next = state.clone();
        match cx.action().op.as_str() {
            "goto" => next.navigations += 1,
            "click" | "type" => next.interactions += 1,
            _ => return Ok(None),
        }
        Ok(Some(next))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = PageConfig::default().with_window_size(1280, 800);
    let page = SimulatedPage::launch(&config);
    let sequencer = Sequencer::new(PageTarget::new(page).with_config(config));

    let script = Script::new(vec![
        Action::new("goto").with_arg("https://shop.example/catalog"),
        Action::new("type")
            .with_arg("#search")
            .with_arg("mechanical keyboard"),
        Action::new("click").with_arg("#first-result"),
        Action::new("click").with_arg("#add-to-cart"),
        Action::new("goto").with_arg("https://shop.example/cart"),
        Action::new("click").with_arg("#checkout"),
        Action::new("current_url"),
    ])
    .with_state(Activity::default());

    let outcome = sequencer
        .run(script, RunOptions::new().with_middleware(ActivityMeter))
        .await?;

    println!("run {} finished in {}ms", outcome.run_id, outcome.latency_ms);
    println!("landed on: {:?}", outcome.result);
    println!(
        "{} navigations, {} interactions over {} steps",
        outcome.state.navigations, outcome.state.interactions, outcome.steps
    );
    for action in &outcome.history {
        println!("  - {}", action.op);
    }
    Ok(())
}
