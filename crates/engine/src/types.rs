//! Data model for scripted runs: actions, scripts, options, outcomes.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::middleware::Middleware;

/// Identifier for a single run, formatted as `run-{uuid}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl RunId {
    pub fn new() -> Self {
        Self(format!("run-{}", Uuid::new_v4()))
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One named operation to invoke on a target, with positional arguments.
///
/// The wire form is camelCase with the operation name under `type`:
///
/// ```json
/// {"type": "goto", "args": ["https://example.org"], "shouldReturn": false}
/// ```
///
/// Everything but `type` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action<V = Value> {
    /// Operation name understood by the target.
    #[serde(rename = "type")]
    pub op: String,
    /// Positional arguments. Forwarded results from a predecessor are
    /// appended at the end.
    #[serde(default = "Vec::new")]
    pub args: Vec<V>,
    /// When set, this action's output is appended to the next queued
    /// action's arguments.
    #[serde(default)]
    pub should_return: bool,
    /// Free-form marker middleware can react to. The engine itself never
    /// interprets it.
    #[serde(default)]
    pub signal: Option<String>,
}

impl<V> Action<V> {
    pub fn new(op: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            args: Vec::new(),
            should_return: false,
            signal: None,
        }
    }

    pub fn with_arg(mut self, arg: impl Into<V>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = V>) -> Self {
        self.args.extend(args);
        self
    }

    /// Marks the action's output for forwarding to its successor.
    pub fn returning(mut self) -> Self {
        self.should_return = true;
        self
    }

    pub fn with_signal(mut self, signal: impl Into<String>) -> Self {
        self.signal = Some(signal.into());
        self
    }
}

/// An ordered action queue plus the initial middleware state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script<S = Value, V = Value> {
    pub actions: Vec<Action<V>>,
    pub initial_state: S,
}

impl<V> Script<Value, V> {
    /// Builds a script whose initial state is an empty JSON object.
    pub fn new(actions: impl Into<Vec<Action<V>>>) -> Self {
        Self {
            actions: actions.into(),
            initial_state: Value::Object(serde_json::Map::new()),
        }
    }
}

impl<S, V> Script<S, V> {
    /// Replaces the initial state, possibly changing its type.
    pub fn with_state<S2>(self, initial_state: S2) -> Script<S2, V> {
        Script {
            actions: self.actions,
            initial_state,
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Per-run configuration: the middleware dispatch order and reserved
/// run-boundary hooks.
pub struct RunOptions<S = Value, V = Value> {
    /// Middleware dispatched in order after every action except the last.
    pub middleware: Vec<Arc<dyn Middleware<S, V>>>,
    /// Reserved pre-run hook. Stored for forward compatibility; the current
    /// engine does not invoke it.
    pub pre_hook: Option<Arc<dyn Middleware<S, V>>>,
    /// Reserved post-run hook. Stored for forward compatibility; the current
    /// engine does not invoke it.
    pub post_hook: Option<Arc<dyn Middleware<S, V>>>,
}

impl<S, V> RunOptions<S, V> {
    pub fn new() -> Self {
        Self {
            middleware: Vec::new(),
            pre_hook: None,
            post_hook: None,
        }
    }

    /// Appends a middleware to the dispatch order.
    pub fn with_middleware<M>(mut self, middleware: M) -> Self
    where
        M: Middleware<S, V> + 'static,
    {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Appends an already shared middleware to the dispatch order.
    pub fn with_middleware_arc(mut self, middleware: Arc<dyn Middleware<S, V>>) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn with_pre_hook<M>(mut self, hook: M) -> Self
    where
        M: Middleware<S, V> + 'static,
    {
        self.pre_hook = Some(Arc::new(hook));
        self
    }

    pub fn with_post_hook<M>(mut self, hook: M) -> Self
    where
        M: Middleware<S, V> + 'static,
    {
        self.post_hook = Some(Arc::new(hook));
        self
    }
}

impl<S, V> Default for RunOptions<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, V> Clone for RunOptions<S, V> {
    fn clone(&self) -> Self {
        Self {
            middleware: self.middleware.clone(),
            pre_hook: self.pre_hook.clone(),
            post_hook: self.post_hook.clone(),
        }
    }
}

/// Result envelope for a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome<S = Value, V = Value> {
    pub run_id: RunId,
    /// Output of the final executed action, if it produced one.
    pub result: Option<V>,
    /// State left behind by the last middleware fold.
    pub state: S,
    /// Executed actions in order, each with the arguments it actually ran
    /// with. Empty when history recording is off.
    pub history: Vec<Action<V>>,
    /// Number of actions executed, injected ones included.
    pub steps: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub latency_ms: u64,
}
