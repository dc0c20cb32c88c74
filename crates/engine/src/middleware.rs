//! After-action observers: state folding and queue extension.

use async_trait::async_trait;
use serde_json::Value;

use crate::target::{ActionTarget, TargetError};
use crate::types::Action;

/// Observer dispatched after every executed action except the final one.
///
/// Middleware reads the current run state and either replaces it by
/// returning `Some(next)` or leaves it untouched by returning `None`.
/// State is never mutated in place; each step folds the middleware list in
/// order over the state the previous one produced.
///
/// Returning an error aborts the run immediately.
#[async_trait]
pub trait Middleware<S, V = Value>: Send + Sync {
    async fn after_action(
        &self,
        state: &S,
        cx: &mut StepContext<'_, V>,
    ) -> anyhow::Result<Option<S>>;
}

/// Context handed to middleware after an action has executed.
///
/// Exposes the executed action and its output, call access to the target,
/// and the one permitted queue mutation: inserting follow-up actions.
pub struct StepContext<'run, V = Value> {
    target: &'run dyn ActionTarget<V>,
    action: &'run Action<V>,
    output: Option<&'run V>,
    index: usize,
    queue: &'run mut Vec<Action<V>>,
    insert_at: &'run mut usize,
}

impl<'run, V> StepContext<'run, V> {
    pub(crate) fn new(
        target: &'run dyn ActionTarget<V>,
        action: &'run Action<V>,
        output: Option<&'run V>,
        index: usize,
        queue: &'run mut Vec<Action<V>>,
        insert_at: &'run mut usize,
    ) -> Self {
        Self {
            target,
            action,
            output,
            index,
            queue,
            insert_at,
        }
    }

    /// The action that just executed, with the arguments it actually ran
    /// with.
    pub fn action(&self) -> &Action<V> {
        self.action
    }

    /// Output of the executed action, if it produced one.
    pub fn output(&self) -> Option<&V> {
        self.output
    }

    /// Queue position of the executed action.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Marker on the executed action, if one was set.
    pub fn signal(&self) -> Option<&str> {
        self.action.signal.as_deref()
    }

    /// The target the run is executing against.
    pub fn target(&self) -> &dyn ActionTarget<V> {
        self.target
    }

    /// Invokes an operation on the target directly, outside the queue.
    pub async fn call(&self, op: &str, args: &[V]) -> Result<Option<V>, TargetError> {
        self.target.invoke(op, args).await
    }

    /// Actions still queued after the current one, injected ones included.
    pub fn pending(&self) -> &[Action<V>] {
        &self.queue[self.index + 1..]
    }

    /// Inserts actions into the queue immediately after the current one.
    ///
    /// The insertion point advances past each inserted action and is shared
    /// by every middleware dispatched for the same step, so earlier
    /// insertions execute earlier and all of them run before the original
    /// successor. Insertion is the only mutation available; queued actions
    /// are never removed or reordered.
    pub fn inject(&mut self, actions: impl IntoIterator<Item = Action<V>>) {
        for action in actions {
            self.queue.insert(*self.insert_at, action);
            *self.insert_at += 1;
        }
    }
}
