//! The sequential run loop.

use chrono::Utc;
use tracing::{debug, info};

use crate::errors::SequenceError;
use crate::middleware::StepContext;
use crate::target::ActionTarget;
use crate::types::{RunId, RunOptions, RunOutcome, Script};

/// Executes scripts against a target, one action at a time.
///
/// A sequencer is cheap to construct and reusable: each call to
/// [`Sequencer::run`] consumes one script and produces one outcome.
/// Running the same sequencer concurrently is not supported; reuse is
/// sequential.
pub struct Sequencer<T> {
    target: T,
    record_history: bool,
}

impl<T> Sequencer<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            record_history: true,
        }
    }

    /// Toggles history recording on produced outcomes. On by default.
    pub fn with_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }

    /// Shared access to the underlying target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Runs a script to completion.
    ///
    /// Actions execute strictly in queue order. After each action its output
    /// is forwarded to the successor's arguments when the action asked for
    /// that, the action is recorded in the history, and then, unless the
    /// action was the final one, the middleware list runs in order. The
    /// final action never reaches middleware; its output becomes the
    /// outcome's result.
    pub async fn run<S, V>(
        &self,
        script: Script<S, V>,
        options: RunOptions<S, V>,
    ) -> Result<RunOutcome<S, V>, SequenceError>
    where
        T: ActionTarget<V>,
        V: Clone,
    {
        let run_id = RunId::new();
        let started_at = Utc::now();

        let Script {
            actions: mut queue,
            initial_state,
        } = script;
        if queue.is_empty() {
            return Err(SequenceError::EmptyScript);
        }

        info!(
            "Run {} started with {} queued actions and {} middleware",
            run_id,
            queue.len(),
            options.middleware.len()
        );

        let mut state = initial_state;
        let mut history = Vec::new();
        let mut index = 0;

        loop {
            if queue[index].op.is_empty() {
                return Err(SequenceError::MissingOp { index });
            }
            let action = queue[index].clone();

            debug!("Run {}: step {} executing `{}`", run_id, index, action.op);
            let output = self
                .target
                .invoke(&action.op, &action.args)
                .await
                .map_err(|source| SequenceError::Action {
                    index,
                    op: action.op.clone(),
                    source,
                })?;

            // Forwarding targets the successor as the queue stands now, so
            // insertions made by earlier steps are honored and insertions
            // made later this step are not.
            if action.should_return {
                if let Some(value) = output.as_ref() {
                    if let Some(next) = queue.get_mut(index + 1) {
                        next.args.push(value.clone());
                    }
                }
            }

            if self.record_history {
                history.push(action.clone());
            }

            if index + 1 == queue.len() {
                let finished_at = Utc::now();
                let latency_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;
                info!(
                    "Run {} finished after {} steps in {}ms",
                    run_id,
                    index + 1,
                    latency_ms
                );
                return Ok(RunOutcome {
                    run_id,
                    result: output,
                    state,
                    history,
                    steps: index + 1,
                    started_at,
                    finished_at,
                    latency_ms,
                });
            }

            let mut insert_at = index + 1;
            for (position, middleware) in options.middleware.iter().enumerate() {
                let mut cx = StepContext::new(
                    &self.target,
                    &action,
                    output.as_ref(),
                    index,
                    &mut queue,
                    &mut insert_at,
                );
                match middleware.after_action(&state, &mut cx).await {
                    Ok(Some(next)) => state = next,
                    Ok(None) => {}
                    Err(source) => {
                        return Err(SequenceError::Middleware {
                            index,
                            position,
                            op: action.op.clone(),
                            source,
                        });
                    }
                }
            }

            index += 1;
        }
    }
}
