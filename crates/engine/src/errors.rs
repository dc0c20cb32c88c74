//! Abort taxonomy for the run loop.

use thiserror::Error;

use crate::target::TargetError;

/// Fatal conditions that abort a run.
///
/// The engine stops at the first failure; nothing is retried or skipped,
/// and the partial run's state is discarded with the error.
#[derive(Debug, Error)]
pub enum SequenceError {
    /// The script contained no actions.
    #[error("Script contains no actions")]
    EmptyScript,

    /// The action at `index` had an empty operation name.
    #[error("Action at step {index} has no operation name")]
    MissingOp { index: usize },

    /// The target failed to carry out an action.
    #[error("Action `{op}` at step {index} failed: {source}")]
    Action {
        index: usize,
        op: String,
        #[source]
        source: TargetError,
    },

    /// A middleware returned an error after an action.
    #[error("Middleware {position} failed at step {index} after `{op}`: {source}")]
    Middleware {
        index: usize,
        position: usize,
        op: String,
        #[source]
        source: anyhow::Error,
    },
}
