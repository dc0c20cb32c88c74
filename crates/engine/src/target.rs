//! The invocation boundary actions are executed across.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error raised by a target when an invocation cannot be carried out.
#[derive(Debug, Error)]
pub enum TargetError {
    /// The target has no operation under this name.
    #[error("Unknown operation `{0}`")]
    UnknownOperation(String),

    /// The operation exists but the arguments do not fit it.
    #[error("Invalid arguments for `{op}`: {reason}")]
    InvalidArguments { op: String, reason: String },

    /// The operation ran and failed.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Anything a script can be run against.
///
/// A target exposes a flat set of named operations. Dispatch is explicit:
/// an unknown name is an error, never a silent no-op. Each invocation may
/// produce an output value, which the engine forwards or returns according
/// to the action that triggered it.
#[async_trait]
pub trait ActionTarget<V = Value>: Send + Sync {
    /// Invokes `op` with positional `args`.
    async fn invoke(&self, op: &str, args: &[V]) -> Result<Option<V>, TargetError>;
}

#[async_trait]
impl<T, V> ActionTarget<V> for Arc<T>
where
    T: ActionTarget<V> + ?Sized,
    V: Send + Sync + 'static,
{
    async fn invoke(&self, op: &str, args: &[V]) -> Result<Option<V>, TargetError> {
        (**self).invoke(op, args).await
    }
}
