//! Sequential action engine.
//!
//! Runs an ordered queue of named actions against a target, one at a time,
//! with per-action result forwarding, ordered middleware dispatched between
//! steps, immutable run-state threading, and insertion-only queue extension
//! from inside middleware.
//!
//! The pieces:
//! - [`ActionTarget`]: the invocation boundary a script runs against
//! - [`Action`] / [`Script`]: the queued work and its initial state
//! - [`Middleware`] / [`StepContext`]: after-action observers
//! - [`Sequencer`]: the run loop
//! - [`RunOutcome`]: result, final state, and the executed-action history

pub mod errors;
pub mod executor;
pub mod middleware;
pub mod target;
pub mod types;

pub use errors::SequenceError;
pub use executor::Sequencer;
pub use middleware::{Middleware, StepContext};
pub use target::{ActionTarget, TargetError};
pub use types::{Action, RunId, RunOptions, RunOutcome, Script};
