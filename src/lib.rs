//! Conveyor: sequential page automation.
//!
//! A script is an ordered queue of named actions. A [`Sequencer`] executes
//! it against an [`ActionTarget`] one action at a time, forwarding outputs
//! between consecutive actions on request, folding run state through an
//! ordered [`Middleware`] list after every step but the last, and letting
//! middleware extend the queue on the fly.
//!
//! [`PageTarget`] is the shipped target: a page-automation surface over a
//! [`PageDriver`], with [`SimulatedPage`] as the in-memory driver for tests
//! and demos.

pub use conveyor_engine as engine;
pub use conveyor_page as page;

// Re-export commonly used types so applications can depend on one crate.
pub use conveyor_engine::{
    Action, ActionTarget, Middleware, RunId, RunOptions, RunOutcome, Script, SequenceError,
    Sequencer, StepContext, TargetError,
};
pub use conveyor_page::{
    Cookie, LogLevel, LogSink, MemorySink, PageConfig, PageDriver, PageError, PageTarget,
    SimulatedPage, TracingSink,
};
