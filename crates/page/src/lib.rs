//! Page automation target for the conveyor engine.
//!
//! Exposes the page operation surface as an [`conveyor_engine::ActionTarget`]:
//! a [`PageTarget`] dispatches named operations onto a [`PageDriver`], the
//! seam a real browser backend would sit under. [`SimulatedPage`] is the
//! in-memory driver used by tests and demos, [`PageConfig`] carries launch
//! and navigation settings, and page-level log output goes through an
//! injectable [`LogSink`].

pub mod config;
pub mod errors;
pub mod ports;
pub mod simulated;
pub mod target;

pub use config::PageConfig;
pub use errors::PageError;
pub use ports::{Cookie, LogLevel, LogSink, MemorySink, PageDriver, TracingSink};
pub use simulated::SimulatedPage;
pub use target::PageTarget;
