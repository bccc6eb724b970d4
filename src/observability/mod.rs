//! Observability for tallydb
//!
//! Structured JSON logging only: synchronous, one line per event,
//! deterministic field ordering, explicit severity. Metrics and tracing
//! surfaces are out of scope; every lifecycle outcome still gets exactly
//! one log line.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
