//! Observable events
//!
//! Events are explicit and typed: every lifecycle transition, every
//! derivation rejection, every corruption detection has exactly one name.

use std::fmt;

use super::logger::Severity;

/// Observable events in tallydb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A record was created: slot allocated, funded, and written.
    RecordCreated,
    /// A record's mutable fields were rewritten in place.
    RecordModified,
    /// A record was destroyed: slot zeroed, balance refunded.
    RecordDestroyed,
    /// A request's targeted address disagreed with the derivation.
    SeedMismatch,
    /// An occupied slot failed to decode: corrupted or foreign contents.
    SlotCorruption,
    /// A transition journal was replayed into a fresh ledger.
    JournalReplayed,
}

impl Event {
    /// The event name as logged.
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RecordCreated => "record_created",
            Event::RecordModified => "record_modified",
            Event::RecordDestroyed => "record_destroyed",
            Event::SeedMismatch => "seed_mismatch",
            Event::SlotCorruption => "slot_corruption",
            Event::JournalReplayed => "journal_replayed",
        }
    }

    /// The severity this event is logged at.
    pub fn severity(&self) -> Severity {
        match self {
            Event::RecordCreated | Event::RecordModified | Event::RecordDestroyed => Severity::Info,
            Event::JournalReplayed => Severity::Info,
            Event::SeedMismatch => Severity::Warn,
            Event::SlotCorruption => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
