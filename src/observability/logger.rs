//! Structured JSON logger
//!
//! - One log line = one event
//! - Synchronous, no buffering
//! - Deterministic key ordering (event, severity, then fields sorted)

use std::fmt;
use std::io::{self, Write};

use super::events::Event;

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations.
    Info,
    /// Rejected requests and other recoverable conditions.
    Warn,
    /// Data-integrity failures.
    Error,
}

impl Severity {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous JSON line logger.
pub struct Logger;

impl Logger {
    /// Logs an event with the given severity and fields to stdout.
    ///
    /// Fields are emitted in deterministic order (alphabetical by key).
    pub fn log(severity: Severity, event: Event, fields: &[(&str, &str)]) {
        let line = Self::render(severity, event, fields);
        let mut stdout = io::stdout();
        // A log line that cannot be written is dropped, never panicked over
        let _ = writeln!(stdout, "{}", line);
    }

    fn render(severity: Severity, event: Event, fields: &[(&str, &str)]) -> String {
        let mut line = String::with_capacity(128);
        line.push('{');
        line.push_str("\"event\":\"");
        line.push_str(event.as_str());
        line.push_str("\",\"severity\":\"");
        line.push_str(severity.as_str());
        line.push('"');

        let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
        sorted.sort_by_key(|(key, _)| *key);
        for (key, value) in sorted {
            line.push_str(",\"");
            escape_into(&mut line, key);
            line.push_str("\":\"");
            escape_into(&mut line, value);
            line.push('"');
        }
        line.push('}');
        line
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_and_severity_lead_the_line() {
        let line = Logger::render(Severity::Info, Event::RecordCreated, &[]);
        assert_eq!(line, "{\"event\":\"record_created\",\"severity\":\"INFO\"}");
    }

    #[test]
    fn test_fields_sorted_alphabetically() {
        let line = Logger::render(
            Severity::Warn,
            Event::SeedMismatch,
            &[("id", "2"), ("address", "ab")],
        );
        assert_eq!(
            line,
            "{\"event\":\"seed_mismatch\",\"severity\":\"WARN\",\"address\":\"ab\",\"id\":\"2\"}"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let line = Logger::render(
            Severity::Error,
            Event::SlotCorruption,
            &[("reason", "say \"no\"\nplease")],
        );
        assert!(line.contains("say \\\"no\\\"\\nplease"));
    }
}
