//! Structured JSON logger
//!
//! Emits one JSON object per event with deterministic key ordering so log
//! output is diffable across runs. Logging is synchronous and unbuffered.

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
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

/// Structured logger that writes JSON lines
///
/// Field keys are sorted alphabetically so the same event always renders
/// the same bytes.
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::log_to_writer(severity, event, fields, &mut io::stdout());
    }

    /// Log to stderr (for errors)
    pub fn log_stderr(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::log_to_writer(severity, event, fields, &mut io::stderr());
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut output = String::with_capacity(128);

        output.push_str("{\"event\":\"");
        Self::escape(&mut output, event);
        output.push_str("\",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted {
            output.push_str(",\"");
            Self::escape(&mut output, key);
            output.push_str("\":\"");
            Self::escape(&mut output, value);
            output.push('"');
        }

        output.push_str("}\n");

        // One write_all call so concurrent events do not interleave
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }

    fn escape(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut buf = Vec::new();
        Logger::log_to_writer(severity, event, fields, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_event_and_severity_lead() {
        let line = render(Severity::Info, "table_compiled", &[]);
        assert_eq!(line, "{\"event\":\"table_compiled\",\"severity\":\"INFO\"}\n");
    }

    #[test]
    fn test_fields_sorted() {
        let line = render(
            Severity::Trace,
            "plan_selected",
            &[("table", "devices"), ("strategy", "SCAN")],
        );
        let strategy_pos = line.find("strategy").unwrap();
        let table_pos = line.find("table").unwrap();
        assert!(strategy_pos < table_pos);
    }

    #[test]
    fn test_escaping() {
        let line = render(Severity::Warn, "odd \"name\"", &[("k", "a\nb")]);
        assert!(line.contains("odd \\\"name\\\""));
        assert!(line.contains("a\\nb"));
    }
}
