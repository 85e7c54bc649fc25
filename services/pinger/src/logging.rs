//! Log line layout: `[<ISO-8601 timestamp>] <message>`
//!
//! Warnings and errors go to stderr, everything else to stdout.

use std::fmt::Write as _;

use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Wraps the RFC 3339 system time in square brackets
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedTime;

impl FormatTime for BracketedTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        w.write_char('[')?;
        SystemTime.format_time(w)?;
        w.write_char(']')
    }
}

/// Install the global subscriber
pub fn init(max_level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_timer(BracketedTime)
        .with_target(false)
        .with_level(false)
        .with_ansi(false)
        .with_writer(std::io::stderr.with_max_level(Level::WARN).or_else(std::io::stdout))
        .init();
}
