//! Severity levels and the dynamic level threshold.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Log severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    /// Verbose diagnostics, normally disabled in production.
    Debug = 0,
    /// Routine operational messages. The default threshold.
    Info = 1,
    /// Something unexpected that the program can tolerate.
    Warn = 2,
    /// A failure the program continues past.
    Error = 3,
    /// Development panic. Kept for threshold ordering; there is no
    /// emission operation at this level.
    DPanic = 4,
    /// The record is written, then an unrecoverable panic is raised.
    Panic = 5,
    /// The record is written, sinks are flushed, then the process exits.
    Fatal = 6,
}

impl Level {
    /// Resolve a level name, case-insensitively.
    ///
    /// Recognizes `debug`, `info`, `warn`, `error`, `panic` and `fatal`.
    /// Anything else resolves to [`Level::Info`]; an unrecognized name is
    /// never an error.
    pub fn parse(name: &str) -> Level {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warn,
            "error" => Level::Error,
            "panic" => Level::Panic,
            "fatal" => Level::Fatal,
            _ => Level::Info,
        }
    }

    /// The capitalized form carried on encoded records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::DPanic => "DPANIC",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    fn from_u8(raw: u8) -> Level {
        match raw {
            0 => Level::Debug,
            2 => Level::Warn,
            3 => Level::Error,
            4 => Level::DPanic,
            5 => Level::Panic,
            6 => Level::Fatal,
            _ => Level::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shareable, atomically mutable level threshold.
///
/// Cloning shares the underlying cell: every pipeline built from a
/// configuration observes level changes made through any clone, with no
/// rebuild and no locking.
#[derive(Debug, Clone)]
pub struct AtomicLevel(Arc<AtomicU8>);

impl AtomicLevel {
    /// A fresh threshold set to [`Level::Info`].
    #[must_use]
    pub fn new() -> AtomicLevel {
        AtomicLevel(Arc::new(AtomicU8::new(Level::Info as u8)))
    }

    /// The current threshold.
    pub fn level(&self) -> Level {
        Level::from_u8(self.0.load(Ordering::Relaxed))
    }

    /// Retarget the threshold. Takes effect immediately for every holder.
    pub fn set_level(&self, level: Level) {
        self.0.store(level as u8, Ordering::Relaxed);
    }

    /// Whether a record at `level` passes the current threshold.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new()
    }
}
