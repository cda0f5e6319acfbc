//! Record encoding: one JSON object or one console line per record.

use std::fmt;

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::level::Level;

/// Source location attributed to a record.
///
/// Produced implicitly by the facade's `#[track_caller]` methods; bridges
/// from other logging ecosystems construct it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    file: &'static str,
    line: u32,
}

impl Caller {
    /// A caller token for the given file and line.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Caller {
        Caller { file, line }
    }

    /// The source file as reported by the compiler.
    pub const fn file(self) -> &'static str {
        self.file
    }

    /// The 1-based source line.
    pub const fn line(self) -> u32 {
        self.line
    }

    /// The short rendering carried on records: the final directory, the
    /// file name and the line.
    fn short(self) -> String {
        let mut parts: Vec<&str> = self.file.rsplit(['/', '\\']).take(2).collect();
        parts.reverse();
        format!("{}:{}", parts.join("/"), self.line)
    }
}

impl From<&'static std::panic::Location<'static>> for Caller {
    fn from(location: &'static std::panic::Location<'static>) -> Caller {
        Caller::new(location.file(), location.line())
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

/// One log record, assembled by the pipeline before encoding.
#[derive(Debug)]
pub(crate) struct Record<'a> {
    pub level: Level,
    pub time: OffsetDateTime,
    pub name: Option<&'a str>,
    pub caller: Caller,
    pub message: &'a str,
    pub stacktrace: Option<&'a str>,
}

/// Serialized view of a record. Field order is the key order on the wire.
#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(rename = "L")]
    level: &'static str,
    #[serde(rename = "T")]
    time: &'a str,
    #[serde(rename = "N", skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(rename = "C")]
    caller: String,
    #[serde(rename = "M")]
    message: &'a str,
    #[serde(rename = "S", skip_serializing_if = "Option::is_none")]
    stacktrace: Option<&'a str>,
}

/// How records are rendered into sink lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Encoder {
    /// Tab-separated human-readable line.
    Console,
    /// One JSON object per line.
    Json,
}

impl Encoder {
    /// Encode a record into a complete line, trailing newline included.
    pub(crate) fn encode(self, record: &Record<'_>) -> String {
        match self {
            Encoder::Json => Self::encode_json(record),
            Encoder::Console => Self::encode_console(record),
        }
    }

    fn encode_json(record: &Record<'_>) -> String {
        let time = rfc3339(record.time);
        let view = JsonRecord {
            level: record.level.as_str(),
            time: &time,
            name: record.name,
            caller: record.caller.short(),
            message: record.message,
            stacktrace: record.stacktrace,
        };
        let mut line = serde_json::to_string(&view).unwrap_or_default();
        line.push('\n');
        line
    }

    fn encode_console(record: &Record<'_>) -> String {
        let mut line = rfc3339(record.time);
        line.push('\t');
        line.push_str(record.level.as_str());
        if let Some(name) = record.name {
            line.push('\t');
            line.push_str(name);
        }
        line.push('\t');
        line.push_str(&record.caller.short());
        line.push('\t');
        line.push_str(record.message);
        if let Some(stacktrace) = record.stacktrace {
            line.push('\n');
            line.push_str(stacktrace.trim_end_matches('\n'));
        }
        line.push('\n');
        line
    }
}

fn rfc3339(time: OffsetDateTime) -> String {
    time.format(&Rfc3339).unwrap_or_default()
}
