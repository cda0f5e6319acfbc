//! Sinks: the serialized writers a pipeline fans records out to.

use std::io::{self, Write};
use std::path::Path;

use logroller::{LogRollerBuilder, Rotation, RotationAge};
use parking_lot::Mutex;

use crate::config::FileOut;
use crate::Result;

/// One output destination.
///
/// Writes are serialized by the sink's own mutex, and every record arrives
/// as a single `write_all` of one complete line, so concurrent emitters
/// never interleave inside a sink.
pub(crate) struct Sink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Sink {
    /// Process standard output.
    pub(crate) fn stdout() -> Sink {
        Sink::from_writer(Box::new(io::stdout()))
    }

    /// A rotating file sink writing `<name>.<timestamp>.log` files under
    /// `file_out.path`.
    ///
    /// # Errors
    ///
    /// Construction creates the current log file eagerly; an invalid path or
    /// unwritable directory surfaces as [`crate::Error::SinkConstruction`]
    /// here instead of silently dropping file output later.
    pub(crate) fn rotating_file(file_out: &FileOut) -> Result<Sink> {
        let mut builder =
            LogRollerBuilder::new(file_out.path.as_path(), Path::new(&file_out.name))
                .rotation(Rotation::AgeBased(rotation_age(file_out.rotation_time)))
                .suffix("log".to_string());
        if let Some(limit) = keep_files(file_out.rotation_count) {
            builder = builder.max_keep_files(limit);
        }
        let roller = builder.build()?;
        Ok(Sink::from_writer(Box::new(roller)))
    }

    pub(crate) fn from_writer(writer: Box<dyn Write + Send>) -> Sink {
        Sink {
            writer: Mutex::new(writer),
        }
    }

    /// Write one encoded line. A failed sink keeps its failure to itself;
    /// the tee still delivers the record to the others.
    pub(crate) fn write_line(&self, line: &str) {
        let _ = self.writer.lock().write_all(line.as_bytes());
    }

    pub(crate) fn flush(&self) {
        let _ = self.writer.lock().flush();
    }
}

/// Map a rotation interval in hours onto the ages the roller offers:
/// under a day rotates hourly, a day or more rotates daily.
pub(crate) fn rotation_age(hours: u64) -> RotationAge {
    if hours >= 24 {
        RotationAge::Daily
    } else {
        RotationAge::Hourly
    }
}

/// Retention cap handed to the roller. Zero keeps every rotated file.
pub(crate) fn keep_files(rotation_count: u64) -> Option<u64> {
    (rotation_count > 0).then_some(rotation_count)
}
