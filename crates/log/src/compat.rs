//! Bridge from the [`log`] ecosystem into the default logger.
//!
//! Libraries that emit records through the `log` facade keep working
//! unchanged: install [`LogBridge`] once and their records flow through
//! the same pipeline as native calls, caller attribution included.

use crate::format::Caller;
use crate::level::Level;

/// Adapter that forwards [`log`] records into [`crate::logger()`].
pub struct LogBridge;

impl LogBridge {
    /// Install the bridge as the `log` crate's global backend.
    ///
    /// `log`'s own max-level filter is opened all the way up; filtering
    /// happens against this crate's live threshold instead, so
    /// [`crate::set_log_level`] takes effect immediately.
    ///
    /// # Errors
    ///
    /// Returns [`log::SetLoggerError`] when another `log` backend has
    /// already been installed.
    pub fn init() -> Result<(), log::SetLoggerError> {
        log::set_logger(&LogBridge)?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

/// `log` has no equivalent for the terminal severities, and its `Trace`
/// sits below anything this crate models, so it collapses into `Debug`.
fn severity(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        crate::logger().enabled(severity(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let caller = Caller::new(
            record.file_static().unwrap_or("unknown"),
            record.line().unwrap_or(0),
        );
        crate::logger().log(
            severity(record.level()),
            format_args!("{}", record.args()),
            caller,
        );
    }

    fn flush(&self) {
        crate::logger().flush();
    }
}
