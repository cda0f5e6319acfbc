//! The `Logger` facade and its production implementation.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::{Mutex, RwLock};

use crate::config::Config;
use crate::context::Context;
use crate::format::Caller;
use crate::level::Level;
use crate::pipeline::Pipeline;
use crate::Result;

/// The logging capability applications program against.
///
/// Implementations provide threshold management, the core `log` entry point
/// and `flush`; the leveled surface is supplied on top of those. Panic- and
/// fatal-severity operations never return: the record is written (when the
/// threshold allows), sinks are flushed, then the process panics or exits.
pub trait Logger: Send + Sync {
    /// Retarget the level threshold. Takes effect immediately, with no
    /// pipeline rebuild.
    fn set_log_level(&self, level: Level);

    /// Whether a record at `level` would currently be emitted.
    fn enabled(&self, level: Level) -> bool;

    /// Core emission. `caller` is the source location reported on the
    /// record. Diverges for panic- and fatal-severity records.
    fn log(&self, level: Level, msg: fmt::Arguments<'_>, caller: Caller);

    /// Flush buffered state on every sink.
    fn flush(&self);

    /// Core emission with request context. The context is accepted but not
    /// attached to the record; implementations that propagate correlation
    /// data override this.
    fn ctx_log(&self, ctx: &Context, level: Level, msg: fmt::Arguments<'_>, caller: Caller) {
        let _ = ctx;
        self.log(level, msg, caller);
    }

    /// Emit a plain message at debug level.
    #[track_caller]
    fn debug(&self, msg: &str) {
        self.log(Level::Debug, format_args!("{msg}"), Location::caller().into());
    }

    /// Emit a plain message at info level.
    #[track_caller]
    fn info(&self, msg: &str) {
        self.log(Level::Info, format_args!("{msg}"), Location::caller().into());
    }

    /// Emit a plain message at warn level.
    #[track_caller]
    fn warn(&self, msg: &str) {
        self.log(Level::Warn, format_args!("{msg}"), Location::caller().into());
    }

    /// Emit a plain message at error level.
    #[track_caller]
    fn error(&self, msg: &str) {
        self.log(Level::Error, format_args!("{msg}"), Location::caller().into());
    }

    /// Emit a panic-severity record, then panic with the message.
    #[track_caller]
    fn panic(&self, msg: &str) -> ! {
        self.log(Level::Panic, format_args!("{msg}"), Location::caller().into());
        self.flush();
        panic!("{msg}");
    }

    /// Emit a fatal record, flush, then exit the process.
    #[track_caller]
    fn fatal(&self, msg: &str) -> ! {
        self.log(Level::Fatal, format_args!("{msg}"), Location::caller().into());
        self.flush();
        std::process::exit(1);
    }

    /// Emit a formatted record at debug level.
    #[track_caller]
    fn debugf(&self, msg: fmt::Arguments<'_>) {
        self.log(Level::Debug, msg, Location::caller().into());
    }

    /// Emit a formatted record at info level.
    #[track_caller]
    fn infof(&self, msg: fmt::Arguments<'_>) {
        self.log(Level::Info, msg, Location::caller().into());
    }

    /// Emit a formatted record at warn level.
    #[track_caller]
    fn warnf(&self, msg: fmt::Arguments<'_>) {
        self.log(Level::Warn, msg, Location::caller().into());
    }

    /// Emit a formatted record at error level.
    #[track_caller]
    fn errorf(&self, msg: fmt::Arguments<'_>) {
        self.log(Level::Error, msg, Location::caller().into());
    }

    /// Emit a formatted panic-severity record, then panic with the message.
    #[track_caller]
    fn panicf(&self, msg: fmt::Arguments<'_>) -> ! {
        let payload = msg.to_string();
        self.log(Level::Panic, format_args!("{payload}"), Location::caller().into());
        self.flush();
        panic!("{payload}");
    }

    /// Emit a formatted fatal record, flush, then exit the process.
    #[track_caller]
    fn fatalf(&self, msg: fmt::Arguments<'_>) -> ! {
        self.log(Level::Fatal, msg, Location::caller().into());
        self.flush();
        std::process::exit(1);
    }

    /// Emit a formatted record at debug level, carrying request context.
    #[track_caller]
    fn ctx_debugf(&self, ctx: &Context, msg: fmt::Arguments<'_>) {
        self.ctx_log(ctx, Level::Debug, msg, Location::caller().into());
    }

    /// Emit a formatted record at info level, carrying request context.
    #[track_caller]
    fn ctx_infof(&self, ctx: &Context, msg: fmt::Arguments<'_>) {
        self.ctx_log(ctx, Level::Info, msg, Location::caller().into());
    }

    /// Emit a formatted record at warn level, carrying request context.
    #[track_caller]
    fn ctx_warnf(&self, ctx: &Context, msg: fmt::Arguments<'_>) {
        self.ctx_log(ctx, Level::Warn, msg, Location::caller().into());
    }

    /// Emit a formatted record at error level, carrying request context.
    #[track_caller]
    fn ctx_errorf(&self, ctx: &Context, msg: fmt::Arguments<'_>) {
        self.ctx_log(ctx, Level::Error, msg, Location::caller().into());
    }

    /// Emit a formatted panic-severity record with context, then panic.
    #[track_caller]
    fn ctx_panicf(&self, ctx: &Context, msg: fmt::Arguments<'_>) -> ! {
        let payload = msg.to_string();
        self.ctx_log(ctx, Level::Panic, format_args!("{payload}"), Location::caller().into());
        self.flush();
        panic!("{payload}");
    }

    /// Emit a formatted fatal record with context, flush, then exit.
    #[track_caller]
    fn ctx_fatalf(&self, ctx: &Context, msg: fmt::Arguments<'_>) -> ! {
        self.ctx_log(ctx, Level::Fatal, msg, Location::caller().into());
        self.flush();
        std::process::exit(1);
    }
}

/// The production [`Logger`]: a configuration snapshot plus a hot-swappable
/// output pipeline.
pub struct VegaLogger {
    config: RwLock<Config>,
    pipeline: ArcSwap<Pipeline>,
    reconfigure: Mutex<()>,
}

impl VegaLogger {
    /// A logger built from [`Config::default`].
    ///
    /// # Errors
    ///
    /// [`crate::Error::SinkConstruction`] when the default log directory
    /// cannot be created.
    pub fn new() -> Result<VegaLogger> {
        Self::with_config(Config::default())
    }

    /// A logger built from the given configuration.
    ///
    /// # Errors
    ///
    /// [`crate::Error::SinkConstruction`] when the rotating file sink cannot
    /// be created.
    pub fn with_config(config: Config) -> Result<VegaLogger> {
        let pipeline = Pipeline::build(&config)?;
        Ok(VegaLogger {
            config: RwLock::new(config),
            pipeline: ArcSwap::from_pointee(pipeline),
            reconfigure: Mutex::new(()),
        })
    }

    /// A snapshot of the current configuration. The snapshot shares the live
    /// level holder, so `set_level` on it affects this logger.
    #[must_use]
    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    /// Rebuild the pipeline from `config` and swap it in atomically.
    ///
    /// The previous pipeline is flushed before it is discarded. In-flight
    /// emissions finish on whichever pipeline they loaded. Applying the same
    /// configuration twice is harmless.
    ///
    /// # Errors
    ///
    /// [`crate::Error::SinkConstruction`] when the new pipeline cannot be
    /// built; the previous pipeline stays active in that case.
    pub fn apply_config(&self, config: Config) -> Result<()> {
        let _guard = self.reconfigure.lock();
        let next = Pipeline::build(&config)?;
        self.pipeline.load().flush();
        *self.config.write() = config;
        self.pipeline.store(Arc::new(next));
        Ok(())
    }
}

impl Logger for VegaLogger {
    fn set_log_level(&self, level: Level) {
        self.pipeline.load().set_level(level);
    }

    fn enabled(&self, level: Level) -> bool {
        self.pipeline.load().enabled(level)
    }

    fn log(&self, level: Level, msg: fmt::Arguments<'_>, caller: Caller) {
        match level {
            Level::Panic | Level::Fatal => {
                let payload = msg.to_string();
                let pipeline = self.pipeline.load();
                pipeline.write(level, format_args!("{payload}"), caller);
                pipeline.flush();
                if level == Level::Panic {
                    panic!("{payload}");
                }
                std::process::exit(1);
            }
            _ => self.pipeline.load().write(level, msg, caller),
        }
    }

    fn flush(&self) {
        self.pipeline.load().flush();
    }
}

/// A [`Logger`] that drops every record.
///
/// Panic- and fatal-severity operations still diverge; only the writing is
/// suppressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn set_log_level(&self, _level: Level) {}

    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn log(&self, _level: Level, _msg: fmt::Arguments<'_>, _caller: Caller) {}

    fn flush(&self) {}
}
