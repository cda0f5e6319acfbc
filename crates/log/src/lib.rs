//! # Vega Log - Leveled Logging with YAML Configuration
//!
//! A small logging facade over a console/file pipeline: seven severities,
//! runtime threshold switching, rotating file output and a hot-swappable
//! process-wide default logger.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vega_log::prelude::*;
//!
//! fn main() -> vega_log::Result<()> {
//!     vega_log::init_with(Config::default())?;
//!
//!     infof!("server starting on port {}", 8080);
//!     warnf!("disk usage at {}%", 91);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration files
//!
//! Deployments usually ship a YAML file instead of code:
//!
//! ```no_run
//! vega_log::init_from_file("logger.yaml")?;
//! vega_log::info("configured from file");
//! # Ok::<(), vega_log::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod context;
mod format;
mod level;
mod logger;
mod macros;
mod pipeline;
mod writer;

#[cfg(feature = "log-compat")]
pub mod compat;

// Public API
pub use config::{Config, FileOut};
pub use context::Context;
pub use format::Caller;
pub use level::{AtomicLevel, Level};
pub use logger::{Logger, NopLogger, VegaLogger};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        debug, error, fatal, flush, info, panic, set_log_level, warn, Config, Context, Level,
        Logger, Result,
    };
    pub use crate::{
        ctx_debugf, ctx_errorf, ctx_fatalf, ctx_infof, ctx_panicf, ctx_warnf, debugf, errorf,
        fatalf, infof, panicf, warnf,
    };
}

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for logger operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading a configuration file failed
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        /// Location of the file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A configuration file held invalid YAML
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        /// Location of the offending file
        path: PathBuf,
        /// Underlying YAML error
        #[source]
        source: serde_yaml::Error,
    },

    /// Building the rotating file sink failed
    #[error("Failed to create rotating file sink: {0}")]
    SinkConstruction(#[from] logroller::LogRollerError),
}

// ============================================================================
// Global default logger
// ============================================================================

static DEFAULT_LOGGER: Lazy<ArcSwap<Box<dyn Logger>>> = Lazy::new(|| {
    match VegaLogger::new() {
        Ok(logger) => ArcSwap::from_pointee(Box::new(logger) as Box<dyn Logger>),
        Err(err) => panic!("vega-log: failed to build the default logger: {err}"),
    }
});

/// Returns the current default logger.
///
/// The first call builds a logger from [`Config::default`], so a process
/// that never configures anything still logs to the console and `./logs/`.
///
/// # Panics
///
/// Panics when that implicit first logger cannot create its file sink.
pub fn logger() -> Arc<Box<dyn Logger>> {
    DEFAULT_LOGGER.load_full()
}

/// Replaces the default logger; subsequent [`logger`] calls observe it.
///
/// Holders of an [`Arc`] obtained from [`logger`] before the swap keep
/// writing through the logger they already have.
pub fn set_logger(logger: Box<dyn Logger>) {
    DEFAULT_LOGGER.store(Arc::new(logger));
}

// ============================================================================
// Initialization Functions
// ============================================================================

/// Builds a [`VegaLogger`] from `config` and installs it as the default.
///
/// # Errors
///
/// Returns [`Error::SinkConstruction`] when the rotating file sink cannot
/// be created; the previous default logger stays installed.
pub fn init_with(config: Config) -> Result<()> {
    let logger = VegaLogger::with_config(config)?;
    set_logger(Box::new(logger));
    Ok(())
}

/// Loads a YAML configuration file and installs a fresh default logger
/// built from it.
///
/// # Errors
///
/// Returns [`Error::ConfigRead`] or [`Error::ConfigParse`] when the file
/// cannot be loaded. The failure is also reported through the current
/// default logger, which stays installed.
///
/// # Panics
///
/// Panics when the file parses but its file sink cannot be created.
pub fn init_from_file(path: impl AsRef<Path>) -> Result<()> {
    let config = match Config::from_file(path) {
        Ok(config) => config,
        Err(err) => {
            crate::errorf!("failed to load logger configuration: {err}");
            return Err(err);
        }
    };
    if let Err(err) = init_with(config) {
        panic!("vega-log: failed to apply logger configuration: {err}");
    }
    Ok(())
}

// ============================================================================
// Package-level logging functions
// ============================================================================

/// Logs `msg` at debug severity through the default logger.
#[track_caller]
pub fn debug(msg: &str) {
    logger().debug(msg);
}

/// Logs `msg` at info severity through the default logger.
#[track_caller]
pub fn info(msg: &str) {
    logger().info(msg);
}

/// Logs `msg` at warn severity through the default logger.
#[track_caller]
pub fn warn(msg: &str) {
    logger().warn(msg);
}

/// Logs `msg` at error severity through the default logger.
#[track_caller]
pub fn error(msg: &str) {
    logger().error(msg);
}

/// Logs `msg` at panic severity through the default logger, flushes and
/// panics with `msg` as the payload.
#[track_caller]
pub fn panic(msg: &str) -> ! {
    logger().panic(msg)
}

/// Logs `msg` at fatal severity through the default logger, flushes and
/// exits the process with status 1.
#[track_caller]
pub fn fatal(msg: &str) -> ! {
    logger().fatal(msg)
}

/// Moves the default logger's severity threshold; takes effect on the
/// very next record, no rebuild involved.
pub fn set_log_level(level: Level) {
    logger().set_log_level(level);
}

/// Flushes every sink of the default logger.
pub fn flush() {
    logger().flush();
}
