//! Formatted logging macros over the default logger.
//!
//! The non-terminal macros check the live threshold before evaluating their
//! format arguments, so a filtered-out record costs one atomic load.
//! [`panicf!`](crate::panicf) and [`fatalf!`](crate::fatalf) always format:
//! the message is the panic payload or the final record.

/// Log a formatted message at debug level through the default logger.
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)*) => {{
        let __logger = $crate::logger();
        if $crate::Logger::enabled(&**__logger, $crate::Level::Debug) {
            $crate::Logger::debugf(&**__logger, ::core::format_args!($($arg)*));
        }
    }};
}

/// Log a formatted message at info level through the default logger.
///
/// ```no_run
/// vega_log::infof!("listening on port {}", 8080);
/// ```
#[macro_export]
macro_rules! infof {
    ($($arg:tt)*) => {{
        let __logger = $crate::logger();
        if $crate::Logger::enabled(&**__logger, $crate::Level::Info) {
            $crate::Logger::infof(&**__logger, ::core::format_args!($($arg)*));
        }
    }};
}

/// Log a formatted message at warn level through the default logger.
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)*) => {{
        let __logger = $crate::logger();
        if $crate::Logger::enabled(&**__logger, $crate::Level::Warn) {
            $crate::Logger::warnf(&**__logger, ::core::format_args!($($arg)*));
        }
    }};
}

/// Log a formatted message at error level through the default logger.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {{
        let __logger = $crate::logger();
        if $crate::Logger::enabled(&**__logger, $crate::Level::Error) {
            $crate::Logger::errorf(&**__logger, ::core::format_args!($($arg)*));
        }
    }};
}

/// Write a panic-severity record through the default logger, then panic
/// with the formatted message.
#[macro_export]
macro_rules! panicf {
    ($($arg:tt)*) => {{
        let __logger = $crate::logger();
        $crate::Logger::panicf(&**__logger, ::core::format_args!($($arg)*))
    }};
}

/// Write a fatal record through the default logger, flush, then exit the
/// process.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)*) => {{
        let __logger = $crate::logger();
        $crate::Logger::fatalf(&**__logger, ::core::format_args!($($arg)*))
    }};
}

/// Log a formatted debug message carrying request context.
#[macro_export]
macro_rules! ctx_debugf {
    ($ctx:expr, $($arg:tt)*) => {{
        let __logger = $crate::logger();
        if $crate::Logger::enabled(&**__logger, $crate::Level::Debug) {
            $crate::Logger::ctx_debugf(&**__logger, $ctx, ::core::format_args!($($arg)*));
        }
    }};
}

/// Log a formatted info message carrying request context.
///
/// ```no_run
/// let ctx = vega_log::Context::new().with_request_id("req-7");
/// vega_log::ctx_infof!(&ctx, "handled in {}ms", 12);
/// ```
#[macro_export]
macro_rules! ctx_infof {
    ($ctx:expr, $($arg:tt)*) => {{
        let __logger = $crate::logger();
        if $crate::Logger::enabled(&**__logger, $crate::Level::Info) {
            $crate::Logger::ctx_infof(&**__logger, $ctx, ::core::format_args!($($arg)*));
        }
    }};
}

/// Log a formatted warn message carrying request context.
#[macro_export]
macro_rules! ctx_warnf {
    ($ctx:expr, $($arg:tt)*) => {{
        let __logger = $crate::logger();
        if $crate::Logger::enabled(&**__logger, $crate::Level::Warn) {
            $crate::Logger::ctx_warnf(&**__logger, $ctx, ::core::format_args!($($arg)*));
        }
    }};
}

/// Log a formatted error message carrying request context.
#[macro_export]
macro_rules! ctx_errorf {
    ($ctx:expr, $($arg:tt)*) => {{
        let __logger = $crate::logger();
        if $crate::Logger::enabled(&**__logger, $crate::Level::Error) {
            $crate::Logger::ctx_errorf(&**__logger, $ctx, ::core::format_args!($($arg)*));
        }
    }};
}

/// Write a panic-severity record with context, then panic with the message.
#[macro_export]
macro_rules! ctx_panicf {
    ($ctx:expr, $($arg:tt)*) => {{
        let __logger = $crate::logger();
        $crate::Logger::ctx_panicf(&**__logger, $ctx, ::core::format_args!($($arg)*))
    }};
}

/// Write a fatal record with context, flush, then exit the process.
#[macro_export]
macro_rules! ctx_fatalf {
    ($ctx:expr, $($arg:tt)*) => {{
        let __logger = $crate::logger();
        $crate::Logger::ctx_fatalf(&**__logger, $ctx, ::core::format_args!($($arg)*))
    }};
}
