//! The built output path: one encoder, a tee of sinks, live thresholds.

use std::backtrace::Backtrace;
use std::fmt;

use time::OffsetDateTime;

use crate::config::Config;
use crate::format::{Caller, Encoder, Record};
use crate::level::{AtomicLevel, Level};
use crate::writer::Sink;
use crate::Result;

/// Everything a logger needs to turn one call into sink lines.
///
/// A pipeline is immutable once built except for its shared level threshold;
/// reconfiguration builds a fresh pipeline and swaps it in whole.
pub(crate) struct Pipeline {
    encoder: Encoder,
    sinks: Vec<Sink>,
    level: AtomicLevel,
    stacktrace_level: Level,
    name: Option<String>,
}

impl Pipeline {
    /// Build a pipeline from a configuration snapshot.
    ///
    /// Resolves the level strings, stores the threshold into the
    /// configuration's shared holder, and constructs the enabled sinks.
    ///
    /// # Errors
    ///
    /// [`crate::Error::SinkConstruction`] when the rotating file sink cannot
    /// be created; no pipeline is produced in that case.
    pub(crate) fn build(config: &Config) -> Result<Pipeline> {
        let encoder = if config.json_format {
            Encoder::Json
        } else {
            Encoder::Console
        };

        config.atomic_level.set_level(Level::parse(&config.level));

        let mut sinks = Vec::new();
        if config.console_out {
            sinks.push(Sink::stdout());
        }
        if let Some(file_out) = &config.file_out {
            if file_out.enable {
                sinks.push(Sink::rotating_file(file_out)?);
            }
        }

        Ok(Pipeline {
            encoder,
            sinks,
            level: config.atomic_level.clone(),
            stacktrace_level: Level::parse(&config.stacktrace_level),
            name: if config.project_name.is_empty() {
                None
            } else {
                Some(config.project_name.clone())
            },
        })
    }

    /// Whether a record at `level` passes the live threshold.
    pub(crate) fn enabled(&self, level: Level) -> bool {
        self.level.enabled(level)
    }

    /// Retarget the live threshold shared with the source configuration.
    pub(crate) fn set_level(&self, level: Level) {
        self.level.set_level(level);
    }

    /// Emit one record: threshold first, then timestamp, backtrace when the
    /// level demands one, a single encode, and a fan-out to every sink.
    ///
    /// Below the threshold nothing is formatted and nothing is written.
    pub(crate) fn write(&self, level: Level, message: fmt::Arguments<'_>, caller: Caller) {
        if !self.enabled(level) {
            return;
        }

        let message = message.to_string();
        let stacktrace = if level >= self.stacktrace_level {
            Some(Backtrace::force_capture().to_string())
        } else {
            None
        };

        let record = Record {
            level,
            time: OffsetDateTime::now_utc(),
            name: self.name.as_deref(),
            caller,
            message: &message,
            stacktrace: stacktrace.as_deref(),
        };

        let line = self.encoder.encode(&record);
        for sink in &self.sinks {
            sink.write_line(&line);
        }
    }

    /// Flush every sink.
    pub(crate) fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use parking_lot::Mutex;

    /// In-memory sink target, cloneable so tests keep a reading handle.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }

        fn lines(&self) -> Vec<String> {
            self.contents().lines().map(str::to_string).collect()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn buffer_pipeline(encoder: Encoder, buffers: usize) -> (Pipeline, Vec<SharedBuf>) {
        let handles: Vec<SharedBuf> = (0..buffers).map(|_| SharedBuf::default()).collect();
        let sinks = handles
            .iter()
            .map(|buf| Sink::from_writer(Box::new(buf.clone())))
            .collect();
        let pipeline = Pipeline {
            encoder,
            sinks,
            level: AtomicLevel::new(),
            stacktrace_level: Level::Panic,
            name: None,
        };
        (pipeline, handles)
    }

    fn here() -> Caller {
        Caller::new("src/pipeline.rs", 1)
    }

    #[test]
    fn records_below_threshold_produce_nothing() {
        let (pipeline, buffers) = buffer_pipeline(Encoder::Console, 1);
        pipeline.set_level(Level::Error);

        pipeline.write(Level::Info, format_args!("dropped"), here());
        assert_eq!(buffers[0].contents(), "");

        pipeline.write(Level::Error, format_args!("kept"), here());
        assert_eq!(buffers[0].lines().len(), 1);
        assert!(buffers[0].contents().contains("kept"));
    }

    #[test]
    fn tee_delivers_one_line_to_every_sink() {
        let (pipeline, buffers) = buffer_pipeline(Encoder::Json, 2);

        pipeline.write(Level::Warn, format_args!("fan out"), here());

        assert_eq!(buffers[0].contents(), buffers[1].contents());
        assert_eq!(buffers[0].lines().len(), 1);
    }

    #[test]
    fn threshold_change_applies_without_a_rebuild() {
        let (pipeline, buffers) = buffer_pipeline(Encoder::Console, 1);

        pipeline.write(Level::Debug, format_args!("too quiet"), here());
        assert_eq!(buffers[0].contents(), "");

        pipeline.set_level(Level::Debug);
        pipeline.write(Level::Debug, format_args!("now audible"), here());
        assert!(buffers[0].contents().contains("now audible"));
    }

    #[test]
    fn backtrace_attaches_at_and_above_the_stacktrace_level() {
        let (mut pipeline, buffers) = buffer_pipeline(Encoder::Json, 1);
        pipeline.stacktrace_level = Level::Error;

        pipeline.write(Level::Warn, format_args!("calm"), here());
        pipeline.write(Level::Error, format_args!("loud"), here());

        let lines = buffers[0].lines();
        let calm: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        let loud: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert!(calm.get("S").is_none());
        let trace = loud["S"].as_str().unwrap();
        assert!(!trace.is_empty());
    }

    #[test]
    fn name_tag_rides_every_record() {
        let (mut pipeline, buffers) = buffer_pipeline(Encoder::Json, 1);
        pipeline.name = Some("billing".to_string());

        pipeline.write(Level::Info, format_args!("tagged"), here());

        let value: serde_json::Value =
            serde_json::from_str(&buffers[0].lines()[0]).unwrap();
        assert_eq!(value["N"], "billing");
    }

    #[test]
    fn build_resolves_levels_and_sink_set_from_the_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.level = "warn".to_string();
        config.enable_json_format();
        config.disable_console_out();
        config.set_file_out(dir.path(), "pipe", 24, 2);

        let pipeline = Pipeline::build(&config).unwrap();

        assert_eq!(pipeline.encoder, Encoder::Json);
        assert_eq!(pipeline.sinks.len(), 1);
        assert_eq!(config.atomic_level.level(), Level::Warn);
        assert!(!pipeline.enabled(Level::Info));
        assert!(pipeline.enabled(Level::Warn));
    }

    #[test]
    fn build_with_no_outputs_yields_an_empty_tee() {
        let mut config = Config::default();
        config.disable_console_out();
        config.file_out = None;

        let pipeline = Pipeline::build(&config).unwrap();
        assert!(pipeline.sinks.is_empty());

        pipeline.write(Level::Error, format_args!("nowhere to go"), here());
    }

    #[test]
    fn encoding_choice_does_not_change_filtering() {
        let (console, console_buffers) = buffer_pipeline(Encoder::Console, 1);
        let (json, json_buffers) = buffer_pipeline(Encoder::Json, 1);

        for pipeline in [&console, &json] {
            pipeline.write(Level::Debug, format_args!("below"), here());
            pipeline.write(Level::Info, format_args!("at"), here());
            pipeline.write(Level::Error, format_args!("above"), here());
        }

        assert_eq!(console_buffers[0].lines().len(), 2);
        assert_eq!(json_buffers[0].lines().len(), 2);
        for line in json_buffers[0].lines() {
            let value: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert!(value["L"].is_string());
            assert!(value["M"].is_string());
        }
    }
}
