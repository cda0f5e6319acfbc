//! Logger configuration, loadable from YAML documents.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::level::{AtomicLevel, Level};
use crate::{Error, Result};

/// Logging configuration.
///
/// Every field maps to a fixed document key; keys absent from a loaded
/// document keep their compiled-in default, and unknown keys are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Level threshold applied when a pipeline is built (key `LogLevel`).
    #[serde(rename = "LogLevel")]
    pub level: String,

    /// Records at or above this level carry a captured backtrace
    /// (key `StacktraceLevel`).
    #[serde(rename = "StacktraceLevel")]
    pub stacktrace_level: String,

    /// The live threshold for every pipeline built from this configuration.
    /// Shared between clones; not part of the document.
    #[serde(skip)]
    pub atomic_level: AtomicLevel,

    /// Name tag carried on every record when non-empty (key `ProjectName`).
    #[serde(rename = "ProjectName")]
    pub project_name: String,

    /// Call frames hidden from the reported source location
    /// (key `CallerSkip`). Accepted for document compatibility; records
    /// locate their caller at the emission site, so the value has no
    /// runtime effect.
    #[serde(rename = "CallerSkip")]
    pub caller_skip: usize,

    /// Encode records as JSON objects instead of console lines
    /// (key `JsonFormat`).
    #[serde(rename = "JsonFormat")]
    pub json_format: bool,

    /// Write records to standard output (key `ConsoleOut`).
    #[serde(rename = "ConsoleOut")]
    pub console_out: bool,

    /// Rotating file output (key `FileOut`).
    #[serde(rename = "FileOut")]
    pub file_out: Option<FileOut>,
}

/// Rotating file output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOut {
    /// Whether the file sink is constructed at all (key `Enable`).
    #[serde(rename = "Enable")]
    pub enable: bool,

    /// Directory the log files live in (key `Path`).
    #[serde(rename = "Path")]
    pub path: PathBuf,

    /// Base file name; rotated files are `<name>.<timestamp>.log`
    /// (key `Name`).
    #[serde(rename = "Name")]
    pub name: String,

    /// Rotation interval in hours (key `RotationTime`). Intervals under 24
    /// rotate hourly, 24 and above rotate daily.
    #[serde(rename = "RotationTime")]
    pub rotation_time: u64,

    /// Maximum number of rotated files kept on disk; 0 keeps everything
    /// (key `RotationCount`).
    #[serde(rename = "RotationCount")]
    pub rotation_count: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            stacktrace_level: "panic".to_string(),
            atomic_level: AtomicLevel::new(),
            project_name: String::new(),
            caller_skip: 1,
            json_format: false,
            console_out: true,
            file_out: Some(FileOut::default()),
        }
    }
}

impl Default for FileOut {
    fn default() -> Self {
        Self {
            enable: true,
            path: PathBuf::from("./logs/"),
            name: "log".to_string(),
            rotation_time: 24,
            rotation_count: 7,
        }
    }
}

impl Config {
    /// Load a configuration document, merging it over the defaults.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigRead`] when the file cannot be read,
    /// [`Error::ConfigParse`] when it is not valid YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        // An empty or comment-only document is a null, not a mapping.
        let config: Option<Config> =
            serde_yaml::from_str(&text).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config.unwrap_or_default())
    }

    /// Retarget the live level threshold.
    ///
    /// Writes the shared holder directly: every pipeline built from this
    /// configuration (or a clone of it) observes the change immediately,
    /// without a rebuild.
    pub fn set_level(&self, level: Level) {
        self.atomic_level.set_level(level);
    }

    /// Set the level at and above which records carry a backtrace.
    pub fn set_stacktrace_level(&mut self, level: impl Into<String>) {
        self.stacktrace_level = level.into();
    }

    /// Set the name tag carried on every record.
    pub fn set_project_name(&mut self, project_name: impl Into<String>) {
        self.project_name = project_name.into();
    }

    /// Set how many call frames are hidden from the reported location.
    ///
    /// Stored but not consulted: the facade's own frames never appear in a
    /// record, and wrappers hide themselves by carrying `#[track_caller]`.
    pub fn set_caller_skip(&mut self, caller_skip: usize) {
        self.caller_skip = caller_skip;
    }

    /// Encode records as JSON objects.
    pub fn enable_json_format(&mut self) {
        self.json_format = true;
    }

    /// Encode records as tab-separated console lines.
    pub fn disable_json_format(&mut self) {
        self.json_format = false;
    }

    /// Write records to standard output.
    pub fn enable_console_out(&mut self) {
        self.console_out = true;
    }

    /// Stop writing records to standard output.
    pub fn disable_console_out(&mut self) {
        self.console_out = false;
    }

    /// Replace the file output settings and enable the file sink.
    pub fn set_file_out(
        &mut self,
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        rotation_time: u64,
        rotation_count: u64,
    ) {
        self.file_out = Some(FileOut {
            enable: true,
            path: path.into(),
            name: name.into(),
            rotation_time,
            rotation_count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("logger.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn defaults_match_the_documented_table() {
        let config = Config::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.stacktrace_level, "panic");
        assert_eq!(config.project_name, "");
        assert_eq!(config.caller_skip, 1);
        assert!(!config.json_format);
        assert!(config.console_out);

        let file_out = config.file_out.expect("file output defaults to present");
        assert!(file_out.enable);
        assert_eq!(file_out.path, PathBuf::from("./logs/"));
        assert_eq!(file_out.name, "log");
        assert_eq!(file_out.rotation_time, 24);
        assert_eq!(file_out.rotation_count, 7);
    }

    #[test]
    fn single_key_document_keeps_every_other_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "LogLevel: \"debug\"\n");

        let config = Config::from_file(&path).unwrap();
        let defaults = Config::default();

        assert_eq!(config.level, "debug");
        assert_eq!(config.stacktrace_level, defaults.stacktrace_level);
        assert_eq!(config.project_name, defaults.project_name);
        assert_eq!(config.caller_skip, defaults.caller_skip);
        assert_eq!(config.json_format, defaults.json_format);
        assert_eq!(config.console_out, defaults.console_out);
        let file_out = config.file_out.unwrap();
        let default_file_out = defaults.file_out.unwrap();
        assert_eq!(file_out.enable, default_file_out.enable);
        assert_eq!(file_out.path, default_file_out.path);
        assert_eq!(file_out.name, default_file_out.name);
        assert_eq!(file_out.rotation_time, default_file_out.rotation_time);
        assert_eq!(file_out.rotation_count, default_file_out.rotation_count);
    }

    #[test]
    fn empty_document_loads_the_defaults() {
        let dir = tempfile::tempdir().unwrap();
        for body in ["", "# nothing configured\n", "{}\n"] {
            let path = write_config(&dir, body);

            let config = Config::from_file(&path).unwrap();
            assert_eq!(config.level, "info");
            assert!(config.console_out);
            assert!(config.file_out.is_some());
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "LogLevel: \"warn\"\nColorScheme: \"solarized\"\nFileOut:\n  Enable: false\n  Compression: true\n",
        );

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.level, "warn");
        assert!(!config.file_out.unwrap().enable);
    }

    #[test]
    fn nested_partial_file_out_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "FileOut:\n  Path: \"/var/log/app\"\n");

        let config = Config::from_file(&path).unwrap();
        let file_out = config.file_out.unwrap();
        assert_eq!(file_out.path, PathBuf::from("/var/log/app"));
        assert!(file_out.enable);
        assert_eq!(file_out.name, "log");
        assert_eq!(file_out.rotation_time, 24);
        assert_eq!(file_out.rotation_count, 7);
    }

    #[test]
    fn missing_file_reports_config_read() {
        let err = Config::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn malformed_document_reports_config_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "LogLevel: [not, a, string, for: {this\n");

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn set_level_writes_the_shared_holder() {
        let config = Config::default();
        let clone = config.clone();

        config.set_level(Level::Error);
        assert_eq!(clone.atomic_level.level(), Level::Error);
        assert!(!clone.atomic_level.enabled(Level::Warn));
    }

    #[test]
    fn set_file_out_forces_enable() {
        let mut config = Config::default();
        if let Some(file_out) = config.file_out.as_mut() {
            file_out.enable = false;
        }

        config.set_file_out("/tmp/app-logs", "app", 1, 3);
        let file_out = config.file_out.unwrap();
        assert!(file_out.enable);
        assert_eq!(file_out.path, PathBuf::from("/tmp/app-logs"));
        assert_eq!(file_out.name, "app");
        assert_eq!(file_out.rotation_time, 1);
        assert_eq!(file_out.rotation_count, 3);
    }

    #[test]
    fn toggles_flip_one_concern_each() {
        let mut config = Config::default();

        config.enable_json_format();
        assert!(config.json_format);
        config.disable_json_format();
        assert!(!config.json_format);

        config.disable_console_out();
        assert!(!config.console_out);
        config.enable_console_out();
        assert!(config.console_out);

        config.set_stacktrace_level("error");
        assert_eq!(config.stacktrace_level, "error");

        config.set_project_name("orders");
        assert_eq!(config.project_name, "orders");

        config.set_caller_skip(2);
        assert_eq!(config.caller_skip, 2);
    }
}
