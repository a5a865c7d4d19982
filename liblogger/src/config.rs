/*
 * Configuration management for the logger
 *
 * This module handles:
 * - Parsing configuration from TOML files (the [logging] section of app_config.toml)
 * - The LogType enum for output destinations (Console, File)
 * - The LogLevel enum for severity levels (Debug, Info, Warn, Error)
 * - Default values for every setting
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Log severity levels, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

// Case-insensitive, and accepts "warning" as an alias
impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(serde::de::Error::unknown_variant(
                &s,
                &["debug", "info", "warn", "warning", "error"],
            )),
        }
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Supported output destinations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LogType {
    Console,
    File,
}

impl<'de> Deserialize<'de> for LogType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "console" => Ok(LogType::Console),
            "file" => Ok(LogType::File),
            _ => Err(serde::de::Error::unknown_variant(
                &s,
                &["console", "file"],
            )),
        }
    }
}

/// Configuration for the logger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Type of output (console, file)
    #[serde(rename = "type")]
    pub log_type: LogType,

    /// Minimum level to record
    pub threshold: LogLevel,

    /// File name for file-based logging
    #[serde(default)]
    pub file_path: Option<String>,

    /// Folder the log file is placed in
    #[serde(default)]
    pub log_folder: Option<String>,

    /// Size in MB after which the log file is rotated to `<file>.1`
    #[serde(default)]
    pub max_file_size_mb: Option<u64>,

    /// Flush after every write
    #[serde(default)]
    pub force_flush: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            log_type: LogType::Console,
            threshold: LogLevel::Info,
            file_path: None,
            log_folder: None,
            max_file_size_mb: None,
            force_flush: false,
        }
    }
}

/// Wrapper for the [logging] section of app_config.toml
#[derive(Debug, Deserialize)]
struct ConfigWrapper {
    logging: LogConfig,
}

impl LogConfig {
    /// Reads the configuration from a TOML file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn from_file(file_path: &str) -> Result<Self, String> {
        match fs::read_to_string(file_path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(LogConfig::default()),
            Err(e) => Err(format!("Could not read config file '{}': {}", file_path, e)),
        }
    }

    /// Parses either a document with a [logging] table or a bare logging table.
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        match toml::from_str::<ConfigWrapper>(content) {
            Ok(wrapper) => Ok(wrapper.logging),
            Err(e) => toml::from_str::<LogConfig>(content)
                .map_err(|_| format!("Failed to parse config file: {}", e)),
        }
    }

    /// Full path of the log file, joining `log_folder` when present.
    pub fn resolved_file_path(&self) -> Option<PathBuf> {
        let file_path = self.file_path.as_ref()?;
        Some(match &self.log_folder {
            Some(folder) => PathBuf::from(folder).join(file_path),
            None => PathBuf::from(file_path),
        })
    }

    pub fn max_file_size_bytes(&self) -> Option<u64> {
        self.max_file_size_mb.map(|mb| mb * 1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_logging_section_of_app_config() {
        let config = LogConfig::from_toml_str(
            r#"
            [logging]
            type = "File"
            threshold = "warning"
            file_path = "engine.log"
            log_folder = "logs"
            max_file_size_mb = 2

            [engine]
            event_count = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.log_type, LogType::File);
        assert_eq!(config.threshold, LogLevel::Warn);
        assert_eq!(config.resolved_file_path(), Some(PathBuf::from("logs").join("engine.log")));
        assert_eq!(config.max_file_size_bytes(), Some(2 * 1024 * 1024));
        assert!(!config.force_flush);
    }

    #[test]
    fn parses_bare_table() {
        let config = LogConfig::from_toml_str("type = \"FILE\"\nthreshold = \"DEBUG\"\n").unwrap();
        assert_eq!(config.log_type, LogType::File);
        assert_eq!(config.threshold, LogLevel::Debug);
    }

    #[test]
    fn rejects_unknown_output_type() {
        let err = LogConfig::from_toml_str("[logging]\ntype = \"http\"\nthreshold = \"info\"\n").unwrap_err();
        assert!(err.starts_with("Failed to parse config file"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = LogConfig::from_file("does/not/exist/app_config.toml").unwrap();
        assert_eq!(config.log_type, LogType::Console);
        assert_eq!(config.threshold, LogLevel::Info);
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
