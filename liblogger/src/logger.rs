/*
 * Logger implementation
 *
 * A single process-wide logger, created lazily through OnceCell and guarded
 * by a Mutex. Writes are synchronous: a host may load this crate into
 * plugins, and plugins must not start threads or runtimes of their own.
 *
 * Until one of the init functions runs, messages at Info and above go to
 * stderr so that nothing logged before configuration is lost.
 */

use chrono::Utc;
use once_cell::sync::OnceCell;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::config::{LogConfig, LogLevel};
use crate::outputs::{create_log_output, LogOutput};

static LOGGER_INSTANCE: OnceCell<Mutex<LoggerInner>> = OnceCell::new();

pub(crate) struct LoggerInner {
    config: Option<LogConfig>,
    output: Option<Box<dyn LogOutput>>,
}

impl LoggerInner {
    pub(crate) fn new() -> Self {
        LoggerInner {
            config: None,
            output: None,
        }
    }

    pub(crate) fn init_with_config(&mut self, config: LogConfig) -> Result<(), String> {
        let output = create_log_output(&config)?;
        if let Some(previous) = self.output.as_mut() {
            let _ = previous.flush();
        }
        self.output = Some(output);
        self.config = Some(config);
        Ok(())
    }

    fn threshold(&self) -> LogLevel {
        self.config
            .as_ref()
            .map(|c| c.threshold)
            .unwrap_or(LogLevel::Info)
    }

    pub(crate) fn log(&mut self, level: LogLevel, message: &str, context: Option<&str>, file: &str, line: u32, module: &str) {
        if level < self.threshold() {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let formatted = format_log_message(&timestamp, level, message, context, file, line, module);

        match self.output.as_mut() {
            Some(output) => {
                if let Err(e) = output.write_log(&formatted) {
                    eprintln!("Failed to write log: {}", e);
                }
            }
            None => {
                let _ = writeln!(io::stderr(), "{}", formatted);
            }
        }
    }

    pub(crate) fn flush(&mut self) -> Result<(), String> {
        match self.output.as_mut() {
            Some(output) => output.flush(),
            None => Ok(()),
        }
    }
}

/// `<timestamp> [LEVEL] [file:line] [module] message[ | context]`
pub(crate) fn format_log_message(timestamp: &str, level: LogLevel, message: &str,
                                 context: Option<&str>, file: &str, line: u32, module: &str) -> String {
    let level_str = level.as_str();
    match context {
        Some(ctx) => format!("{} [{}] [{}:{}] [{}] {} | {}",
            timestamp, level_str, file, line, module, message, ctx),
        None => format!("{} [{}] [{}:{}] [{}] {}",
            timestamp, level_str, file, line, module, message),
    }
}

fn instance() -> &'static Mutex<LoggerInner> {
    LOGGER_INSTANCE.get_or_init(|| Mutex::new(LoggerInner::new()))
}

fn with_inner<R>(f: impl FnOnce(&mut LoggerInner) -> R) -> R {
    let mut guard = instance().lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

pub struct Logger;

impl Logger {
    /// Initialize from a specific TOML file.
    pub fn init_with_config_file(config_path: &str) -> Result<(), String> {
        let config = LogConfig::from_file(config_path)?;
        Self::init_with_config(config)
    }

    /// Initialize (or reconfigure) with an explicit configuration.
    pub fn init_with_config(config: LogConfig) -> Result<(), String> {
        with_inner(|inner| inner.init_with_config(config))
    }

    pub fn is_initialized() -> bool {
        with_inner(|inner| inner.config.is_some())
    }

    pub fn debug(message: &str, context: Option<String>, file: &'static str, line: u32, module: &'static str) {
        Self::log_with_metadata(LogLevel::Debug, message, context, file, line, module)
    }

    pub fn info(message: &str, context: Option<String>, file: &'static str, line: u32, module: &'static str) {
        Self::log_with_metadata(LogLevel::Info, message, context, file, line, module)
    }

    pub fn warn(message: &str, context: Option<String>, file: &'static str, line: u32, module: &'static str) {
        Self::log_with_metadata(LogLevel::Warn, message, context, file, line, module)
    }

    pub fn error(message: &str, context: Option<String>, file: &'static str, line: u32, module: &'static str) {
        Self::log_with_metadata(LogLevel::Error, message, context, file, line, module)
    }

    fn log_with_metadata(level: LogLevel, message: &str, context: Option<String>, file: &str, line: u32, module: &str) {
        let file_name = Path::new(file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file);

        with_inner(|inner| inner.log(level, message, context.as_deref(), file_name, line, module));
    }

    /// Flush buffered output.
    pub fn flush() -> Result<(), String> {
        with_inner(|inner| inner.flush())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogType;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn file_logger(threshold: LogLevel) -> (LoggerInner, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut inner = LoggerInner::new();
        inner
            .init_with_config(LogConfig {
                log_type: LogType::File,
                threshold,
                file_path: Some("engine.log".to_string()),
                log_folder: Some(dir.path().to_string_lossy().into_owned()),
                force_flush: true,
                ..LogConfig::default()
            })
            .unwrap();
        (inner, dir)
    }

    fn written_lines(dir: &TempDir) -> Vec<String> {
        fs::read_to_string(dir.path().join("engine.log"))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn messages_below_threshold_are_skipped() {
        let (mut inner, dir) = file_logger(LogLevel::Warn);
        inner.log(LogLevel::Info, "skipped", None, "lib.rs", 1, "plugin_dummy");
        inner.log(LogLevel::Error, "kept", None, "lib.rs", 2, "plugin_dummy");

        let lines = written_lines(&dir);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("[ERROR] [lib.rs:2] [plugin_dummy] kept"));
    }

    #[test]
    fn context_is_appended() {
        let (mut inner, dir) = file_logger(LogLevel::Debug);
        inner.log(LogLevel::Debug, "opened", Some("instance#1"), "lib.rs", 9, "plugin_dummy");
        assert!(written_lines(&dir)[0].ends_with("opened | instance#1"));
    }

    #[test]
    fn format_matches_line_layout() {
        let line = format_log_message("2026-01-01T00:00:00Z", LogLevel::Info, "msg", None, "a.rs", 3, "m");
        assert_eq!(line, "2026-01-01T00:00:00Z [INFO] [a.rs:3] [m] msg");
    }
}
