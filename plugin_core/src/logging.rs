//! Logging for plugins
//!
//! Re-exports the `liblogger` macros so that every plugin logs through the
//! same sink as the host. Without the `logging` feature the macros expand to
//! nothing and plugins carry no logger at all.

#[cfg(feature = "logging")]
pub use liblogger::Logger;

/// Connects a plugin to the process logger.
///
/// The host normally initializes the logger before loading plugins, in which
/// case this is a no-op. Otherwise the logger is configured from
/// `app_config.toml` in the working directory, falling back to console output.
///
/// # Example
///
/// ```ignore
/// if let Err(e) = plugin_core::init_logger("plugin_dummy") {
///     eprintln!("Failed to initialize logger: {}", e);
/// }
/// ```
#[cfg(feature = "logging")]
pub fn init_logger(plugin_name: &str) -> Result<(), String> {
    if liblogger::Logger::is_initialized() {
        return Ok(());
    }
    match liblogger::Logger::init_with_config_file("app_config.toml") {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("[{}] Error initializing logger from config: {}", plugin_name, e);
            liblogger::Logger::init_with_config(liblogger::LogConfig::default())
        }
    }
}

#[cfg(not(feature = "logging"))]
mod no_op_macros {
    #[macro_export]
    macro_rules! log_debug {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! log_info {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! log_warn {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! log_error {
        ($($arg:tt)*) => {};
    }
}

#[cfg(not(feature = "logging"))]
pub fn init_logger(_plugin_name: &str) -> Result<(), String> {
    Ok(())
}
