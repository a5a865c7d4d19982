use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;

use liblogger::LogConfig;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "app_config.toml";

/// Contents of app_config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub logging: LogConfig,
    #[serde(default)]
    pub engine: EngineSection,
}

/// The [engine] section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Folder holding the plugin shared libraries.
    pub plugin_folder: String,
    /// Base name of the source plugin (`plugin_dummy` -> `libplugin_dummy.so`).
    pub source_plugin: String,
    /// Base names of extractor plugins loaded next to the source.
    pub extractor_plugins: Vec<String>,
    /// Passed to every plugin's init.
    pub init_config: String,
    /// Passed to the source plugin's open.
    pub open_params: String,
    /// Number of events to capture.
    pub event_count: usize,
    /// Arguments for fields that require one, keyed by field name.
    pub field_args: HashMap<String, String>,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            plugin_folder: "target/debug".to_string(),
            source_plugin: "plugin_dummy".to_string(),
            extractor_plugins: Vec::new(),
            init_config: String::new(),
            open_params: String::new(),
            event_count: 10,
            field_args: HashMap::new(),
        }
    }
}

impl EngineConfig {
    /// Reads the configuration; a missing file yields the defaults.
    pub fn from_file(path: &str) -> Result<Self, String> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(format!("Could not read config file '{}': {}", path, e)),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))
    }
}
