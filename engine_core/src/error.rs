/// Errors raised while loading a plugin library and reading its metadata.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load plugin library: {0}")]
    Library(#[from] libloading::Error),

    #[error("plugin library has no '{symbol}' symbol: {source}")]
    MissingSymbol {
        symbol: &'static str,
        source: libloading::Error,
    },

    #[error("create_plugin() returned a null pointer")]
    NullPlugin,

    #[error("plugin returned null for {0}")]
    NullMetadata(&'static str),

    #[error("plugin declares unknown plugin type {0}")]
    UnknownPluginType(u32),

    #[error("plugin requires invalid API version '{version}': {source}")]
    InvalidApiVersion {
        version: String,
        source: semver::Error,
    },

    #[error("plugin requires API version {required}, host supports {supported}")]
    IncompatibleApiVersion { required: String, supported: String },

    #[error("plugin field schema is not valid JSON: {0}")]
    InvalidFieldSchema(#[from] serde_json::Error),
}

/// Errors raised while driving an initialized plugin.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The plugin returned FAILURE; `message` is its last error.
    #[error("plugin '{plugin}' failed in {operation}: {message}")]
    PluginFailure {
        plugin: String,
        operation: &'static str,
        message: String,
    },

    #[error("plugin '{plugin}' does not support {operation}")]
    Unsupported {
        plugin: String,
        operation: &'static str,
    },

    #[error("plugin '{plugin}' returned null from {operation}")]
    NullResult {
        plugin: String,
        operation: &'static str,
    },

    #[error("argument contains an interior NUL byte: {0:?}")]
    InteriorNul(String),
}
