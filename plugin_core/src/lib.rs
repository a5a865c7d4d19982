//! The C-ABI contract between event-source plugins and the host engine.
//!
//! Plugins build against this crate, fill a [`SourcePlugin`] function table
//! through [`declare_source_plugin!`] or [`declare_extractor_plugin!`], and
//! export it as `create_plugin()`. Hosts resolve that symbol and drive the
//! plugin through the table.

pub mod descriptor;
pub mod error;
pub mod event;
pub mod ffi_string;
pub mod field;
pub mod handle;
pub mod logging;
pub mod plugin;
pub mod plugin_macros;
pub mod status;

pub use descriptor::PluginDescriptor;
pub use error::PluginError;
pub use event::{Event, PluginEvent};
pub use field::{ExtractField, FieldEntry, FieldType};
pub use handle::{HandleTable, InstanceHandle, PluginHandle};
pub use logging::init_logger;
pub use plugin::SourcePlugin;
pub use status::{PluginType, FAILURE, HOST_API_VERSION, SUCCESS, TIMESTAMP_UNKNOWN};

#[cfg(feature = "logging")]
pub use liblogger::{log_debug, log_error, log_info, log_warn};
