//! Host-side support for event-source plugins: loading shared libraries,
//! safe bindings over their function tables, and the capture loop.

pub mod capture;
pub use capture::{capture_events, field_requests, CapturedEvent};

pub mod error;
pub use error::{HostError, LoadError};

pub mod plugin_binding;
pub use plugin_binding::SourcePluginBinding;

pub mod plugin_loader;
pub use plugin_loader::load_plugin;

pub mod plugin_registry;
pub use plugin_registry::PluginRegistry;

pub mod plugin_session;
pub use plugin_session::{CaptureInstance, FieldRequest, FieldValue, PluginSession};

pub mod plugin_utils;
