//! Errors raised inside a plugin while serving a boundary call.
//!
//! None of these cross the boundary as values: the entry point returns
//! [`FAILURE`](crate::FAILURE) and stores the rendered message in the
//! plugin's last-error slot.

use crate::handle::{InstanceHandle, PluginHandle};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginError {
    /// The host passed a plugin token that was never issued or was destroyed.
    #[error("unknown plugin handle {0}")]
    UnknownPlugin(PluginHandle),

    /// The host passed an instance token that was never issued or was closed.
    #[error("unknown instance handle {0}")]
    UnknownInstance(InstanceHandle),

    /// The instance exists but was opened on another plugin handle.
    #[error("{instance} was not opened by {plugin}")]
    ForeignInstance {
        instance: InstanceHandle,
        plugin: PluginHandle,
    },

    /// A required pointer argument was null.
    #[error("null pointer passed for '{0}'")]
    NullPointer(&'static str),

    /// An event could not be moved across the boundary.
    #[error("event payload of {0} bytes exceeds the 32-bit length field")]
    PayloadTooLarge(usize),
}
