use std::os::raw::c_char;

use crate::{ExtractField, InstanceHandle, PluginEvent, PluginHandle};

/// The function table a dynamically loaded plugin exposes to the host.
///
/// Each plugin returns a pointer to a `'static` instance of this struct from
/// its `create_plugin()` symbol. The host uses it to:
/// - Read the plugin's constant metadata and field schema
/// - Create and destroy plugin state (`init` / `destroy`)
/// - Open capture instances and pull events from them (source plugins)
/// - Extract field values from events and render events as text
/// - Hand plugin-allocated strings and events back for release
///
/// ### Ownership
/// Every `*mut c_char` and `*mut PluginEvent` returned by an entry below is
/// owned by the host afterwards. The host must release it through
/// `free_string` / `free_event` of the same table, never with its own
/// allocator.
///
/// ### Threading
/// The plugin does no locking around a single handle. The host serializes
/// all calls that take the same `PluginHandle`, and all calls that take the
/// same `InstanceHandle`.
#[repr(C)]
pub struct SourcePlugin {
    /// Host API version the plugin was written against (e.g. "1.0.0").
    pub get_required_api_version: extern "C" fn() -> *mut c_char,

    /// Raw [`PluginType`](crate::PluginType) value.
    pub get_type: extern "C" fn() -> u32,

    /// Creates plugin state. `config` is an opaque, possibly null string.
    /// Writes [`SUCCESS`](crate::SUCCESS) or [`FAILURE`](crate::FAILURE) to `rc`.
    pub init: extern "C" fn(config: *const c_char, rc: *mut i32) -> PluginHandle,

    /// Releases plugin state and any instance still open on it.
    pub destroy: extern "C" fn(plugin: PluginHandle),

    /// Current content of the plugin's last-error slot. Not cleared by reading.
    pub get_last_error: extern "C" fn(plugin: PluginHandle) -> *mut c_char,

    pub get_id: extern "C" fn() -> u32,
    pub get_name: extern "C" fn() -> *mut c_char,
    pub get_description: extern "C" fn() -> *mut c_char,
    pub get_contact: extern "C" fn() -> *mut c_char,
    pub get_version: extern "C" fn() -> *mut c_char,
    pub get_event_source: extern "C" fn() -> *mut c_char,

    /// Field schema as a JSON array of `{type, name, desc[, argRequired]}`.
    pub get_fields: extern "C" fn() -> *mut c_char,

    /// Opens a capture instance. `params` is opaque and possibly null.
    /// Source plugins only.
    pub open: Option<extern "C" fn(plugin: PluginHandle, params: *const c_char, rc: *mut i32) -> InstanceHandle>,

    /// Closes a capture instance. Source plugins only.
    pub close: Option<extern "C" fn(plugin: PluginHandle, instance: InstanceHandle)>,

    /// Produces the next event of an instance into `*evt`. Source plugins only.
    pub next: Option<extern "C" fn(plugin: PluginHandle, instance: InstanceHandle, evt: *mut *mut PluginEvent) -> i32>,

    /// Renders an event payload as human-readable text. Source plugins only.
    pub event_to_string: Option<extern "C" fn(plugin: PluginHandle, data: *const u8, datalen: u32) -> *mut c_char>,

    /// Fills `num_fields` extraction slots for `evt`, in place and in order.
    pub extract_fields: extern "C" fn(plugin: PluginHandle, evt: *const PluginEvent, num_fields: u32, fields: *mut ExtractField) -> i32,

    /// Releases a string previously returned by this table.
    pub free_string: extern "C" fn(value: *mut c_char),

    /// Releases an event previously returned by `next`.
    pub free_event: extern "C" fn(evt: *mut PluginEvent),
}
