//! `dummy` source plugin.
//!
//! Produces `dummy1`, `dummy2`, ... for every open instance and extracts the
//! number back out as the `dummy.count` field. The `extern "C"` entry points
//! below are only boundary glue; the behaviour lives in the modules.

use std::os::raw::c_char;
use std::ptr;

use plugin_core::ffi_string::{borrow_c_str, borrow_c_str_lossy, into_owned_c_string};
use plugin_core::{
    declare_source_plugin, log_debug, log_info, log_warn, ExtractField, InstanceHandle,
    PluginError, PluginEvent, PluginHandle, FAILURE, SUCCESS,
};

pub mod descriptor;
pub mod extract;
pub mod instance;
pub mod registry;
pub mod state;

use descriptor::DESCRIPTOR;

// Runs when the library is loaded into the host.
#[ctor::ctor]
fn on_load() {
    if let Err(e) = plugin_core::init_logger(DESCRIPTOR.name) {
        eprintln!("[plugin_dummy] Failed to initialize logger: {}", e);
    }
    log_debug!("plugin_dummy loaded");
}

fn write_rc(rc: *mut i32, value: i32) {
    if !rc.is_null() {
        unsafe { *rc = value };
    }
}

fn fail(plugin: PluginHandle, error: PluginError) -> i32 {
    log_warn!(&error.to_string(), Some(plugin.to_string()));
    registry::record_error(plugin, &error);
    FAILURE
}

extern "C" fn plugin_init(config: *const c_char, rc: *mut i32) -> PluginHandle {
    let config = unsafe { borrow_c_str_lossy(config) };
    let plugin = registry::init(&config);
    log_info!("plugin initialized", Some(plugin.to_string()));
    log_debug!("init config", Some(config.into_owned()));
    write_rc(rc, SUCCESS);
    plugin
}

extern "C" fn plugin_destroy(plugin: PluginHandle) {
    if registry::destroy(plugin) {
        log_info!("plugin destroyed", Some(plugin.to_string()));
    }
}

extern "C" fn plugin_get_last_error(plugin: PluginHandle) -> *mut c_char {
    match registry::last_error(plugin) {
        Ok(message) => into_owned_c_string(&message),
        Err(e) => into_owned_c_string(&e.to_string()),
    }
}

extern "C" fn plugin_open(plugin: PluginHandle, params: *const c_char, rc: *mut i32) -> InstanceHandle {
    let params = unsafe { borrow_c_str_lossy(params) };
    match registry::open(plugin, &params) {
        Ok(instance) => {
            log_debug!("instance opened", Some(format!("{} on {}", instance, plugin)));
            write_rc(rc, SUCCESS);
            instance
        }
        Err(e) => {
            write_rc(rc, fail(plugin, e));
            InstanceHandle::NONE
        }
    }
}

extern "C" fn plugin_close(plugin: PluginHandle, instance: InstanceHandle) {
    if registry::close(plugin, instance) {
        log_debug!("instance closed", Some(format!("{} on {}", instance, plugin)));
    }
}

extern "C" fn plugin_next(plugin: PluginHandle, instance: InstanceHandle, evt: *mut *mut PluginEvent) -> i32 {
    if evt.is_null() {
        return fail(plugin, PluginError::NullPointer("evt"));
    }
    let event = match registry::next(plugin, instance) {
        Ok(event) => event,
        Err(e) => return fail(plugin, e),
    };

    let len = event.data.len();
    let raw = event.into_raw();
    if raw.is_null() {
        return fail(plugin, PluginError::PayloadTooLarge(len));
    }
    unsafe { *evt = raw };
    SUCCESS
}

extern "C" fn plugin_event_to_string(plugin: PluginHandle, data: *const u8, datalen: u32) -> *mut c_char {
    let payload: &[u8] = if data.is_null() || datalen == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(data, datalen as usize) }
    };
    match registry::render(plugin, payload) {
        Ok(text) => into_owned_c_string(&text),
        Err(e) => {
            fail(plugin, e);
            ptr::null_mut()
        }
    }
}

extern "C" fn plugin_extract_fields(plugin: PluginHandle, evt: *const PluginEvent, num_fields: u32, fields: *mut ExtractField) -> i32 {
    if num_fields == 0 {
        return SUCCESS;
    }
    if evt.is_null() {
        return fail(plugin, PluginError::NullPointer("evt"));
    }
    if fields.is_null() {
        return fail(plugin, PluginError::NullPointer("fields"));
    }

    let payload = unsafe { (*evt).payload() };
    let slots = unsafe { std::slice::from_raw_parts_mut(fields, num_fields as usize) };
    // A null or non-UTF-8 name matches no field.
    let names: Vec<&str> = slots
        .iter()
        .map(|slot| unsafe { borrow_c_str(slot.field) }.unwrap_or_default())
        .collect();
    let values = extract::extract_fields(names, payload);

    for (slot, value) in slots.iter_mut().zip(values) {
        match value {
            Some(value) => slot.set_u64(value),
            None => slot.set_absent(),
        }
    }
    SUCCESS
}

declare_source_plugin! {
    descriptor: DESCRIPTOR,
    init: plugin_init,
    destroy: plugin_destroy,
    get_last_error: plugin_get_last_error,
    open: plugin_open,
    close: plugin_close,
    next: plugin_next,
    event_to_string: plugin_event_to_string,
    extract_fields: plugin_extract_fields,
}
