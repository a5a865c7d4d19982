//! `json` extractor plugin.
//!
//! Produces no events of its own. Given events from any source, it exposes
//! string values found inside JSON payloads (`json.value[/path]`) and the
//! re-indented payload itself (`json.obj`), plus the legacy `jevt.*` aliases.

use std::os::raw::c_char;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use plugin_core::ffi_string::{borrow_c_str, borrow_c_str_lossy, into_owned_c_string};
use plugin_core::{
    declare_extractor_plugin, log_debug, log_info, log_warn, ExtractField, HandleTable,
    PluginError, PluginEvent, PluginHandle, FAILURE, SUCCESS,
};

pub mod descriptor;
pub mod extract;

use descriptor::DESCRIPTOR;
use extract::JsonEvent;

const NO_ERROR: &str = "no error";

#[derive(Debug, Default)]
struct JsonState {
    last_error: Option<PluginError>,
}

static PLUGINS: Lazy<Mutex<HandleTable<JsonState>>> = Lazy::new(|| Mutex::new(HandleTable::new()));

fn plugins() -> MutexGuard<'static, HandleTable<JsonState>> {
    PLUGINS.lock().unwrap_or_else(PoisonError::into_inner)
}

#[ctor::ctor]
fn on_load() {
    if let Err(e) = plugin_core::init_logger(DESCRIPTOR.name) {
        eprintln!("[plugin_json] Failed to initialize logger: {}", e);
    }
    log_debug!("plugin_json loaded");
}

fn fail(plugin: PluginHandle, error: PluginError) -> i32 {
    log_warn!(&error.to_string(), Some(plugin.to_string()));
    if let Some(state) = plugins().get_mut(plugin.0) {
        state.last_error = Some(error);
    }
    FAILURE
}

extern "C" fn plugin_init(config: *const c_char, rc: *mut i32) -> PluginHandle {
    let config = unsafe { borrow_c_str_lossy(config) };
    let plugin = PluginHandle(plugins().insert(JsonState::default()));
    log_info!("plugin initialized", Some(plugin.to_string()));
    log_debug!("init config", Some(config.into_owned()));
    if !rc.is_null() {
        unsafe { *rc = SUCCESS };
    }
    plugin
}

extern "C" fn plugin_destroy(plugin: PluginHandle) {
    if plugins().remove(plugin.0).is_some() {
        log_info!("plugin destroyed", Some(plugin.to_string()));
    }
}

extern "C" fn plugin_get_last_error(plugin: PluginHandle) -> *mut c_char {
    let message = match plugins().get(plugin.0) {
        Some(JsonState { last_error: Some(e) }) => e.to_string(),
        Some(JsonState { last_error: None }) => NO_ERROR.to_string(),
        None => PluginError::UnknownPlugin(plugin).to_string(),
    };
    into_owned_c_string(&message)
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
    let event = JsonEvent::parse(payload);
    for slot in slots {
        let (name, arg) = unsafe { (borrow_c_str(slot.field), borrow_c_str(slot.arg)) };
        let value = match (&event, name) {
            (Some(event), Some(name)) => event.field(name, arg),
            _ => None,
        };
        match value {
            Some(value) => slot.set_str(&value),
            None => slot.set_absent(),
        }
    }
    SUCCESS
}

declare_extractor_plugin! {
    descriptor: DESCRIPTOR,
    init: plugin_init,
    destroy: plugin_destroy,
    get_last_error: plugin_get_last_error,
    extract_fields: plugin_extract_fields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugin_core::ffi_string::free_owned_c_string;
    use plugin_core::{Event, FieldType};
    use pretty_assertions::assert_eq;
    use std::ffi::CString;
    use std::ptr;

    fn take_string(raw: *mut c_char) -> String {
        let value = unsafe { borrow_c_str(raw) }.unwrap_or_default().to_string();
        unsafe { free_owned_c_string(raw) };
        value
    }

    #[test]
    fn last_error_defaults_to_no_error() {
        let plugin = plugin_init(ptr::null(), ptr::null_mut());
        assert_eq!(take_string(plugin_get_last_error(plugin)), NO_ERROR);

        assert_eq!(plugin_extract_fields(plugin, ptr::null(), 1, ptr::null_mut()), FAILURE);
        assert_eq!(take_string(plugin_get_last_error(plugin)), "null pointer passed for 'evt'");
        plugin_destroy(plugin);
    }

    #[test]
    fn fills_string_slots_in_order() {
        let plugin = plugin_init(ptr::null(), ptr::null_mut());
        let event = Event::untimed(r#"{"user":{"name":"root"}}"#);
        let raw = PluginEvent::borrowed(&event);

        let value = CString::new("json.value").unwrap();
        let bogus = CString::new("json.bogus").unwrap();
        let path = CString::new("/user/name").unwrap();
        let mut slots = [
            ExtractField::request(bogus.as_ptr(), ptr::null(), FieldType::String),
            ExtractField::request(value.as_ptr(), path.as_ptr(), FieldType::String),
        ];

        assert_eq!(plugin_extract_fields(plugin, &raw, 2, slots.as_mut_ptr()), SUCCESS);
        assert!(!slots[0].is_present());
        assert!(slots[1].is_present());
        assert_eq!(take_string(slots[1].res_str), "root");
        plugin_destroy(plugin);
    }
}
