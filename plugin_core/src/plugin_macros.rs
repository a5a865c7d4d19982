/// Declares the `create_plugin()` entry point of a source plugin.
///
/// Metadata getters and the `free_string` / `free_event` release entries are
/// generated from the plugin's `static` [`PluginDescriptor`](crate::PluginDescriptor);
/// the stateful entry points are the plugin's own `extern "C"` functions.
///
/// ```ignore
/// plugin_core::declare_source_plugin! {
///     descriptor: DESCRIPTOR,
///     init: plugin_init,
///     destroy: plugin_destroy,
///     get_last_error: plugin_get_last_error,
///     open: plugin_open,
///     close: plugin_close,
///     next: plugin_next,
///     event_to_string: plugin_event_to_string,
///     extract_fields: plugin_extract_fields,
/// }
/// ```
#[macro_export]
macro_rules! declare_source_plugin {
    (
        descriptor: $desc:expr,
        init: $init:path,
        destroy: $destroy:path,
        get_last_error: $last_error:path,
        open: $open:path,
        close: $close:path,
        next: $next:path,
        event_to_string: $to_string:path,
        extract_fields: $extract:path $(,)?
    ) => {
        $crate::declare_source_plugin!(@table $desc, $init, $destroy, $last_error, $extract,
            Some($open), Some($close), Some($next), Some($to_string));
    };

    (@table $desc:expr, $init:path, $destroy:path, $last_error:path, $extract:path,
        $open:expr, $close:expr, $next:expr, $to_string:expr) => {
        extern "C" fn __plugin_get_required_api_version() -> *mut ::std::os::raw::c_char {
            $crate::ffi_string::into_owned_c_string($desc.required_api_version)
        }

        extern "C" fn __plugin_get_type() -> u32 {
            $desc.plugin_type as u32
        }

        extern "C" fn __plugin_get_id() -> u32 {
            $desc.id
        }

        extern "C" fn __plugin_get_name() -> *mut ::std::os::raw::c_char {
            $crate::ffi_string::into_owned_c_string($desc.name)
        }

        extern "C" fn __plugin_get_description() -> *mut ::std::os::raw::c_char {
            $crate::ffi_string::into_owned_c_string($desc.description)
        }

        extern "C" fn __plugin_get_contact() -> *mut ::std::os::raw::c_char {
            $crate::ffi_string::into_owned_c_string($desc.contact)
        }

        extern "C" fn __plugin_get_version() -> *mut ::std::os::raw::c_char {
            $crate::ffi_string::into_owned_c_string($desc.version)
        }

        extern "C" fn __plugin_get_event_source() -> *mut ::std::os::raw::c_char {
            $crate::ffi_string::into_owned_c_string($desc.event_source)
        }

        extern "C" fn __plugin_get_fields() -> *mut ::std::os::raw::c_char {
            $crate::ffi_string::into_owned_c_string(&$desc.fields_json())
        }

        extern "C" fn __plugin_free_string(value: *mut ::std::os::raw::c_char) {
            unsafe { $crate::ffi_string::free_owned_c_string(value) }
        }

        extern "C" fn __plugin_free_event(evt: *mut $crate::PluginEvent) {
            unsafe { $crate::Event::free_raw(evt) }
        }

        /// Entry point resolved by the host after loading the library.
        #[no_mangle]
        pub extern "C" fn create_plugin() -> *const $crate::SourcePlugin {
            static PLUGIN: $crate::SourcePlugin = $crate::SourcePlugin {
                get_required_api_version: __plugin_get_required_api_version,
                get_type: __plugin_get_type,
                init: $init,
                destroy: $destroy,
                get_last_error: $last_error,
                get_id: __plugin_get_id,
                get_name: __plugin_get_name,
                get_description: __plugin_get_description,
                get_contact: __plugin_get_contact,
                get_version: __plugin_get_version,
                get_event_source: __plugin_get_event_source,
                get_fields: __plugin_get_fields,
                open: $open,
                close: $close,
                next: $next,
                event_to_string: $to_string,
                extract_fields: $extract,
                free_string: __plugin_free_string,
                free_event: __plugin_free_event,
            };
            &PLUGIN
        }
    };
}

/// Declares the `create_plugin()` entry point of an extractor-only plugin.
/// The source entries (`open`, `close`, `next`, `event_to_string`) are left empty.
#[macro_export]
macro_rules! declare_extractor_plugin {
    (
        descriptor: $desc:expr,
        init: $init:path,
        destroy: $destroy:path,
        get_last_error: $last_error:path,
        extract_fields: $extract:path $(,)?
    ) => {
        $crate::declare_source_plugin!(@table $desc, $init, $destroy, $last_error, $extract,
            None, None, None, None);
    };
}
