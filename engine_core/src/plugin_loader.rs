use std::path::Path;

use libloading::{Library, Symbol};
use plugin_core::{log_debug, log_info, SourcePlugin};

use crate::error::LoadError;
use crate::plugin_binding::SourcePluginBinding;

/// Loads a plugin from a shared library file and returns its binding.
///
/// The library must export `create_plugin()` returning a `'static`
/// [`SourcePlugin`] table. The returned `Library` keeps the code mapped:
/// drop it only after the binding and every session created from it.
pub fn load_plugin<P: AsRef<Path>>(path: P) -> Result<(SourcePluginBinding, Library), LoadError> {
    let path = path.as_ref();
    log_debug!("loading plugin library", Some(path.display().to_string()));

    unsafe {
        let lib = Library::new(path)?;

        let plugin_ptr = {
            let constructor: Symbol<unsafe extern "C" fn() -> *const SourcePlugin> = lib
                .get(b"create_plugin")
                .map_err(|source| LoadError::MissingSymbol {
                    symbol: "create_plugin",
                    source,
                })?;
            constructor()
        };
        if plugin_ptr.is_null() {
            return Err(LoadError::NullPlugin);
        }

        // The table is a static inside `lib`, valid for as long as `lib` stays loaded.
        let vtable: &'static SourcePlugin = &*plugin_ptr;
        let binding = SourcePluginBinding::new(vtable)?;

        log_info!(
            &format!(
                "loaded {} plugin '{}' v{}",
                binding.plugin_type.as_str(),
                binding.name,
                binding.version
            ),
            Some(path.display().to_string())
        );
        Ok((binding, lib))
    }
}
