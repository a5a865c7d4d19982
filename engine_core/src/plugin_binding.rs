use std::ffi::CString;
use std::os::raw::c_char;

use plugin_core::ffi_string::borrow_c_str_lossy;
use plugin_core::{FieldEntry, PluginType, SourcePlugin, HOST_API_VERSION, SUCCESS};
use semver::Version;

use crate::error::{HostError, LoadError};
use crate::plugin_session::PluginSession;

/// The engine's view of a loaded plugin.
///
/// Created after resolving a plugin's `create_plugin()` table. All constant
/// metadata is read once, copied into owned strings, and the plugin's
/// buffers are handed back through its `free_string` entry right away.
///
/// The table lives inside the plugin library: the `Library` returned next to
/// the binding by [`load_plugin`](crate::load_plugin) must outlive the binding
/// and every session created from it.
#[derive(Clone)]
pub struct SourcePluginBinding {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub contact: String,
    pub version: String,
    pub required_api_version: String,
    pub plugin_type: PluginType,
    /// Event source produced (source plugins) or accepted (extractors).
    /// Empty means the extractor accepts any source.
    pub event_source: String,
    pub fields: Vec<FieldEntry>,
    vtable: &'static SourcePlugin,
}

impl SourcePluginBinding {
    /// Reads and validates the metadata of a plugin table.
    pub fn new(vtable: &'static SourcePlugin) -> Result<Self, LoadError> {
        let plugin_type = PluginType::from_raw((vtable.get_type)())
            .ok_or_else(|| LoadError::UnknownPluginType((vtable.get_type)()))?;

        let required_api_version = take_metadata(vtable, (vtable.get_required_api_version)(), "required API version")?;
        check_api_version(&required_api_version)?;

        let fields_json = take_metadata(vtable, (vtable.get_fields)(), "fields")?;
        let fields = plugin_core::field::fields_from_json(&fields_json)?;

        Ok(Self {
            id: (vtable.get_id)(),
            name: take_metadata(vtable, (vtable.get_name)(), "name")?,
            description: take_metadata(vtable, (vtable.get_description)(), "description")?,
            contact: take_metadata(vtable, (vtable.get_contact)(), "contact")?,
            version: take_metadata(vtable, (vtable.get_version)(), "version")?,
            required_api_version,
            plugin_type,
            event_source: take_metadata(vtable, (vtable.get_event_source)(), "event source")?,
            fields,
            vtable,
        })
    }

    pub fn vtable(&self) -> &'static SourcePlugin {
        self.vtable
    }

    pub fn declares_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Whether this plugin's fields apply to events from `source`.
    pub fn serves_source(&self, source: &str) -> bool {
        self.event_source == source
            || (self.plugin_type == PluginType::Extractor && self.event_source.is_empty())
    }

    /// Creates plugin state. `config` is passed through untouched.
    pub fn init(&self, config: &str) -> Result<PluginSession, HostError> {
        let config = CString::new(config).map_err(|_| HostError::InteriorNul(config.to_string()))?;
        let mut rc = SUCCESS;
        let handle = (self.vtable.init)(config.as_ptr(), &mut rc);
        let session = PluginSession::new(self.clone(), handle);
        if rc != SUCCESS || handle.is_none() {
            return Err(HostError::PluginFailure {
                plugin: self.name.clone(),
                operation: "init",
                message: session.last_error(),
            });
        }
        Ok(session)
    }

    /// Copies a plugin-owned string and releases the original.
    pub(crate) fn take_string(&self, raw: *mut c_char) -> Option<String> {
        take_string(self.vtable, raw)
    }
}

impl std::fmt::Debug for SourcePluginBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourcePluginBinding")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("version", &self.version)
            .field("plugin_type", &self.plugin_type)
            .field("event_source", &self.event_source)
            .finish_non_exhaustive()
    }
}

fn take_string(vtable: &SourcePlugin, raw: *mut c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    let value = unsafe { borrow_c_str_lossy(raw) }.into_owned();
    (vtable.free_string)(raw);
    Some(value)
}

fn take_metadata(vtable: &SourcePlugin, raw: *mut c_char, what: &'static str) -> Result<String, LoadError> {
    take_string(vtable, raw).ok_or(LoadError::NullMetadata(what))
}

/// A plugin is accepted when it targets the host's major API version and no
/// newer minor/patch than the host provides.
pub fn check_api_version(required: &str) -> Result<(), LoadError> {
    let parse = |version: &str| {
        Version::parse(version).map_err(|source| LoadError::InvalidApiVersion {
            version: version.to_string(),
            source,
        })
    };
    let required_version = parse(required)?;
    let supported = parse(HOST_API_VERSION)?;

    if required_version.major != supported.major || required_version > supported {
        return Err(LoadError::IncompatibleApiVersion {
            required: required.to_string(),
            supported: HOST_API_VERSION.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_same_or_older_minor() {
        assert!(check_api_version("1.0.0").is_ok());
    }

    #[test]
    fn rejects_other_major_or_newer_version() {
        assert!(matches!(
            check_api_version("2.0.0"),
            Err(LoadError::IncompatibleApiVersion { .. })
        ));
        assert!(matches!(
            check_api_version("1.9.0"),
            Err(LoadError::IncompatibleApiVersion { .. })
        ));
        assert!(matches!(
            check_api_version("one"),
            Err(LoadError::InvalidApiVersion { .. })
        ));
    }
}
