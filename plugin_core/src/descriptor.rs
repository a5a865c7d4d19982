use crate::field::{fields_to_json, FieldEntry};
use crate::status::PluginType;

/// Constant metadata a plugin publishes to the host.
///
/// Each plugin declares one `static` descriptor; the getters generated by
/// [`declare_source_plugin!`](crate::declare_source_plugin) read from it, so
/// every accessor returns the same value for the lifetime of the process.
#[derive(Debug)]
pub struct PluginDescriptor {
    /// Numeric id registered for the plugin's event source. 0 for extractors.
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub contact: &'static str,
    /// Semantic version of the plugin itself.
    pub version: &'static str,
    /// Semantic version of the host API the plugin was written against.
    pub required_api_version: &'static str,
    pub plugin_type: PluginType,
    /// Tag of the event source produced (source plugins) or consumed
    /// (extractor plugins). Empty means "any source".
    pub event_source: &'static str,
    pub fields: &'static [FieldEntry],
}

impl PluginDescriptor {
    /// The field schema as the JSON array returned by `get_fields()`.
    pub fn fields_json(&self) -> String {
        // A schema of plain strings cannot fail to serialize.
        fields_to_json(self.fields).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn declares_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    static FIELDS: [FieldEntry; 1] = [FieldEntry::new(FieldType::U64, "test.count", "count")];

    static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
        id: 99,
        name: "test",
        description: "test plugin",
        contact: "nowhere",
        version: "0.0.1",
        required_api_version: "1.0.0",
        plugin_type: PluginType::Source,
        event_source: "test",
        fields: &FIELDS,
    };

    #[test]
    fn fields_json_matches_schema() {
        assert_eq!(
            DESCRIPTOR.fields_json(),
            r#"[{"type":"uint64","name":"test.count","desc":"count"}]"#
        );
        assert!(DESCRIPTOR.declares_field("test.count"));
        assert!(!DESCRIPTOR.declares_field("test.bogus"));
    }
}
