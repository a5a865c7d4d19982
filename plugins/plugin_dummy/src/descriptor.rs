use plugin_core::{FieldEntry, FieldType, PluginDescriptor, PluginType};

/// Every payload produced by this plugin starts with this text.
pub const EVT_PREFIX: &str = "dummy";

/// The only field this plugin can extract.
pub const COUNT_FIELD: &str = "dummy.count";

static FIELDS: [FieldEntry; 1] = [FieldEntry::new(FieldType::U64, COUNT_FIELD, "TBD")];

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    id: 4,
    name: "dummy_c",
    description: "do almost nothing, c-style",
    contact: "github.com/mstemm/plugins",
    version: "0.0.1",
    required_api_version: "1.0.0",
    plugin_type: PluginType::Source,
    event_source: "dummy",
    fields: &FIELDS,
};
