use plugin_core::{FieldEntry, FieldType, PluginDescriptor, PluginType};

pub const VALUE_FIELD: &str = "json.value";
pub const OBJ_FIELD: &str = "json.obj";
pub const LEGACY_VALUE_FIELD: &str = "jevt.value";
pub const LEGACY_OBJ_FIELD: &str = "jevt.obj";

static FIELDS: [FieldEntry; 4] = [
    FieldEntry::with_arg(
        FieldType::String,
        VALUE_FIELD,
        "allows to extract a value from a JSON-encoded input. Syntax is json.value[/x/y/z], where x,y and z are levels in the JSON hierarchy.",
    ),
    FieldEntry::new(FieldType::String, OBJ_FIELD, "the full json message as a text string."),
    FieldEntry::with_arg(
        FieldType::String,
        LEGACY_VALUE_FIELD,
        "alias for json.value, provided for backwards compatibility",
    ),
    FieldEntry::new(
        FieldType::String,
        LEGACY_OBJ_FIELD,
        "alias for json.obj, provided for backwards compatibility",
    ),
];

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    id: 0,
    name: "json",
    description: "implements extracting arbitrary fields from inputs formatted as JSON",
    contact: "github.com/leogr/plugins/",
    version: "0.0.1",
    required_api_version: "1.0.0",
    plugin_type: PluginType::Extractor,
    event_source: "",
    fields: &FIELDS,
};
