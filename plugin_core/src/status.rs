/// Returned by every fallible entry point when the call completed.
pub const SUCCESS: i32 = 0;

/// Returned by every fallible entry point when the call failed.
/// The reason is available through `get_last_error()` on the plugin handle.
pub const FAILURE: i32 = 1;

/// Timestamp carried by events whose capture time is not known.
pub const TIMESTAMP_UNKNOWN: u64 = u64::MAX;

/// Version of the plugin API this crate describes.
pub const HOST_API_VERSION: &str = "1.0.0";

/// Capability class a plugin declares through `get_type()`.
///
/// Source plugins produce events (`open`/`next`/`close`); extractor plugins
/// only derive field values from events produced by someone else.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginType {
    Source = 1,
    Extractor = 2,
}

impl PluginType {
    pub fn from_raw(value: u32) -> Option<Self> {
        match value {
            1 => Some(PluginType::Source),
            2 => Some(PluginType::Extractor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PluginType::Source => "source",
            PluginType::Extractor => "extractor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_type_round_trips_through_raw() {
        assert_eq!(PluginType::from_raw(PluginType::Source as u32), Some(PluginType::Source));
        assert_eq!(PluginType::from_raw(PluginType::Extractor as u32), Some(PluginType::Extractor));
        assert_eq!(PluginType::from_raw(0), None);
    }

    #[test]
    fn plugin_type_names() {
        assert_eq!(PluginType::Source.as_str(), "source");
        assert_eq!(PluginType::Extractor.as_str(), "extractor");
    }
}
