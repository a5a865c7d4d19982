use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::plugin_binding::SourcePluginBinding;

/// Every plugin loaded into the engine, keyed by plugin name.
pub struct PluginRegistry {
    plugins: RwLock<HashMap<String, SourcePluginBinding>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(HashMap::new()),
        }
    }

    /// Adds a plugin, replacing any earlier one with the same name.
    pub fn register(&self, plugin: SourcePluginBinding) {
        let mut map = self.plugins.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(plugin.name.clone(), plugin);
    }

    pub fn get(&self, name: &str) -> Option<SourcePluginBinding> {
        let map = self.plugins.read().unwrap_or_else(PoisonError::into_inner);
        map.get(name).cloned()
    }

    /// All plugins, sorted by name.
    pub fn all(&self) -> Vec<SourcePluginBinding> {
        let map = self.plugins.read().unwrap_or_else(PoisonError::into_inner);
        let mut plugins: Vec<_> = map.values().cloned().collect();
        plugins.sort_by(|a, b| a.name.cmp(&b.name));
        plugins
    }

    /// Plugins whose fields apply to events of `source`, sorted by name.
    pub fn field_providers_for(&self, source: &str) -> Vec<SourcePluginBinding> {
        self.all()
            .into_iter()
            .filter(|plugin| plugin.serves_source(source))
            .collect()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
