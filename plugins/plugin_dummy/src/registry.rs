//! Process-wide ownership of plugin and instance state.
//!
//! The host only ever sees the tokens issued here. Both tables sit behind a
//! mutex so that separate handles can be driven from separate host threads;
//! calls on one handle are still expected to be serialized by the host.

use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use plugin_core::{Event, HandleTable, InstanceHandle, PluginError, PluginHandle};

use crate::instance::SourceInstance;
use crate::state::PluginState;

struct OpenInstance {
    owner: PluginHandle,
    source: SourceInstance,
}

static PLUGINS: Lazy<Mutex<HandleTable<PluginState>>> = Lazy::new(|| Mutex::new(HandleTable::new()));
static INSTANCES: Lazy<Mutex<HandleTable<OpenInstance>>> = Lazy::new(|| Mutex::new(HandleTable::new()));

fn plugins() -> MutexGuard<'static, HandleTable<PluginState>> {
    PLUGINS.lock().unwrap_or_else(PoisonError::into_inner)
}

fn instances() -> MutexGuard<'static, HandleTable<OpenInstance>> {
    INSTANCES.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn init(config: &str) -> PluginHandle {
    PluginHandle(plugins().insert(PluginState::new(config)))
}

/// Releases the plugin and every instance still open on it.
/// Unknown handles are ignored.
pub fn destroy(plugin: PluginHandle) -> bool {
    let removed = plugins().remove(plugin.0).is_some();
    if removed {
        instances().retain(|open| open.owner != plugin);
    }
    removed
}

pub fn last_error(plugin: PluginHandle) -> Result<String, PluginError> {
    plugins()
        .get(plugin.0)
        .map(|state| state.last_error().to_string())
        .ok_or(PluginError::UnknownPlugin(plugin))
}

/// Stores `error` in the plugin's last-error slot, if the plugin exists.
pub fn record_error(plugin: PluginHandle, error: &PluginError) {
    if let Some(state) = plugins().get_mut(plugin.0) {
        state.set_last_error(error.to_string());
    }
}

pub fn open(plugin: PluginHandle, params: &str) -> Result<InstanceHandle, PluginError> {
    if plugins().get(plugin.0).is_none() {
        return Err(PluginError::UnknownPlugin(plugin));
    }
    let id = instances().insert(OpenInstance {
        owner: plugin,
        source: SourceInstance::new(params),
    });
    Ok(InstanceHandle(id))
}

/// Unknown or foreign instances are ignored.
pub fn close(plugin: PluginHandle, instance: InstanceHandle) -> bool {
    let mut table = instances();
    match table.get(instance.0) {
        Some(open) if open.owner == plugin => table.remove(instance.0).is_some(),
        _ => false,
    }
}

pub fn next(plugin: PluginHandle, instance: InstanceHandle) -> Result<Event, PluginError> {
    let mut table = instances();
    let open = table
        .get_mut(instance.0)
        .ok_or(PluginError::UnknownInstance(instance))?;
    if open.owner != plugin {
        return Err(PluginError::ForeignInstance { instance, plugin });
    }
    Ok(open.source.next_event())
}

pub fn render(plugin: PluginHandle, payload: &[u8]) -> Result<String, PluginError> {
    plugins()
        .get_mut(plugin.0)
        .map(|state| state.render(payload).to_string())
        .ok_or(PluginError::UnknownPlugin(plugin))
}
