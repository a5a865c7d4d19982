use std::collections::HashMap;

/// Opaque token identifying one initialized plugin.
///
/// The host never dereferences it; the plugin maps it back to its own state
/// through a [`HandleTable`]. `0` is never issued and means "no plugin".
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginHandle(pub u64);

/// Opaque token identifying one open capture instance of a plugin.
/// `0` is never issued and means "no instance".
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceHandle(pub u64);

impl PluginHandle {
    pub const NONE: PluginHandle = PluginHandle(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl InstanceHandle {
    pub const NONE: InstanceHandle = InstanceHandle(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for PluginHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "plugin#{}", self.0)
    }
}

impl std::fmt::Display for InstanceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "instance#{}", self.0)
    }
}

/// Owns the state behind every token a plugin has handed out.
///
/// Tokens start at 1 and are never reused within a process, so a stale token
/// held by the host resolves to nothing instead of to someone else's state.
pub struct HandleTable<T> {
    next_id: u64,
    entries: HashMap<u64, T>,
}

impl<T> HandleTable<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: HashMap::new(),
        }
    }

    /// Stores `value` and returns the token that now refers to it.
    pub fn insert(&mut self, value: T) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, value);
        id
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    pub fn remove(&mut self, id: u64) -> Option<T> {
        self.entries.remove(&id)
    }

    /// Drops every entry for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.entries.retain(|_, value| keep(value));
    }
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
