/// Per-`init` state of the plugin.
///
/// `render_buf` is reused by every [`PluginState::render`] call, so the host
/// must not render two events on the same plugin handle at once.
#[derive(Debug, Default)]
pub struct PluginState {
    last_error: String,
    render_buf: String,
}

impl PluginState {
    /// The init configuration is opaque and not interpreted.
    pub fn new(_config: &str) -> Self {
        Self::default()
    }

    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Replaces the last error. Reading it back does not clear it.
    pub fn set_last_error(&mut self, message: impl Into<String>) {
        self.last_error = message.into();
    }

    /// Renders `payload` as `evt-to-string(len=<n>): <payload>`.
    pub fn render(&mut self, payload: &[u8]) -> &str {
        self.render_buf.clear();
        self.render_buf.push_str("evt-to-string(len=");
        self.render_buf.push_str(&payload.len().to_string());
        self.render_buf.push_str("): ");
        self.render_buf.push_str(&String::from_utf8_lossy(payload));
        &self.render_buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_without_error() {
        let state = PluginState::new("ignored config");
        assert_eq!(state.last_error(), "");
    }

    #[test]
    fn last_error_survives_reads() {
        let mut state = PluginState::new("");
        state.set_last_error("boom");
        assert_eq!(state.last_error(), "boom");
        assert_eq!(state.last_error(), "boom");
        state.set_last_error("again");
        assert_eq!(state.last_error(), "again");
    }

    #[test]
    fn renders_payload_with_length() {
        let mut state = PluginState::new("");
        assert_eq!(state.render(b"dummy2"), "evt-to-string(len=6): dummy2");
        assert_eq!(state.render(b""), "evt-to-string(len=0): ");
        assert_eq!(state.render(b"dummy10"), "evt-to-string(len=7): dummy10");
    }

    #[test]
    fn renders_invalid_utf8_lossily() {
        let mut state = PluginState::new("");
        assert_eq!(state.render(b"dum\xffmy"), "evt-to-string(len=6): dum\u{fffd}my");
    }
}
