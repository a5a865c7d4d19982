use plugin_core::Event;

use crate::descriptor::EVT_PREFIX;

/// One open capture session: an endless, non-restartable run of events.
#[derive(Debug, Default)]
pub struct SourceInstance {
    count: u64,
    buf: String,
}

impl SourceInstance {
    /// The open parameters are opaque and not interpreted.
    pub fn new(_params: &str) -> Self {
        Self::default()
    }

    /// Produces `dummy<N>` where N is 1 for the first event after open.
    /// Events carry no capture time.
    pub fn next_event(&mut self) -> Event {
        self.count += 1;

        self.buf.clear();
        self.buf.push_str(EVT_PREFIX);
        self.buf.push_str(&self.count.to_string());

        Event::untimed(self.buf.as_bytes())
    }
}
