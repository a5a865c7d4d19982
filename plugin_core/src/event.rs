use std::ptr;

use crate::status::TIMESTAMP_UNKNOWN;

/// An event as exchanged across the plugin boundary.
///
/// When returned from `next()`, the struct and the buffer behind `data` are
/// owned by the host, which releases both through the plugin's `free_event`
/// entry. When the host passes an event into `extract_fields()`, the plugin
/// only borrows it for the duration of the call.
#[repr(C)]
#[derive(Debug)]
pub struct PluginEvent {
    /// Raw payload bytes. Not null-terminated.
    pub data: *mut u8,

    /// Number of bytes behind `data`.
    pub datalen: u32,

    /// Capture time in nanoseconds since the epoch, or [`TIMESTAMP_UNKNOWN`].
    pub ts: u64,
}

impl PluginEvent {
    /// Builds a borrowed view over `event` for passing into the plugin.
    /// The view must not outlive `event` and must never be freed.
    pub fn borrowed(event: &Event) -> PluginEvent {
        PluginEvent {
            data: event.data.as_ptr() as *mut u8,
            datalen: event.data.len() as u32,
            ts: event.ts,
        }
    }

    /// Borrows the payload bytes.
    ///
    /// # Safety
    /// `data` must be null or point to `datalen` readable bytes that outlive
    /// the returned slice.
    pub unsafe fn payload(&self) -> &[u8] {
        if self.data.is_null() || self.datalen == 0 {
            return &[];
        }
        std::slice::from_raw_parts(self.data, self.datalen as usize)
    }
}

/// An owned event on the Rust side of the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub data: Vec<u8>,
    pub ts: u64,
}

impl Event {
    /// An event whose capture time is not known.
    pub fn untimed(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ts: TIMESTAMP_UNKNOWN,
        }
    }

    pub fn has_unknown_timestamp(&self) -> bool {
        self.ts == TIMESTAMP_UNKNOWN
    }

    /// Moves the event onto the heap as a [`PluginEvent`] owned by the receiver.
    ///
    /// Returns null if the payload does not fit the 32-bit length field.
    /// Release the result with [`Event::free_raw`].
    pub fn into_raw(self) -> *mut PluginEvent {
        let Ok(datalen) = u32::try_from(self.data.len()) else {
            return ptr::null_mut();
        };
        let data = Box::into_raw(self.data.into_boxed_slice()) as *mut u8;
        Box::into_raw(Box::new(PluginEvent {
            data,
            datalen,
            ts: self.ts,
        }))
    }

    /// Releases an event produced by [`Event::into_raw`]. Null is ignored.
    ///
    /// # Safety
    /// `raw` must be null or come from [`Event::into_raw`] in this same module
    /// instance, and must not be used afterwards.
    pub unsafe fn free_raw(raw: *mut PluginEvent) {
        if raw.is_null() {
            return;
        }
        let event = Box::from_raw(raw);
        if !event.data.is_null() {
            let payload = ptr::slice_from_raw_parts_mut(event.data, event.datalen as usize);
            drop(Box::from_raw(payload));
        }
    }

    /// Copies a plugin-owned event into an owned [`Event`].
    ///
    /// # Safety
    /// `raw` must be non-null and satisfy [`PluginEvent::payload`].
    pub unsafe fn copy_from_raw(raw: *const PluginEvent) -> Event {
        let raw = &*raw;
        Event {
            data: raw.payload().to_vec(),
            ts: raw.ts,
        }
    }
}
