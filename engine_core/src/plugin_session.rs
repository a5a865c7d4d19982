use std::cell::Cell;
use std::ffi::CString;
use std::marker::PhantomData;
use std::ptr;

use plugin_core::{
    Event, ExtractField, FieldEntry, FieldType, InstanceHandle, PluginEvent, PluginHandle, SUCCESS,
};

use crate::error::HostError;
use crate::plugin_binding::SourcePluginBinding;

/// One initialized plugin state on the plugin side. Destroyed on drop.
///
/// The plugin does no locking per handle, so a session is deliberately
/// `!Sync`: it can move between threads but only one can use it at a time.
pub struct PluginSession {
    binding: SourcePluginBinding,
    handle: PluginHandle,
    _not_sync: PhantomData<Cell<()>>,
}

/// A field to request from `extract()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRequest {
    pub name: String,
    pub arg: Option<String>,
    pub field_type: FieldType,
}

impl FieldRequest {
    pub fn u64(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg: None,
            field_type: FieldType::U64,
        }
    }

    pub fn string(name: impl Into<String>, arg: Option<&str>) -> Self {
        Self {
            name: name.into(),
            arg: arg.map(str::to_string),
            field_type: FieldType::String,
        }
    }

    /// A request for a schema entry, with its argument when it takes one.
    pub fn for_entry(entry: &FieldEntry, arg: Option<&str>) -> Self {
        Self {
            name: entry.name.to_string(),
            arg: arg.map(str::to_string),
            field_type: entry.field_type,
        }
    }
}

/// Outcome of one extraction slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Absent,
    U64(u64),
    Str(String),
}

impl FieldValue {
    pub fn is_present(&self) -> bool {
        !matches!(self, FieldValue::Absent)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Absent => write!(f, "<NA>"),
            FieldValue::U64(value) => write!(f, "{}", value),
            FieldValue::Str(value) => write!(f, "{}", value),
        }
    }
}

impl PluginSession {
    pub(crate) fn new(binding: SourcePluginBinding, handle: PluginHandle) -> Self {
        Self {
            binding,
            handle,
            _not_sync: PhantomData,
        }
    }

    pub fn handle(&self) -> PluginHandle {
        self.handle
    }

    pub fn binding(&self) -> &SourcePluginBinding {
        &self.binding
    }

    /// Current content of the plugin's last-error slot.
    pub fn last_error(&self) -> String {
        let raw = (self.binding.vtable().get_last_error)(self.handle);
        self.binding.take_string(raw).unwrap_or_default()
    }

    fn failure(&self, operation: &'static str) -> HostError {
        HostError::PluginFailure {
            plugin: self.binding.name.clone(),
            operation,
            message: self.last_error(),
        }
    }

    fn unsupported(&self, operation: &'static str) -> HostError {
        HostError::Unsupported {
            plugin: self.binding.name.clone(),
            operation,
        }
    }

    /// Opens a capture instance. `params` is passed through untouched.
    pub fn open(&self, params: &str) -> Result<CaptureInstance<'_>, HostError> {
        let open = self.binding.vtable().open.ok_or_else(|| self.unsupported("open"))?;
        let params = CString::new(params).map_err(|_| HostError::InteriorNul(params.to_string()))?;

        let mut rc = SUCCESS;
        let handle = open(self.handle, params.as_ptr(), &mut rc);
        if rc != SUCCESS || handle.is_none() {
            return Err(self.failure("open"));
        }
        Ok(CaptureInstance {
            session: self,
            handle,
        })
    }

    /// Human-readable rendering of an event.
    pub fn render(&self, event: &Event) -> Result<String, HostError> {
        let to_string = self
            .binding
            .vtable()
            .event_to_string
            .ok_or_else(|| self.unsupported("event_to_string"))?;
        let raw = to_string(self.handle, event.data.as_ptr(), event.data.len() as u32);
        self.binding.take_string(raw).ok_or_else(|| self.failure("event_to_string"))
    }

    /// Extracts every requested field from `event`, in request order.
    pub fn extract(&self, event: &Event, requests: &[FieldRequest]) -> Result<Vec<FieldValue>, HostError> {
        let to_c = |value: &str| CString::new(value).map_err(|_| HostError::InteriorNul(value.to_string()));
        let names = requests
            .iter()
            .map(|r| to_c(&r.name))
            .collect::<Result<Vec<_>, _>>()?;
        let args = requests
            .iter()
            .map(|r| r.arg.as_deref().map(to_c).transpose())
            .collect::<Result<Vec<_>, _>>()?;

        let mut slots: Vec<ExtractField> = requests
            .iter()
            .zip(names.iter().zip(args.iter()))
            .map(|(request, (name, arg))| {
                let arg = arg.as_ref().map_or(ptr::null(), |a| a.as_ptr());
                ExtractField::request(name.as_ptr(), arg, request.field_type)
            })
            .collect();

        let raw_event = PluginEvent::borrowed(event);
        let rc = (self.binding.vtable().extract_fields)(
            self.handle,
            &raw_event,
            slots.len() as u32,
            slots.as_mut_ptr(),
        );

        // String results are ours whatever the outcome.
        let values: Vec<FieldValue> = slots
            .iter()
            .map(|slot| {
                let text = self.binding.take_string(slot.res_str);
                if !slot.is_present() {
                    return FieldValue::Absent;
                }
                match FieldType::from_raw(slot.ftype) {
                    Some(FieldType::U64) => FieldValue::U64(slot.res_u64),
                    Some(FieldType::String) => text.map_or(FieldValue::Absent, FieldValue::Str),
                    None => FieldValue::Absent,
                }
            })
            .collect();

        if rc != SUCCESS {
            return Err(self.failure("extract_fields"));
        }
        Ok(values)
    }
}

impl Drop for PluginSession {
    fn drop(&mut self) {
        (self.binding.vtable().destroy)(self.handle);
    }
}

/// An open capture instance. Closed on drop.
///
/// Iterating yields the plugin's events one at a time; a source plugin's
/// sequence may never end, so bound the iteration (`take(n)`).
pub struct CaptureInstance<'s> {
    session: &'s PluginSession,
    handle: InstanceHandle,
}

impl<'s> CaptureInstance<'s> {
    pub fn handle(&self) -> InstanceHandle {
        self.handle
    }

    pub fn session(&self) -> &'s PluginSession {
        self.session
    }

    /// Pulls the next event and takes ownership of it.
    pub fn next_event(&mut self) -> Result<Event, HostError> {
        let vtable = self.session.binding().vtable();
        let next = vtable.next.ok_or_else(|| self.session.unsupported("next"))?;

        let mut raw: *mut PluginEvent = ptr::null_mut();
        let rc = next(self.session.handle, self.handle, &mut raw);
        if rc != SUCCESS {
            return Err(self.session.failure("next"));
        }
        if raw.is_null() {
            return Err(HostError::NullResult {
                plugin: self.session.binding().name.clone(),
                operation: "next",
            });
        }

        let event = unsafe { Event::copy_from_raw(raw) };
        (vtable.free_event)(raw);
        Ok(event)
    }
}

impl Iterator for CaptureInstance<'_> {
    type Item = Result<Event, HostError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_event())
    }
}

impl Drop for CaptureInstance<'_> {
    fn drop(&mut self) {
        if let Some(close) = self.session.binding().vtable().close {
            close(self.session.handle, self.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_values_are_not_present() {
        assert!(!FieldValue::Absent.is_present());
        assert!(FieldValue::U64(0).is_present());
        assert!(FieldValue::Str(String::new()).is_present());
        assert_eq!(FieldValue::Absent.to_string(), "<NA>");
    }
}
