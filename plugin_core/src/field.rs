use std::borrow::Cow;
use std::os::raw::c_char;
use std::ptr;

use serde::{Deserialize, Serialize};

use crate::ffi_string::{borrow_c_str, into_owned_c_string};

/// Value type of an extractable field.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "uint64")]
    U64 = 8,
    #[serde(rename = "string")]
    String = 9,
}

impl FieldType {
    pub fn from_raw(value: u32) -> Option<Self> {
        match value {
            8 => Some(FieldType::U64),
            9 => Some(FieldType::String),
            _ => None,
        }
    }
}

/// One entry of the field schema a plugin publishes through `get_fields()`.
///
/// Serialized as `{"type":"uint64","name":"dummy.count","desc":"..."}`;
/// `argRequired` is only present when true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub name: Cow<'static, str>,
    pub desc: Cow<'static, str>,
    #[serde(rename = "argRequired", default, skip_serializing_if = "is_false")]
    pub arg_required: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FieldEntry {
    pub const fn new(field_type: FieldType, name: &'static str, desc: &'static str) -> Self {
        Self {
            field_type,
            name: Cow::Borrowed(name),
            desc: Cow::Borrowed(desc),
            arg_required: false,
        }
    }

    pub const fn with_arg(field_type: FieldType, name: &'static str, desc: &'static str) -> Self {
        Self {
            field_type,
            name: Cow::Borrowed(name),
            desc: Cow::Borrowed(desc),
            arg_required: true,
        }
    }
}

/// Serializes a field schema into the JSON array handed to the host.
pub fn fields_to_json(fields: &[FieldEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(fields)
}

/// Parses a field schema received from a plugin.
pub fn fields_from_json(json: &str) -> Result<Vec<FieldEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

/// One extraction slot passed from the host to `extract_fields()`.
///
/// The host fills `field`, `arg` and `ftype`; the plugin fills
/// `field_present` and one of `res_u64` / `res_str`. A non-null `res_str` is
/// owned by the host afterwards and released through `free_string`.
#[repr(C)]
#[derive(Debug)]
pub struct ExtractField {
    /// Requested field name. Host-owned, null-terminated.
    pub field: *const c_char,

    /// Optional field argument (e.g. a JSON path). Host-owned; may be null.
    pub arg: *const c_char,

    /// Expected [`FieldType`] as its raw value.
    pub ftype: u32,

    /// 1 when the plugin produced a value, 0 otherwise.
    pub field_present: u32,

    /// Result for [`FieldType::U64`] fields.
    pub res_u64: u64,

    /// Result for [`FieldType::String`] fields, or null.
    pub res_str: *mut c_char,
}

impl ExtractField {
    /// Builds an empty request. `field` and `arg` must stay alive until the
    /// plugin call returns.
    pub fn request(field: *const c_char, arg: *const c_char, ftype: FieldType) -> Self {
        Self {
            field,
            arg,
            ftype: ftype as u32,
            field_present: 0,
            res_u64: 0,
            res_str: ptr::null_mut(),
        }
    }

    /// # Safety
    /// `field` must be null or a valid null-terminated string.
    pub unsafe fn field_name<'a>(&self) -> Option<&'a str> {
        borrow_c_str(self.field)
    }

    /// # Safety
    /// `arg` must be null or a valid null-terminated string.
    pub unsafe fn argument<'a>(&self) -> Option<&'a str> {
        borrow_c_str(self.arg)
    }

    pub fn is_present(&self) -> bool {
        self.field_present != 0
    }

    pub fn set_absent(&mut self) {
        self.field_present = 0;
        self.res_u64 = 0;
    }

    pub fn set_u64(&mut self, value: u64) {
        self.res_u64 = value;
        self.field_present = 1;
    }

    /// Stores a plugin-allocated copy of `value`; ownership passes to the host.
    pub fn set_str(&mut self, value: &str) {
        self.res_str = into_owned_c_string(value);
        self.field_present = u32::from(!self.res_str.is_null());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi_string::free_owned_c_string;
    use pretty_assertions::assert_eq;
    use std::ffi::CString;

    #[test]
    fn schema_serializes_in_wire_shape() {
        let fields = [FieldEntry::new(FieldType::U64, "dummy.count", "TBD")];
        assert_eq!(
            fields_to_json(&fields).unwrap(),
            r#"[{"type":"uint64","name":"dummy.count","desc":"TBD"}]"#
        );
    }

    #[test]
    fn schema_parses_arg_required() {
        let parsed = fields_from_json(
            r#"[{"type":"string","name":"json.value","desc":"v","argRequired":true},
                {"type":"string","name":"json.obj","desc":"o"}]"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            vec![
                FieldEntry::with_arg(FieldType::String, "json.value", "v"),
                FieldEntry::new(FieldType::String, "json.obj", "o"),
            ]
        );
    }

    #[test]
    fn extract_slot_records_results() {
        let name = CString::new("dummy.count").unwrap();
        let mut slot = ExtractField::request(name.as_ptr(), ptr::null(), FieldType::U64);
        assert!(!slot.is_present());
        assert_eq!(unsafe { slot.field_name() }, Some("dummy.count"));
        assert_eq!(unsafe { slot.argument() }, None);

        slot.set_u64(42);
        assert!(slot.is_present());
        assert_eq!(slot.res_u64, 42);

        slot.set_str("hello");
        assert!(slot.is_present());
        unsafe { free_owned_c_string(slot.res_str) };
    }
}
