//! String transfer across the plugin/host boundary.
//!
//! Every `*mut c_char` a plugin returns is allocated by the plugin and owned
//! by the receiver from then on. The receiver hands it back through the
//! plugin's `free_string` entry so that it is released by the same allocator
//! that produced it.

use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// Copies `value` into a heap-allocated, null-terminated C string.
///
/// Interior NUL bytes cannot be represented and are dropped. Ownership of the
/// returned pointer passes to the caller, who must release it with
/// [`free_owned_c_string`] (through the plugin's `free_string` entry when the
/// caller lives on the other side of the boundary).
pub fn into_owned_c_string(value: &str) -> *mut c_char {
    let bytes: Vec<u8> = value.bytes().filter(|b| *b != 0).collect();
    match CString::new(bytes) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Releases a string produced by [`into_owned_c_string`]. Null is ignored.
///
/// # Safety
/// `value` must be null or a pointer returned by [`into_owned_c_string`] in
/// this same module instance, not yet released.
pub unsafe fn free_owned_c_string(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    drop(CString::from_raw(value));
}

/// Borrows a host-owned C string as UTF-8. Returns `None` for null or
/// non-UTF-8 input.
///
/// # Safety
/// `value` must be null or point to a null-terminated string that outlives `'a`.
pub unsafe fn borrow_c_str<'a>(value: *const c_char) -> Option<&'a str> {
    if value.is_null() {
        return None;
    }
    CStr::from_ptr(value).to_str().ok()
}

/// Borrows a host-owned C string, replacing invalid UTF-8. Null reads as "".
///
/// # Safety
/// Same contract as [`borrow_c_str`].
pub unsafe fn borrow_c_str_lossy<'a>(value: *const c_char) -> Cow<'a, str> {
    if value.is_null() {
        return Cow::Borrowed("");
    }
    CStr::from_ptr(value).to_string_lossy()
}
