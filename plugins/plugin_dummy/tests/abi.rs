//! Drives the plugin through its exported function table, the way the engine
//! does after loading the shared library.

use std::collections::HashMap;
use std::ffi::CString;
use std::ptr;

use engine_core::{capture_events, FieldRequest, FieldValue, HostError, PluginRegistry, SourcePluginBinding};
use plugin_core::{
    Event, ExtractField, FieldType, InstanceHandle, PluginEvent, PluginType, FAILURE, TIMESTAMP_UNKNOWN,
};
use pretty_assertions::assert_eq;

fn binding() -> SourcePluginBinding {
    let table = plugin_dummy::create_plugin();
    assert!(!table.is_null());
    SourcePluginBinding::new(unsafe { &*table }).unwrap()
}

#[test]
fn metadata_is_constant() {
    let first = binding();
    let second = binding();

    assert_eq!(first.id, 4);
    assert_eq!(first.name, "dummy_c");
    assert_eq!(first.description, "do almost nothing, c-style");
    assert_eq!(first.contact, "github.com/mstemm/plugins");
    assert_eq!(first.version, "0.0.1");
    assert_eq!(first.required_api_version, "1.0.0");
    assert_eq!(first.plugin_type, PluginType::Source);
    assert_eq!(first.event_source, "dummy");
    assert_eq!(first.fields.len(), 1);
    assert_eq!(first.fields[0].name, "dummy.count");
    assert_eq!(first.fields[0].field_type, FieldType::U64);

    assert_eq!(first.description, second.description);
    assert_eq!(first.fields, second.fields);
}

#[test]
fn next_counts_up_from_one() {
    let session = binding().init("").unwrap();
    let mut instance = session.open("").unwrap();

    for expected in ["dummy1", "dummy2", "dummy3"] {
        let event = instance.next_event().unwrap();
        assert_eq!(event.data, expected.as_bytes());
        assert_eq!(event.ts, TIMESTAMP_UNKNOWN);
    }
}

#[test]
fn instances_count_independently() {
    let session = binding().init("").unwrap();
    let first = session.open("").unwrap();
    let second = session.open("").unwrap();

    let a: Vec<Event> = first.take(2).collect::<Result<_, _>>().unwrap();
    let b: Vec<Event> = second.take(1).collect::<Result<_, _>>().unwrap();
    assert_eq!(a[1].data, b"dummy2");
    assert_eq!(b[0].data, b"dummy1");
}

#[test]
fn render_reports_length_and_payload() {
    let session = binding().init("").unwrap();
    assert_eq!(
        session.render(&Event::untimed("dummy2")).unwrap(),
        "evt-to-string(len=6): dummy2"
    );
    assert_eq!(session.render(&Event::untimed("")).unwrap(), "evt-to-string(len=0): ");
}

#[test]
fn extracts_count_or_marks_absent() {
    let session = binding().init("").unwrap();
    let requests = [FieldRequest::u64("dummy.count"), FieldRequest::u64("dummy.bogus")];

    let values = session.extract(&Event::untimed("dummy42"), &requests).unwrap();
    assert_eq!(values, vec![FieldValue::U64(42), FieldValue::Absent]);

    let values = session.extract(&Event::untimed("foo123"), &requests[..1]).unwrap();
    assert_eq!(values, vec![FieldValue::Absent]);

    assert!(session.extract(&Event::untimed("dummy1"), &[]).unwrap().is_empty());
}

#[test]
fn failed_next_sets_last_error() {
    let binding = binding();
    let session = binding.init("").unwrap();
    assert_eq!(session.last_error(), "");

    let next = binding.vtable().next.unwrap();
    let bogus = InstanceHandle(u64::MAX);
    let mut raw: *mut PluginEvent = ptr::null_mut();
    assert_eq!(next(session.handle(), bogus, &mut raw), FAILURE);
    assert!(raw.is_null());
    assert_eq!(session.last_error(), format!("unknown instance handle {}", bogus));
    // Reading does not clear it.
    assert_eq!(session.last_error(), format!("unknown instance handle {}", bogus));
}

#[test]
fn next_without_out_pointer_fails() {
    let binding = binding();
    let session = binding.init("").unwrap();
    let instance = session.open("").unwrap();

    let next = binding.vtable().next.unwrap();
    assert_eq!(next(session.handle(), instance.handle(), ptr::null_mut()), FAILURE);
    assert_eq!(session.last_error(), "null pointer passed for 'evt'");
}

#[test]
fn extract_without_event_fails() {
    let binding = binding();
    let session = binding.init("").unwrap();
    let name = CString::new("dummy.count").unwrap();
    let mut slots = [ExtractField::request(name.as_ptr(), ptr::null(), FieldType::U64)];

    let extract = binding.vtable().extract_fields;
    assert_eq!(extract(session.handle(), ptr::null(), 1, slots.as_mut_ptr()), FAILURE);
    assert_eq!(session.last_error(), "null pointer passed for 'evt'");
    assert!(!slots[0].is_present());
}

#[test]
fn sessions_do_not_share_state() {
    let binding = binding();
    let a = binding.init("").unwrap();
    let b = binding.init("").unwrap();
    assert_ne!(a.handle(), b.handle());

    let instance = a.open("").unwrap();
    let next = binding.vtable().next.unwrap();
    let mut raw: *mut PluginEvent = ptr::null_mut();
    assert_eq!(next(b.handle(), instance.handle(), &mut raw), FAILURE);
    assert_eq!(a.last_error(), "");
    assert!(b.last_error().contains("was not opened by"));
}

#[test]
fn open_on_destroyed_plugin_fails() {
    let binding = binding();
    let session = binding.init("").unwrap();
    let handle = session.handle();
    drop(session);

    let open = binding.vtable().open.unwrap();
    let mut rc = 0;
    let instance = open(handle, ptr::null(), &mut rc);
    assert_eq!(rc, FAILURE);
    assert!(instance.is_none());
}

#[test]
fn capture_renders_and_extracts_each_event() {
    let session = binding().init("").unwrap();
    let captured = capture_events(&session, &[&session], "", 3, &HashMap::new()).unwrap();

    assert_eq!(captured.len(), 3);
    assert_eq!(captured[2].rendered, "evt-to-string(len=6): dummy3");
    assert_eq!(
        captured[2].fields,
        vec![("dummy.count".to_string(), FieldValue::U64(3))]
    );
}

#[test]
fn registry_lists_source_as_its_own_field_provider() {
    let registry = PluginRegistry::new();
    registry.register(binding());

    assert!(registry.get("dummy_c").is_some());
    assert_eq!(registry.field_providers_for("dummy").len(), 1);
    assert!(registry.field_providers_for("syscall").is_empty());
}

#[test]
fn interior_nul_in_params_is_rejected() {
    let session = binding().init("").unwrap();
    assert!(matches!(session.open("a\0b"), Err(HostError::InteriorNul(_))));
}
