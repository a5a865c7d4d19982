//! Drives the extractor through its exported function table.

use std::collections::HashMap;

use engine_core::{field_requests, FieldRequest, FieldValue, HostError, SourcePluginBinding};
use plugin_core::{Event, PluginType};
use pretty_assertions::assert_eq;

fn binding() -> SourcePluginBinding {
    let table = plugin_json::create_plugin();
    assert!(!table.is_null());
    SourcePluginBinding::new(unsafe { &*table }).unwrap()
}

#[test]
fn declares_extractor_for_any_source() {
    let binding = binding();
    assert_eq!(binding.plugin_type, PluginType::Extractor);
    assert_eq!(binding.event_source, "");
    assert!(binding.serves_source("dummy"));
    assert!(binding.declares_field("json.value"));
    assert!(binding.fields.iter().find(|f| f.name == "json.value").unwrap().arg_required);
    assert!(!binding.fields.iter().find(|f| f.name == "json.obj").unwrap().arg_required);
}

#[test]
fn has_no_source_entries() {
    let session = binding().init("").unwrap();
    assert!(matches!(session.open(""), Err(HostError::Unsupported { .. })));
    assert!(matches!(
        session.render(&Event::untimed("{}")),
        Err(HostError::Unsupported { .. })
    ));
    assert_eq!(session.last_error(), "no error");
}

#[test]
fn extracts_strings_from_json_events() {
    let session = binding().init("").unwrap();
    let event = Event::untimed(r#"{"name":"cat","pid":7}"#);
    let requests = [
        FieldRequest::string("json.value", Some("/name")),
        FieldRequest::string("jevt.value", Some("/pid")),
        FieldRequest::string("json.obj", None),
    ];

    let values = session.extract(&event, &requests).unwrap();
    assert_eq!(values[0], FieldValue::Str("cat".to_string()));
    assert_eq!(values[1], FieldValue::Absent);
    assert_eq!(
        values[2],
        FieldValue::Str("{\n  \"name\": \"cat\",\n  \"pid\": 7\n}".to_string())
    );
}

#[test]
fn non_json_events_yield_absent_fields() {
    let session = binding().init("").unwrap();
    let values = session
        .extract(&Event::untimed("dummy1"), &[FieldRequest::string("json.obj", None)])
        .unwrap();
    assert_eq!(values, vec![FieldValue::Absent]);
}

#[test]
fn arg_fields_need_a_configured_argument() {
    let session = binding().init("").unwrap();
    let names = |args: &HashMap<String, String>| {
        field_requests(&session, args)
            .into_iter()
            .map(|r| r.name)
            .collect::<Vec<_>>()
    };

    assert_eq!(names(&HashMap::new()), vec!["json.obj", "jevt.obj"]);

    let args = HashMap::from([("json.value".to_string(), "/name".to_string())]);
    assert_eq!(names(&args), vec!["json.value", "json.obj", "jevt.obj"]);
}
