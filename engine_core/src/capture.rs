use std::collections::HashMap;

use plugin_core::{log_debug, Event};

use crate::error::HostError;
use crate::plugin_session::{FieldRequest, FieldValue, PluginSession};

/// One event pulled from a source, with its rendering and extracted fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub event: Event,
    pub rendered: String,
    /// `(field name, value)` for every field requested, across all providers.
    pub fields: Vec<(String, FieldValue)>,
}

/// The requests a session can serve.
///
/// Fields that require an argument are only requested when `field_args`
/// supplies one for their name.
pub fn field_requests(session: &PluginSession, field_args: &HashMap<String, String>) -> Vec<FieldRequest> {
    session
        .binding()
        .fields
        .iter()
        .filter_map(|entry| {
            let arg = field_args.get(entry.name.as_ref()).map(String::as_str);
            if entry.arg_required && arg.is_none() {
                return None;
            }
            Some(FieldRequest::for_entry(entry, arg))
        })
        .collect()
}

/// Opens an instance on `source`, pulls `count` events, and for each one
/// renders it and extracts every field offered by `providers`.
///
/// The instance is closed when this returns, successfully or not.
pub fn capture_events(
    source: &PluginSession,
    providers: &[&PluginSession],
    open_params: &str,
    count: usize,
    field_args: &HashMap<String, String>,
) -> Result<Vec<CapturedEvent>, HostError> {
    let requests: Vec<(&PluginSession, Vec<FieldRequest>)> = providers
        .iter()
        .map(|provider| (*provider, field_requests(provider, field_args)))
        .collect();

    let instance = source.open(open_params)?;
    log_debug!("capture instance opened", Some(instance.handle().to_string()));

    let mut captured = Vec::with_capacity(count);
    for event in instance.take(count) {
        let event = event?;
        let rendered = source.render(&event)?;

        let mut fields = Vec::new();
        for (provider, provider_requests) in &requests {
            let values = provider.extract(&event, provider_requests)?;
            fields.extend(
                provider_requests
                    .iter()
                    .map(|r| r.name.clone())
                    .zip(values),
            );
        }

        captured.push(CapturedEvent {
            event,
            rendered,
            fields,
        });
    }
    Ok(captured)
}
