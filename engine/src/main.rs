mod config;

use std::process::ExitCode;

use engine_core::plugin_utils::resolve_plugin_binary_path;
use engine_core::{capture_events, load_plugin, PluginRegistry, PluginSession};
use libloading::Library;
use liblogger::Logger;
use plugin_core::{log_error, log_info, log_warn, PluginType};

use crate::config::{EngineConfig, EngineSection, CONFIG_FILE};

fn main() -> ExitCode {
    let config = match EngineConfig::from_file(CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = Logger::init_with_config(config.logging.clone()) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    let status = match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!(&e);
            ExitCode::FAILURE
        }
    };
    let _ = Logger::flush();
    status
}

fn run(config: &EngineConfig) -> Result<(), String> {
    let engine = &config.engine;
    let registry = PluginRegistry::new();

    // Libraries must stay mapped until every session is dropped.
    let mut libraries: Vec<Library> = Vec::new();

    let mut source_name = None;
    let names = std::iter::once(&engine.source_plugin).chain(engine.extractor_plugins.iter());
    for name in names {
        let path = resolve_plugin_binary_path(&engine.plugin_folder, name);
        let (binding, lib) = load_plugin(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
        if source_name.is_none() {
            if binding.plugin_type != PluginType::Source {
                return Err(format!("'{}' is not a source plugin", name));
            }
            source_name = Some(binding.name.clone());
        }
        registry.register(binding);
        libraries.push(lib);
    }

    let result = match source_name {
        Some(source_name) => capture(engine, &registry, &source_name),
        None => Err("no source plugin configured".to_string()),
    };
    drop(registry);
    drop(libraries);
    result
}

fn capture(engine: &EngineSection, registry: &PluginRegistry, source_name: &str) -> Result<(), String> {
    let source_binding = registry
        .get(source_name)
        .ok_or_else(|| format!("source plugin '{}' is not registered", source_name))?;
    let source = source_binding.init(&engine.init_config).map_err(|e| e.to_string())?;

    let mut extractors: Vec<PluginSession> = Vec::new();
    for binding in registry.field_providers_for(&source_binding.event_source) {
        if binding.plugin_type != PluginType::Extractor || binding.fields.is_empty() {
            continue;
        }
        match binding.init(&engine.init_config) {
            Ok(session) => extractors.push(session),
            Err(e) => log_warn!(&format!("skipping extractor '{}'", binding.name), Some(e.to_string())),
        }
    }

    // The source serves its own fields through its session.
    let mut providers: Vec<&PluginSession> = Vec::with_capacity(extractors.len() + 1);
    if !source_binding.fields.is_empty() {
        providers.push(&source);
    }
    providers.extend(extractors.iter());

    log_info!(
        &format!(
            "capturing {} events from '{}' with {} field provider(s)",
            engine.event_count,
            source_binding.name,
            providers.len()
        ),
        Some(source.handle().to_string())
    );

    let events = capture_events(
        &source,
        &providers,
        &engine.open_params,
        engine.event_count,
        &engine.field_args,
    )
    .map_err(|e| e.to_string())?;

    // Absent fields are left out of the log line.
    for captured in &events {
        let fields = captured
            .fields
            .iter()
            .filter(|(_, value)| value.is_present())
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(" ");
        log_info!(&captured.rendered, Some(fields));
    }
    log_info!(&format!("captured {} events", events.len()));
    Ok(())
}
