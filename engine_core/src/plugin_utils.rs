use std::path::{Path, PathBuf};

/// File name of a plugin library for the current platform
/// (`libfoo.so`, `foo.dll`, `libfoo.dylib`).
pub fn resolve_plugin_filename(name: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{}.dll", name)
    } else if cfg!(target_os = "macos") {
        format!("lib{}.dylib", name)
    } else {
        format!("lib{}.so", name)
    }
}

/// Full path of plugin `name` inside `folder`.
pub fn resolve_plugin_binary_path(folder: impl AsRef<Path>, name: &str) -> PathBuf {
    folder.as_ref().join(resolve_plugin_filename(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_joins_folder_and_platform_name() {
        let path = resolve_plugin_binary_path("target/debug", "plugin_dummy");
        assert_eq!(path.parent(), Some(Path::new("target/debug")));
        let file = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file.contains("plugin_dummy"));
        assert_eq!(file, resolve_plugin_filename("plugin_dummy"));
    }
}
