//! Where the plugin keeps its configuration file

use directories::ProjectDirs;
use std::path::PathBuf;

const CONFIG_DIR_ENV: &str = "TRACEFLOW_PLUGIN_CONFIG_DIR";
const CONFIG_FILE: &str = "config.yaml";

/// Configuration directory: `TRACEFLOW_PLUGIN_CONFIG_DIR` if set, else the
/// platform config dir for `traceflow-plugin`
pub fn config_dir() -> PathBuf {
    resolve_config_dir(|key| std::env::var(key).ok())
}

/// Path of the configuration file
pub fn root_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

fn resolve_config_dir<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }

    // No home directory (e.g. a bare container): fall back to the working dir
    ProjectDirs::from("", "", "traceflow-plugin")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".traceflow-plugin"))
}
