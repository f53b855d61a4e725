use std::sync::{Arc, OnceLock};

use super::StaticConfig;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns defaults if [`init_config`] was never called, so library code and
/// tests can run without a config file.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| Arc::new(StaticConfig::default()))
        .clone()
}

/// Initialize the global configuration
///
/// Loads configuration from "config.toml" in the current directory, then
/// applies `LD__*` environment overrides. Later calls are no-ops.
///
/// # Examples
/// ```no_run
/// use linkdash::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    CONFIG.get_or_init(|| Arc::new(StaticConfig::load()));
}

/// Initialize the global configuration with an explicit value.
///
/// Returns `false` if a configuration was already installed.
pub fn init_config_with(config: StaticConfig) -> bool {
    CONFIG.set(Arc::new(config)).is_ok()
}
