use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks. Only the startup path and the CLI read it;
/// services receive the values they need through their constructors.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads configuration from `path` (default "config.toml"), then applies
/// `LL__*` environment overrides. A missing file falls back to defaults.
pub fn init_config(path: Option<&str>) -> Arc<StaticConfig> {
    init_config_with(StaticConfig::load(path))
}

/// Install an already-built configuration (tests, embedding)
pub fn init_config_with(config: StaticConfig) -> Arc<StaticConfig> {
    let slot = CONFIG.get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()));
    slot.store(Arc::new(config));
    slot.load_full()
}
