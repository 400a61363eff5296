pub mod commit;
pub mod worktree;

use anyhow::Context;
use devkit_core::config::{Config, WarnLevel};
use std::path::Path;

/// Load the config for `root` and log anything `validate` flags.
pub(crate) fn load_config(root: &Path) -> anyhow::Result<Config> {
    let config = Config::load(root)
        .with_context(|| format!("failed to load config from {}", root.display()))?;
    for warning in config.validate() {
        match warning.level {
            WarnLevel::Error => tracing::error!("config: {}", warning.message),
            WarnLevel::Warning => tracing::warn!("config: {}", warning.message),
        }
    }
    Ok(config)
}
