pub mod analyze;
pub mod evaluate;
pub mod simulate;

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::EngineConfig;

/// Load `--config` if given, otherwise the defaults
pub(crate) fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    EngineConfig::load_or_default(path).with_context(|| match path {
        Some(path) => format!("failed to load configuration from {}", path.display()),
        None => "invalid default configuration".to_string(),
    })
}
