//! Export configuration files
//!
//! YAML by default, JSON for files ending in `.json`. Missing fields take
//! their defaults, so an empty file is a valid configuration.

use std::fs;
use std::path::Path;

use korapxml_core::ExportConfig;

use crate::errors::{config_error, Result};

/// Load an export configuration from `path`
///
/// # Errors
///
/// Returns an `InvalidInput` error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<ExportConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| config_error(path, &format!("Failed to read config file: {}", e)))?;

    let config = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .map_err(|e| config_error(path, &format!("JSON parse error: {}", e)))?
    } else if content.trim().is_empty() {
        ExportConfig::default()
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| config_error(path, &format!("YAML parse error: {}", e)))?
    };

    tracing::debug!(
        file = %path.display(),
        mapping_entries = config.foundry_mapping.len(),
        "Loaded export configuration"
    );
    Ok(config)
}
