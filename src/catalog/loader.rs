//! Load a scenario catalog from JSON or TOML text
//!
//! The source is a single keyed collection: `{ "<id>": { scenario }, ... }`.
//! Any parse or consistency problem is a `CatalogLoadFailure`.

use crate::catalog::scenario::Scenario;
use crate::catalog::ScenarioCatalog;
use crate::core::error::{MissionError, Result};
use crate::core::types::ScenarioId;
use ahash::AHashMap;
use std::fs;
use std::path::Path;

/// Encoding of a catalog source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    /// Pick a format from a path or URL suffix. Anything but `.toml` is JSON.
    pub fn detect(location: &str) -> Self {
        if location.to_ascii_lowercase().ends_with(".toml") {
            CatalogFormat::Toml
        } else {
            CatalogFormat::Json
        }
    }
}

/// Parse catalog text in the given format
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<ScenarioCatalog> {
    let entries: AHashMap<String, Scenario> = match format {
        CatalogFormat::Json => serde_json::from_str(content)
            .map_err(|e| MissionError::CatalogLoadFailure(format!("Invalid JSON: {}", e)))?,
        CatalogFormat::Toml => toml::from_str(content)
            .map_err(|e| MissionError::CatalogLoadFailure(format!("Invalid TOML: {}", e)))?,
    };

    let mut catalog = ScenarioCatalog::new();
    for (key, mut scenario) in entries {
        if scenario.id.as_str().is_empty() {
            scenario.id = ScenarioId::new(key);
        } else if scenario.id.as_str() != key {
            return Err(MissionError::CatalogLoadFailure(format!(
                "scenario under key '{}' declares id '{}'",
                key, scenario.id
            )));
        }
        catalog.insert(scenario)?;
    }

    if catalog.is_empty() {
        return Err(MissionError::CatalogLoadFailure(
            "catalog contains no scenarios".into(),
        ));
    }

    for (from, to) in catalog.dangling_references() {
        tracing::warn!("Scenario {} points at unknown scenario {}", from, to);
    }

    tracing::info!("Loaded {} scenarios", catalog.len());
    Ok(catalog)
}

/// Load a catalog from a file on disk
pub fn load_catalog_file(path: &Path) -> Result<ScenarioCatalog> {
    let content = fs::read_to_string(path).map_err(|e| {
        MissionError::CatalogLoadFailure(format!("Failed to read {:?}: {}", path, e))
    })?;
    parse_catalog(&content, CatalogFormat::detect(&path.to_string_lossy()))
}
