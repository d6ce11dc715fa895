//! `.prizm/scope.json`: the only persistent config file per §6.4, plus the
//! optional `prizm.toml` operator override that seeds it on first open.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fs_store::{self, FsResult};
use crate::path_provider::scope_config_path;

pub const CURRENT_DATA_VERSION: u32 = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeSettings {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_patterns: Vec<String>,
}

/// `scope.json`, deserialized leniently: unknown top-level keys are kept in
/// `extra` and re-serialized unchanged, per §6.4's "unknown keys are
/// preserved across rewrites."
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub data_version: u32,
    #[serde(default)]
    pub settings: ScopeSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScopeConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            data_version: 0,
            settings: ScopeSettings::default(),
            extra: Map::new(),
        }
    }
}

/// Read `scope.json`, if present.
pub fn read(scope_root: &Path) -> FsResult<Option<ScopeConfig>> {
    let path = scope_config_path(scope_root);
    match std::fs::read_to_string(&path) {
        Ok(raw) => {
            let config = serde_json::from_str(&raw)
                .map_err(|e| fs_store::FsStoreError::InvalidPath(format!("scope.json: {e}")))?;
            Ok(Some(config))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn write(scope_root: &Path, config: &ScopeConfig) -> FsResult<()> {
    let path = scope_config_path(scope_root);
    let relative = path
        .strip_prefix(scope_root)
        .unwrap_or(&path)
        .to_string_lossy()
        .into_owned();
    let raw = serde_json::to_string_pretty(config)
        .map_err(|e| fs_store::FsStoreError::InvalidPath(e.to_string()))?;
    fs_store::write_system_file(scope_root, &relative, &format!("{raw}\n"))
}

/// Read and deserialize an optional `prizm.toml` at the scope root into a
/// partial settings override, for seeding a brand-new `scope.json`. Never
/// required; a missing or unparseable file yields `None` silently (this is
/// operator convenience, not the system-of-record config).
pub fn read_operator_overrides(scope_root: &Path) -> Option<ScopeSettings> {
    let content = std::fs::read_to_string(scope_root.join("prizm.toml")).ok()?;
    let table: toml::Table = content.parse().ok()?;
    let exclude_patterns = table
        .get("settings")?
        .as_table()?
        .get("exclude_patterns")?
        .as_array()?
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    Some(ScopeSettings { exclude_patterns })
}

/// Load `scope.json`, creating it (seeded from `prizm.toml` if present) when
/// the scope is referenced for the first time.
pub fn read_or_init(scope_root: &Path, id: impl Into<String>) -> FsResult<ScopeConfig> {
    if let Some(config) = read(scope_root)? {
        return Ok(config);
    }
    let mut config = ScopeConfig::new(id);
    if let Some(overrides) = read_operator_overrides(scope_root) {
        config.settings = overrides;
    }
    write(scope_root, &config)?;
    Ok(config)
}

#[cfg(test)]
#[path = "scope_config_tests.rs"]
mod tests;
