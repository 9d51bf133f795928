//! Configuration sources.

use super::ExtractSettings;
use crate::errors::{ExtractError, Result};
use anyhow::Context;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Yields the extraction settings, with defaults for anything unset.
///
/// Sources are asked once at the start of every run.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Loads the current settings.
    async fn load(&self) -> Result<ExtractSettings>;
}

#[async_trait]
impl ConfigSource for ExtractSettings {
    async fn load(&self) -> Result<ExtractSettings> {
        Ok(self.clone())
    }
}

/// A raw key/value settings store, as kept by the host.
///
/// Unset keys and keys holding `null` fall back to their defaults. Unknown
/// keys (such as schema headings) are ignored.
#[derive(Debug, Default)]
pub struct SettingsMap {
    values: RwLock<HashMap<String, serde_json::Value>>,
}

impl SettingsMap {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from existing values.
    #[must_use]
    pub fn from_values(values: HashMap<String, serde_json::Value>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// Sets a value, replacing any previous one.
    pub fn set(&self, key: impl Into<String>, value: serde_json::Value) {
        self.values.write().insert(key.into(), value);
    }

    /// Removes a value so its default applies again.
    pub fn unset(&self, key: &str) {
        self.values.write().remove(key);
    }

    /// Gets a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.values.read().get(key).cloned()
    }

    /// Resolves the stored values into settings.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Config`] if a value has the wrong type.
    pub fn resolve(&self) -> Result<ExtractSettings> {
        parse_values(self.values.read().clone()).map_err(|err| ExtractError::config(err.to_string()))
    }
}

fn parse_values(
    values: HashMap<String, serde_json::Value>,
) -> std::result::Result<ExtractSettings, serde_json::Error> {
    let object: serde_json::Map<String, serde_json::Value> =
        values.into_iter().filter(|(_, v)| !v.is_null()).collect();
    serde_json::from_value(serde_json::Value::Object(object))
}

#[async_trait]
impl ConfigSource for SettingsMap {
    async fn load(&self) -> Result<ExtractSettings> {
        self.resolve()
    }
}

/// Reads settings from a JSON object stored in a file.
///
/// The file is re-read on every run, so edits apply to the next trigger.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source for the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The settings file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> anyhow::Result<ExtractSettings> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading settings file {}", self.path.display()))?;
        let values: HashMap<String, serde_json::Value> = serde_json::from_str(&raw)
            .with_context(|| format!("settings file {} is not a JSON object", self.path.display()))?;
        let settings = parse_values(values)
            .with_context(|| format!("invalid settings in {}", self.path.display()))?;
        Ok(settings)
    }
}

#[async_trait]
impl ConfigSource for JsonFileSource {
    async fn load(&self) -> Result<ExtractSettings> {
        self.read()
            .await
            .map_err(|err| ExtractError::config(format!("{err:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn test_static_settings_source() {
        let settings = ExtractSettings::new().with_ref_label("src");
        assert_eq!(settings.load().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_settings_map_defaults_and_overrides() {
        let map = SettingsMap::new();
        assert_eq!(map.load().await.unwrap(), ExtractSettings::default());

        map.set("refLabel", json!("↩"));
        map.set("keepSummaryAbove", json!("true"));
        map.set("generalHeading", serde_json::Value::Null);

        let settings = map.load().await.unwrap();
        assert_eq!(settings.ref_label, "↩");
        assert!(settings.keep_summary_above);

        map.unset("refLabel");
        assert_eq!(map.load().await.unwrap().ref_label, "→");
    }

    #[tokio::test]
    async fn test_settings_map_null_falls_back_to_default() {
        let map = SettingsMap::from_values(HashMap::from([(
            "keepRefs".to_string(),
            serde_json::Value::Null,
        )]));
        assert!(map.load().await.unwrap().keep_refs);
    }

    #[tokio::test]
    async fn test_settings_map_type_error() {
        let map = SettingsMap::new();
        map.set("summaryTitle", json!(42));

        let err = map.load().await.unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"summaryTitle": "Notes", "keepMeta": "true"}}"#).unwrap();

        let source = JsonFileSource::new(file.path());
        let settings = source.load().await.unwrap();

        assert_eq!(settings.summary_title, "Notes");
        assert!(settings.keep_meta);
        assert!(settings.keep_refs);
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("missing.json"));

        let err = source.load().await.unwrap_err();
        match err {
            ExtractError::Config(message) => assert!(message.contains("reading settings file")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_json_file_source_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"summaryTitle": "#).unwrap();

        let err = JsonFileSource::new(file.path()).load().await.unwrap_err();

        assert_eq!(err.kind(), "config");
        assert!(err.to_string().contains("is not a JSON object"));
    }
}
