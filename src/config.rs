//! Editor configuration

use crate::error::{EditorError, Result};
use crate::storage::{DEFAULT_AUTOSAVE_INTERVAL_MS, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};

/// Tunables for an [`crate::Editor`]; every field has a default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Storage key the document is saved under
    pub storage_key: String,
    /// Milliseconds between automatic saves
    pub autosave_interval_ms: u64,
    /// Maximum undo history depth
    pub undo_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            autosave_interval_ms: DEFAULT_AUTOSAVE_INTERVAL_MS,
            undo_depth: 100,
        }
    }
}

impl EditorConfig {
    /// Parse from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.is_empty() {
            return Err(EditorError::Config("storage key must not be empty".to_string()));
        }
        if self.autosave_interval_ms == 0 {
            return Err(EditorError::Config("autosave interval must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.storage_key, "content");
        assert_eq!(config.autosave_interval_ms, 30_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{"autosaveIntervalMs": 5000}"#).unwrap();
        assert_eq!(config.autosave_interval_ms, 5000);
        assert_eq!(config.storage_key, "content");
        assert_eq!(config.undo_depth, 100);
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"storageKey": ""}"#),
            Err(EditorError::Config(_))
        ));
        assert!(EditorConfig::from_json(r#"{"autosaveIntervalMs": 0}"#).is_err());
        assert!(matches!(
            EditorConfig::from_json("nope"),
            Err(EditorError::Json(_))
        ));
    }
}
