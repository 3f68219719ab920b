//! Sync settings shared by every component that reads or writes Source links
//!
//! The values live in the `[sync]` table of `flashsync.toml`:
//!
//! ```toml
//! [sync]
//! source_field = "Source"
//! placeholder = "__BLOCK_ID__"
//! block_id_digits = 13
//! source_model_suffix = "-source"
//! code_model_suffix = "-code"
//! ```
//!
//! The generator of Source strings and the equivalence checker must agree on
//! `placeholder` and `block_id_digits` bit-for-bit.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_SOURCE_FIELD: &str = "Source";
pub const DEFAULT_PLACEHOLDER: &str = "__BLOCK_ID__";
pub const DEFAULT_BLOCK_ID_DIGITS: usize = 13;
pub const DEFAULT_SOURCE_MODEL_SUFFIX: &str = "-source";
pub const DEFAULT_CODE_MODEL_SUFFIX: &str = "-code";

fn default_source_field() -> String {
    DEFAULT_SOURCE_FIELD.to_string()
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_block_id_digits() -> usize {
    DEFAULT_BLOCK_ID_DIGITS
}

fn default_source_model_suffix() -> String {
    DEFAULT_SOURCE_MODEL_SUFFIX.to_string()
}

fn default_code_model_suffix() -> String {
    DEFAULT_CODE_MODEL_SUFFIX.to_string()
}

/// Process-wide constants for Source normalization and model naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Name of the field holding the back-link to the note
    #[serde(default = "default_source_field")]
    pub source_field: String,

    /// Token standing in for a block id that is not assigned yet
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Exact digit count of a generated block id
    #[serde(default = "default_block_id_digits")]
    pub block_id_digits: usize,

    /// Appended to the model name of cards that carry a Source field
    #[serde(default = "default_source_model_suffix")]
    pub source_model_suffix: String,

    /// Appended to the model name of cards that contain code
    #[serde(default = "default_code_model_suffix")]
    pub code_model_suffix: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            source_field: default_source_field(),
            placeholder: default_placeholder(),
            block_id_digits: default_block_id_digits(),
            source_model_suffix: default_source_model_suffix(),
            code_model_suffix: default_code_model_suffix(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    sync: Option<SyncSettings>,
}

impl SyncSettings {
    /// Parse settings from TOML content
    ///
    /// A document without a `[sync]` table yields the defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use flashsync_cards::SyncSettings;
    ///
    /// let settings = SyncSettings::parse(r#"
    /// [sync]
    /// placeholder = "%%ID%%"
    /// "#).unwrap();
    ///
    /// assert_eq!(settings.placeholder, "%%ID%%");
    /// assert_eq!(settings.source_field, "Source");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(content)?;
        let settings = file.sync.unwrap_or_default();
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::SettingsUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded sync settings");
        Self::parse(&content)
    }

    /// Check the invariants the normalizer relies on
    pub fn validate(&self) -> Result<()> {
        if self.source_field.trim().is_empty() {
            return Err(Error::invalid_settings("source_field", "must not be empty"));
        }
        if self.placeholder.is_empty() {
            return Err(Error::invalid_settings("placeholder", "must not be empty"));
        }
        if self.placeholder.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_settings(
                "placeholder",
                "must not consist only of digits",
            ));
        }
        if self.block_id_digits == 0 {
            return Err(Error::invalid_settings(
                "block_id_digits",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();
        assert_eq!(settings.source_field, "Source");
        assert_eq!(settings.placeholder, "__BLOCK_ID__");
        assert_eq!(settings.block_id_digits, 13);
        assert_eq!(settings.source_model_suffix, "-source");
        assert_eq!(settings.code_model_suffix, "-code");
    }

    #[test]
    fn test_parse_empty_document_yields_defaults() {
        let settings = SyncSettings::parse("").unwrap();
        assert_eq!(settings, SyncSettings::default());
    }

    #[test]
    fn test_parse_partial_table() {
        let settings = SyncSettings::parse("[sync]\nblock_id_digits = 10\n").unwrap();
        assert_eq!(settings.block_id_digits, 10);
        assert_eq!(settings.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[rstest]
    #[case("[sync]\nsource_field = \"  \"\n", "source_field")]
    #[case("[sync]\nplaceholder = \"\"\n", "placeholder")]
    #[case("[sync]\nplaceholder = \"0042\"\n", "placeholder")]
    #[case("[sync]\nblock_id_digits = 0\n", "block_id_digits")]
    fn test_parse_rejects_invalid_values(#[case] content: &str, #[case] expected_field: &str) {
        match SyncSettings::parse(content) {
            Err(Error::InvalidSettings { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidSettings, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_toml() {
        let result = SyncSettings::parse("[sync\nplaceholder = ");
        assert!(matches!(result, Err(Error::TomlDe(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("flashsync.toml");
        fs::write(&path, "[sync]\nsource_field = \"Origin\"\n").unwrap();

        let settings = SyncSettings::load(&path).unwrap();
        assert_eq!(settings.source_field, "Origin");
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");

        let err = SyncSettings::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
