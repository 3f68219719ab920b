//! Error types for flashsync-cards

use std::path::PathBuf;

/// Result type for flashsync-cards operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or loading card records
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A local card must carry at least one field
    #[error("Card has no fields")]
    EmptyFields,

    /// A settings value failed validation
    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSettings { field: String, reason: String },

    /// Settings file could not be read
    #[error("Failed to read settings at {path}: {source}")]
    SettingsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote store answered with an error instead of records
    #[error("Remote store error: {0}")]
    Remote(String),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub fn invalid_settings(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
