//! Payloads handed to the remote store when a card is created or updated

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Duplicate check options sent with a card creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    pub allow_duplicate: bool,
    pub duplicate_scope: String,
}

impl Default for NoteOptions {
    fn default() -> Self {
        Self {
            allow_duplicate: false,
            duplicate_scope: "deck".to_string(),
        }
    }
}

/// Note object in the shape the remote store's `addNote` and
/// `updateNoteFields` actions accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    /// Set only on updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub deck_name: String,
    pub model_name: String,
    pub fields: BTreeMap<String, String>,
    pub tags: Vec<String>,
    /// Set only on creations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<NoteOptions>,
}

/// A media file to store alongside a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    pub filename: String,
    /// Base64-encoded file content
    pub data: String,
}
