//! Remote card records as the flashcard store reports them.
//!
//! The shape follows the AnkiConnect `notesInfo` action:
//!
//! ```json
//! {
//!   "noteId": 1700000000001,
//!   "modelName": "Obsidian-basic",
//!   "tags": ["math"],
//!   "fields": {
//!     "Front": { "value": "2 + 2", "order": 0 },
//!     "Back": { "value": "4", "order": 1 }
//!   },
//!   "cards": [1700000000002]
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One field of a remote record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteField {
    pub value: String,
    #[serde(default)]
    pub order: u32,
}

impl RemoteField {
    pub fn new(value: impl Into<String>, order: u32) -> Self {
        Self {
            value: value.into(),
            order,
        }
    }
}

/// Flashcard record as currently stored in the remote system
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCard {
    #[serde(default)]
    pub note_id: u64,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub fields: HashMap<String, RemoteField>,
    #[serde(default)]
    pub cards: Vec<u64>,
}

impl RemoteCard {
    /// Build a record from `(name, value)` pairs, numbering fields in order
    pub fn new<K, V>(note_id: u64, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields = fields
            .into_iter()
            .enumerate()
            .map(|(order, (name, value))| (name.into(), RemoteField::new(value, order as u32)))
            .collect();
        Self {
            note_id,
            fields,
            ..Self::default()
        }
    }

    pub fn with_tags<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|f| f.value.as_str())
    }

    /// Field names in the order the remote model declares them
    pub fn ordered_field_names(&self) -> Vec<&str> {
        let mut named: Vec<(&str, u32)> = self
            .fields
            .iter()
            .map(|(name, field)| (name.as_str(), field.order))
            .collect();
        named.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        named.into_iter().map(|(name, _)| name).collect()
    }
}

/// AnkiConnect response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

/// Parse remote records from JSON, either a bare array or a response envelope.
///
/// An envelope that reports an error, or carries neither a result nor an
/// error, fails with [`Error::Remote`].
pub fn parse_remote_cards(json: &str) -> Result<Vec<RemoteCard>> {
    let records = if json.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<RemoteCard>>(json)?
    } else {
        let response: ApiResponse<Vec<RemoteCard>> = serde_json::from_str(json)?;
        match (response.result, response.error) {
            (_, Some(error)) => {
                tracing::warn!(%error, "Remote store reported an error");
                return Err(Error::Remote(error));
            }
            (Some(records), None) => records,
            (None, None) => {
                return Err(Error::Remote(
                    "response carries neither a result nor an error".to_string(),
                ));
            }
        }
    };
    tracing::debug!(count = records.len(), "Parsed remote records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NOTES_INFO: &str = r#"[{
        "noteId": 1700000000001,
        "profile": "User 1",
        "modelName": "Obsidian-basic",
        "tags": ["math"],
        "fields": {
            "Front": { "value": "2 + 2", "order": 0 },
            "Back": { "value": "4", "order": 1 }
        },
        "mod": 1700000000,
        "cards": [1700000000002]
    }]"#;

    #[test]
    fn test_parse_bare_array() {
        let records = parse_remote_cards(NOTES_INFO).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].note_id, 1700000000001);
        assert_eq!(records[0].field_value("Back"), Some("4"));
        assert_eq!(records[0].tags, vec!["math".to_string()]);
    }

    #[test]
    fn test_parse_envelope() {
        let json = format!(r#"{{"result": {NOTES_INFO}, "error": null}}"#);
        let records = parse_remote_cards(&json).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_envelope_with_error() {
        let result =
            parse_remote_cards(r#"{"result": null, "error": "collection is not available"}"#);
        match result {
            Err(Error::Remote(message)) => assert_eq!(message, "collection is not available"),
            other => panic!("Expected Remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_envelope_without_result_or_error() {
        let result = parse_remote_cards(r#"{"result": null, "error": null}"#);
        assert!(matches!(result, Err(Error::Remote(_))));
        let result = parse_remote_cards("{}");
        assert!(matches!(result, Err(Error::Remote(_))));
    }

    #[test]
    fn test_parse_malformed_record_keeps_field_error() {
        let json = r#"[{"noteId": 1, "fields": {"Front": {"value": 7}}}]"#;
        let err = parse_remote_cards(json).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().contains("invalid type"), "{}", err);
    }

    #[test]
    fn test_ordered_field_names() {
        let record = RemoteCard::new(1, [("Front", "q"), ("Back", "a"), ("Source", "s")]);
        assert_eq!(record.ordered_field_names(), vec!["Front", "Back", "Source"]);
    }
}
