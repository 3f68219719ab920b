//! The local card record derived from a parsed note

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::SyncSettings;
use crate::error::{Error, Result};

/// Wire value of a card that has not been created remotely yet
pub const NEW_CARD_ID: i64 = -1;

/// Flashcard data derived from a note, not yet confirmed synced.
///
/// `fields` is never empty. Use [`LocalCard::new`] or deserialize, both of
/// which enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLocalCard", rename_all = "camelCase")]
pub struct LocalCard {
    /// Remote id, `None` until the card has been created remotely
    #[serde(serialize_with = "serialize_card_id")]
    pub id: Option<u64>,
    pub deck_name: String,
    /// Text of the note the card was parsed from
    pub initial_content: String,
    pub fields: BTreeMap<String, String>,
    pub reversed: bool,
    /// Byte offsets of the card inside the source document
    pub initial_offset: usize,
    pub end_offset: usize,
    pub tags: Vec<String>,
    /// Whether the id has already been written back into the note
    pub inserted: bool,
    pub media_names: Vec<String>,
    /// Base64 payloads, parallel to `media_names`
    pub media_data: Vec<String>,
    /// Tags the remote copy carried before this pass
    pub old_tags: Vec<String>,
    pub contains_code: bool,
    /// Explicit model override; empty means the variant decides
    pub model_name: String,
}

impl LocalCard {
    /// Create a card in `deck_name` with the given fields.
    ///
    /// Fails with [`Error::EmptyFields`] when `fields` is empty.
    pub fn new<K, V>(
        deck_name: impl Into<String>,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields: BTreeMap<String, String> = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if fields.is_empty() {
            return Err(Error::EmptyFields);
        }

        Ok(Self {
            id: None,
            deck_name: deck_name.into(),
            initial_content: String::new(),
            fields,
            reversed: false,
            initial_offset: 0,
            end_offset: 0,
            tags: Vec::new(),
            inserted: false,
            media_names: Vec::new(),
            media_data: Vec::new(),
            old_tags: Vec::new(),
            contains_code: false,
            model_name: String::new(),
        })
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_tags<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn with_code(mut self, contains_code: bool) -> Self {
        self.contains_code = contains_code;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>, start: usize, end: usize) -> Self {
        self.initial_content = content.into();
        self.initial_offset = start;
        self.end_offset = end;
        self
    }

    /// Whether the card already exists in the remote store
    pub fn is_created(&self) -> bool {
        self.id.is_some()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The Source field value, if present and non-empty
    pub fn source<'a>(&'a self, settings: &SyncSettings) -> Option<&'a str> {
        self.field(&settings.source_field).filter(|s| !s.is_empty())
    }

    /// Encode `bytes` and attach them under `name`
    pub fn attach_media(&mut self, name: impl Into<String>, bytes: &[u8]) {
        self.media_names.push(name.into());
        self.media_data.push(STANDARD.encode(bytes));
    }

    /// Model name suffix for cards that contain code
    pub fn code_model_suffix<'a>(&self, settings: &'a SyncSettings) -> &'a str {
        if self.contains_code {
            &settings.code_model_suffix
        } else {
            ""
        }
    }
}

fn serialize_card_id<S: Serializer>(
    id: &Option<u64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match id {
        Some(id) => serializer.serialize_u64(*id),
        None => serializer.serialize_i64(NEW_CARD_ID),
    }
}

/// Accepts the `-1` sentinel, `null` or a positive id
fn deserialize_card_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u64>, D::Error> {
    let raw: Option<i64> = Option::deserialize(deserializer)?;
    match raw {
        None | Some(NEW_CARD_ID) => Ok(None),
        Some(id) if id > 0 => Ok(Some(id as u64)),
        Some(id) => Err(serde::de::Error::custom(format!(
            "invalid card id {id}: expected a positive id or {NEW_CARD_ID}"
        ))),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocalCard {
    #[serde(default, deserialize_with = "deserialize_card_id")]
    id: Option<u64>,
    #[serde(default)]
    deck_name: String,
    #[serde(default)]
    initial_content: String,
    fields: BTreeMap<String, String>,
    #[serde(default)]
    reversed: bool,
    #[serde(default)]
    initial_offset: usize,
    #[serde(default)]
    end_offset: usize,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    inserted: bool,
    #[serde(default)]
    media_names: Vec<String>,
    #[serde(default)]
    media_data: Vec<String>,
    #[serde(default)]
    old_tags: Vec<String>,
    #[serde(default)]
    contains_code: bool,
    #[serde(default)]
    model_name: String,
}

impl TryFrom<RawLocalCard> for LocalCard {
    type Error = Error;

    fn try_from(raw: RawLocalCard) -> Result<Self> {
        if raw.fields.is_empty() {
            return Err(Error::EmptyFields);
        }
        Ok(Self {
            id: raw.id,
            deck_name: raw.deck_name,
            initial_content: raw.initial_content,
            fields: raw.fields,
            reversed: raw.reversed,
            initial_offset: raw.initial_offset,
            end_offset: raw.end_offset,
            tags: raw.tags,
            inserted: raw.inserted,
            media_names: raw.media_names,
            media_data: raw.media_data,
            old_tags: raw.old_tags,
            contains_code: raw.contains_code,
            model_name: raw.model_name,
        })
    }
}
