//! Concrete card variants and the capability trait they share.
//!
//! The equivalence check only reads [`LocalCard`] data, so it works the same
//! for every variant. The trait covers what differs: how a card renders,
//! which model it syncs to, and how its id is written back into the note.

mod basic;
mod cloze;
mod inline;
mod spaced;

pub use basic::BasicCard;
pub use cloze::ClozeCard;
pub use inline::InlineCard;
pub use spaced::SpacedCard;

use serde::{Deserialize, Serialize};

use crate::card::LocalCard;
use crate::config::SyncSettings;
use crate::payload::{MediaFile, NoteOptions, SyncPayload};

/// Behaviour every card variant provides
pub trait Flashcard {
    /// The shared card data
    fn data(&self) -> &LocalCard;

    /// Model used when `LocalCard::model_name` is empty
    fn base_model(&self) -> &str;

    /// Human-readable rendering of the card
    fn render(&self) -> String;

    /// Block reference written back into the note once the card has an id
    fn id_format(&self) -> String;

    /// Full model name including the Source and code suffixes
    fn model_name(&self, settings: &SyncSettings) -> String {
        let data = self.data();
        let mut name = if data.model_name.is_empty() {
            self.base_model().to_string()
        } else {
            data.model_name.clone()
        };
        if data.source(settings).is_some() {
            name.push_str(&settings.source_model_suffix);
        }
        name.push_str(data.code_model_suffix(settings));
        name
    }

    /// Payload for creating (`update == false`) or updating the remote copy
    fn to_sync_payload(&self, update: bool, settings: &SyncSettings) -> SyncPayload {
        let data = self.data();
        SyncPayload {
            id: if update { data.id } else { None },
            deck_name: data.deck_name.clone(),
            model_name: self.model_name(settings),
            fields: data.fields.clone(),
            tags: data.tags.clone(),
            options: if update { None } else { Some(NoteOptions::default()) },
        }
    }

    /// Media files pairing each name with its encoded payload
    fn list_media(&self) -> Vec<MediaFile> {
        let data = self.data();
        data.media_names
            .iter()
            .zip(&data.media_data)
            .map(|(name, encoded)| MediaFile {
                filename: name.clone(),
                data: encoded.clone(),
            })
            .collect()
    }
}

/// Write a card id the way block references spell it
pub(crate) fn block_ref(card: &LocalCard) -> String {
    match card.id {
        Some(id) => format!("^{id}"),
        None => String::new(),
    }
}

/// Any card variant, tagged by `kind` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnyCard {
    Basic(BasicCard),
    Inline(InlineCard),
    Cloze(ClozeCard),
    Spaced(SpacedCard),
}

impl AnyCard {
    fn inner(&self) -> &dyn Flashcard {
        match self {
            AnyCard::Basic(card) => card,
            AnyCard::Inline(card) => card,
            AnyCard::Cloze(card) => card,
            AnyCard::Spaced(card) => card,
        }
    }
}

impl Flashcard for AnyCard {
    fn data(&self) -> &LocalCard {
        self.inner().data()
    }

    fn base_model(&self) -> &str {
        self.inner().base_model()
    }

    fn render(&self) -> String {
        self.inner().render()
    }

    fn id_format(&self) -> String {
        self.inner().id_format()
    }
}
