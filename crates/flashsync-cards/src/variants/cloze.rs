use serde::{Deserialize, Serialize};

use super::{Flashcard, block_ref};
use crate::card::LocalCard;

pub const CLOZE_MODEL: &str = "Obsidian-cloze";

/// A cloze deletion card; the text lives in the `Text` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClozeCard {
    card: LocalCard,
}

impl ClozeCard {
    pub fn new(card: LocalCard) -> Self {
        Self { card }
    }
}

impl Flashcard for ClozeCard {
    fn data(&self) -> &LocalCard {
        &self.card
    }

    fn base_model(&self) -> &str {
        CLOZE_MODEL
    }

    fn render(&self) -> String {
        self.card.field("Text").unwrap_or_default().to_string()
    }

    fn id_format(&self) -> String {
        format!("{}\n", block_ref(&self.card))
    }
}
