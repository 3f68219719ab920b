use serde::{Deserialize, Serialize};

use super::{Flashcard, block_ref};
use crate::card::LocalCard;

pub const SPACED_MODEL: &str = "Obsidian-spaced";

/// A prompt-only card for spaced repetition of a whole passage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpacedCard {
    card: LocalCard,
}

impl SpacedCard {
    pub fn new(card: LocalCard) -> Self {
        Self { card }
    }
}

impl Flashcard for SpacedCard {
    fn data(&self) -> &LocalCard {
        &self.card
    }

    fn base_model(&self) -> &str {
        SPACED_MODEL
    }

    fn render(&self) -> String {
        self.card.field("Prompt").unwrap_or_default().to_string()
    }

    fn id_format(&self) -> String {
        format!("{}\n", block_ref(&self.card))
    }
}
