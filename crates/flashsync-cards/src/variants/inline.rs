use serde::{Deserialize, Serialize};

use super::basic::{BASIC_MODEL, BASIC_REVERSED_MODEL};
use super::{Flashcard, block_ref};
use crate::card::LocalCard;

/// A single-line `front::back` card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InlineCard {
    card: LocalCard,
}

impl InlineCard {
    pub fn new(card: LocalCard) -> Self {
        Self { card }
    }
}

impl Flashcard for InlineCard {
    fn data(&self) -> &LocalCard {
        &self.card
    }

    fn base_model(&self) -> &str {
        if self.card.reversed {
            BASIC_REVERSED_MODEL
        } else {
            BASIC_MODEL
        }
    }

    fn render(&self) -> String {
        let separator = if self.card.reversed { ":::" } else { "::" };
        format!(
            "{}{}{}",
            self.card.field("Front").unwrap_or_default(),
            separator,
            self.card.field("Back").unwrap_or_default()
        )
    }

    // Inline cards keep the reference on the same line
    fn id_format(&self) -> String {
        block_ref(&self.card)
    }
}
