use serde::{Deserialize, Serialize};

use super::{Flashcard, block_ref};
use crate::card::LocalCard;

pub const BASIC_MODEL: &str = "Obsidian-basic";
pub const BASIC_REVERSED_MODEL: &str = "Obsidian-basic-reversed";

/// A front/back card written as a heading followed by its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasicCard {
    card: LocalCard,
}

impl BasicCard {
    pub fn new(card: LocalCard) -> Self {
        Self { card }
    }

    pub fn into_inner(self) -> LocalCard {
        self.card
    }
}

impl Flashcard for BasicCard {
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
        format!(
            "Q: {}\nA: {}",
            self.card.field("Front").unwrap_or_default(),
            self.card.field("Back").unwrap_or_default()
        )
    }

    fn id_format(&self) -> String {
        format!("{}\n", block_ref(&self.card))
    }
}
