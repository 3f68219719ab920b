//! Local and remote flashcard records for flashsync.
//!
//! A [`LocalCard`] is built from a parsed note once per sync pass. A
//! [`RemoteCard`] is what the flashcard store currently holds for the same
//! note. Neither is changed by comparison; see `flashsync-match` for the
//! equivalence check itself.
//!
//! The concrete variants ([`BasicCard`], [`InlineCard`], [`ClozeCard`],
//! [`SpacedCard`]) implement [`Flashcard`], which renders a card and builds
//! the payloads sent to the store.

pub mod card;
pub mod config;
pub mod error;
pub mod payload;
pub mod remote;
pub mod variants;

pub use card::{LocalCard, NEW_CARD_ID};
pub use config::SyncSettings;
pub use error::{Error, Result};
pub use payload::{MediaFile, NoteOptions, SyncPayload};
pub use remote::{ApiResponse, RemoteCard, RemoteField, parse_remote_cards};
pub use variants::{AnyCard, BasicCard, ClozeCard, Flashcard, InlineCard, SpacedCard};

/// Parse a JSON array of tagged local cards
pub fn parse_local_cards(json: &str) -> Result<Vec<AnyCard>> {
    let cards: Vec<AnyCard> = serde_json::from_str(json)?;
    tracing::debug!(count = cards.len(), "Parsed local cards");
    Ok(cards)
}
