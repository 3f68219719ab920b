//! Builders for local cards and the remote records that mirror them.

use flashsync_cards::config::DEFAULT_PLACEHOLDER;
use flashsync_cards::{LocalCard, RemoteCard};

/// A 13-digit block id, distinct for each `seed` below one trillion.
pub fn block_id(seed: u64) -> String {
    format!("{}", 1_000_000_000_000 + seed % 1_000_000_000_000)
}

/// Wiki-link Source value pointing at `filename` with the given block id.
pub fn wiki_source(filename: &str, block: &str) -> String {
    format!("[[{filename}#^{block}]]")
}

/// Wiki-link Source value still carrying the placeholder token.
pub fn placeholder_source(filename: &str) -> String {
    wiki_source(filename, DEFAULT_PLACEHOLDER)
}

/// A Front/Back/Source card in deck `Default`, tagged `tags`.
pub fn sourced_card(
    id: Option<u64>,
    front: &str,
    back: &str,
    filename: &str,
    tags: &[&str],
) -> LocalCard {
    let card = LocalCard::new(
        "Default",
        [
            ("Front", front.to_string()),
            ("Back", back.to_string()),
            ("Source", placeholder_source(filename)),
        ],
    )
    .unwrap_or_else(|e| panic!("sourced_card: {e}"))
    .with_tags(tags.iter().copied());

    match id {
        Some(id) => card.with_id(id),
        None => card,
    }
}

/// Remote record holding the same fields and tags as `local`.
///
/// The placeholder in every field is replaced by `block`, the way the store
/// sees a card after its first round trip.
pub fn mirror_remote(local: &LocalCard, block: &str) -> RemoteCard {
    let fields: Vec<(String, String)> = local
        .fields
        .iter()
        .map(|(name, value)| (name.clone(), value.replace(DEFAULT_PLACEHOLDER, block)))
        .collect();

    RemoteCard::new(local.id.unwrap_or_default(), fields).with_tags(local.tags.iter().cloned())
}
