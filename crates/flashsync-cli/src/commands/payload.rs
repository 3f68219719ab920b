//! Payload command implementation

use std::io::Write;
use std::path::Path;

use flashsync_cards::{Flashcard, MediaFile, SyncPayload, SyncSettings};
use serde::Serialize;

use super::read_local_cards;
use crate::error::Result;

#[derive(Serialize)]
struct PayloadOutput {
    note: SyncPayload,
    media: Vec<MediaFile>,
}

/// Run the payload command, writing a JSON array to `out`
pub fn run_payload(
    settings: &SyncSettings,
    local_path: &Path,
    update: bool,
    out: &mut impl Write,
) -> Result<()> {
    let cards = read_local_cards(local_path)?;

    let payloads: Vec<PayloadOutput> = cards
        .iter()
        .map(|card| PayloadOutput {
            note: card.to_sync_payload(update, settings),
            media: card.list_media(),
        })
        .collect();

    writeln!(out, "{}", serde_json::to_string_pretty(&payloads)?)?;
    Ok(())
}
