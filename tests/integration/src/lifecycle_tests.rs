//! End-to-end tests for a card's life across several sync passes
//!
//! Each pass: build local cards -> classify against the store -> apply the
//! plan to an in-memory store the way the sync driver would.

use std::collections::HashMap;

use flashsync_cards::{
    BasicCard, Flashcard, LocalCard, RemoteCard, RemoteField, SyncPayload, SyncSettings,
    parse_remote_cards,
};
use flashsync_match::{Divergence, EquivalenceChecker, SyncAction, SyncPlan};
use flashsync_test_utils::cards::{block_id, sourced_card};
use pretty_assertions::assert_eq;

/// Minimal stand-in for the remote store
struct MemoryStore {
    notes: HashMap<u64, RemoteCard>,
    next_id: u64,
}

impl MemoryStore {
    fn new() -> Self {
        Self {
            notes: HashMap::new(),
            next_id: 1_700_000_000_001,
        }
    }

    /// Store a payload; the store writes a fresh block id into the Source link
    fn apply(&mut self, payload: &SyncPayload, pass: u64) -> u64 {
        let id = payload.id.unwrap_or_else(|| {
            let id = self.next_id;
            self.next_id += 1;
            id
        });
        let fields = payload
            .fields
            .iter()
            .enumerate()
            .map(|(order, (name, value))| {
                let value = value.replace("__BLOCK_ID__", &block_id(id + pass));
                (name.clone(), RemoteField::new(value, order as u32))
            })
            .collect();
        self.notes.insert(
            id,
            RemoteCard {
                note_id: id,
                model_name: payload.model_name.clone(),
                tags: payload.tags.clone(),
                fields,
                cards: vec![id + 1],
            },
        );
        id
    }

    /// Regenerate every block id, as a later pass of the generator does
    fn churn_block_ids(&mut self, pass: u64) {
        for (id, note) in self.notes.iter_mut() {
            if let Some(source) = note.fields.get_mut("Source") {
                source.value = format!("[[Arithmetic#^{}]]", block_id(id + pass * 1000));
            }
        }
    }

    fn records(&self) -> Vec<RemoteCard> {
        self.notes.values().cloned().collect()
    }
}

fn sync_pass(
    checker: &EquivalenceChecker,
    store: &mut MemoryStore,
    cards: &mut [LocalCard],
    pass: u64,
) -> SyncPlan {
    let plan = SyncPlan::build(checker, cards.iter(), &store.records());
    for entry in &plan.entries {
        let card = BasicCard::new(cards[entry.index].clone());
        let id = match entry.action {
            SyncAction::Create => store.apply(&card.to_sync_payload(false, checker.settings()), pass),
            SyncAction::Update { .. } => {
                store.apply(&card.to_sync_payload(true, checker.settings()), pass)
            }
            SyncAction::Unchanged => continue,
        };
        cards[entry.index].id = Some(id);
    }
    plan
}

#[test]
fn test_card_lifecycle_settles_after_first_pass() {
    let checker = EquivalenceChecker::new(SyncSettings::default()).unwrap();
    let mut store = MemoryStore::new();
    let mut cards = vec![
        sourced_card(None, "2 + 2", "4", "Arithmetic", &["math"]),
        sourced_card(None, "3 + 3", "6", "Arithmetic", &["math"]),
    ];

    // Pass 1: everything is new
    let plan = sync_pass(&checker, &mut store, &mut cards, 1);
    assert_eq!(plan.created(), 2);
    assert!(cards.iter().all(LocalCard::is_created));

    // Pass 2: nothing changed locally, block ids differ from the placeholder
    let plan = sync_pass(&checker, &mut store, &mut cards, 2);
    assert_eq!(plan.unchanged(), 2);
    assert!(!plan.needs_sync());

    // Pass 3: the generator churned every block id
    store.churn_block_ids(3);
    let plan = sync_pass(&checker, &mut store, &mut cards, 3);
    assert_eq!(plan.unchanged(), 2);

    // Pass 4: one answer edited
    cards[1].fields.insert("Back".to_string(), "six".to_string());
    let plan = sync_pass(&checker, &mut store, &mut cards, 4);
    assert_eq!(plan.updated(), 1);
    match &plan.entries[1].action {
        SyncAction::Update {
            reason: Divergence::FieldChanged { field, .. },
        } => assert_eq!(field, "Back"),
        other => panic!("Expected a Back field update, got {:?}", other),
    }

    // Pass 5: settled again
    let plan = sync_pass(&checker, &mut store, &mut cards, 5);
    assert_eq!(plan.unchanged(), 2);
}

#[test]
fn test_moved_card_updates_once() {
    let checker = EquivalenceChecker::new(SyncSettings::default()).unwrap();
    let mut store = MemoryStore::new();
    let mut cards = vec![sourced_card(None, "q", "a", "Arithmetic", &[])];

    sync_pass(&checker, &mut store, &mut cards, 1);

    cards[0].fields.insert(
        "Source".to_string(),
        "[[Algebra#^__BLOCK_ID__]]".to_string(),
    );
    let plan = sync_pass(&checker, &mut store, &mut cards, 2);
    assert!(matches!(
        &plan.entries[0].action,
        SyncAction::Update {
            reason: Divergence::SourceChanged { .. }
        }
    ));

    let plan = sync_pass(&checker, &mut store, &mut cards, 3);
    assert_eq!(plan.unchanged(), 1);
}

#[test]
fn test_template_switch_forces_update() {
    let checker = EquivalenceChecker::new(SyncSettings::default()).unwrap();
    let local = LocalCard::new("Default", [("Front", "q"), ("Back", "a")])
        .unwrap()
        .with_id(1_700_000_000_001);

    let records = parse_remote_cards(
        r#"[{"noteId": 1700000000001, "modelName": "Obsidian-cloze",
             "fields": {"Text": {"value": "q", "order": 0},
                        "Back Extra": {"value": "a", "order": 1},
                        "Source": {"value": "", "order": 2}}}]"#,
    )
    .unwrap();

    assert!(!checker.is_equivalent(&local, &records[0]));
    let plan = SyncPlan::build(&checker, [&local], &records);
    assert_eq!(plan.updated(), 1);
}

#[test]
fn test_payload_shape_matches_store_expectations() {
    let settings = SyncSettings::default();
    let card = BasicCard::new(sourced_card(Some(42), "q", "a", "Note", &["t"]).with_code(true));

    let json = serde_json::to_value(card.to_sync_payload(true, &settings)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 42,
            "deckName": "Default",
            "modelName": "Obsidian-basic-source-code",
            "fields": {
                "Back": "a",
                "Front": "q",
                "Source": "[[Note#^__BLOCK_ID__]]"
            },
            "tags": ["t"]
        })
    );
}
