//! Classification of a batch of local cards against the remote store
//!
//! Pairs every local card with the remote record of the same id and decides
//! whether it must be created, updated or left alone.

use std::collections::HashMap;

use flashsync_cards::{LocalCard, RemoteCard};
use serde::Serialize;

use crate::checker::{Comparison, Divergence, EquivalenceChecker};

/// What the sync driver should do with one card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum SyncAction {
    /// The card has no remote copy
    Create,
    /// The remote copy diverged
    Update { reason: Divergence },
    /// The remote copy is equivalent
    Unchanged,
}

/// One card of a plan, by its position in the input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntry {
    pub index: usize,
    pub id: Option<u64>,
    #[serde(flatten)]
    pub action: SyncAction,
}

/// Per-card actions for one sync pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncPlan {
    pub entries: Vec<PlanEntry>,
}

impl SyncPlan {
    /// Classify `locals` against `remotes`, matched by note id
    pub fn build<'a>(
        checker: &EquivalenceChecker,
        locals: impl IntoIterator<Item = &'a LocalCard>,
        remotes: &[RemoteCard],
    ) -> Self {
        let by_id: HashMap<u64, &RemoteCard> =
            remotes.iter().map(|remote| (remote.note_id, remote)).collect();

        let entries = locals
            .into_iter()
            .enumerate()
            .map(|(index, local)| {
                let action = match local.id.and_then(|id| by_id.get(&id)) {
                    None => {
                        if let Some(id) = local.id {
                            tracing::warn!(card_id = id, "Remote copy not found, recreating");
                        }
                        SyncAction::Create
                    }
                    Some(remote) => match checker.compare(local, remote) {
                        Comparison::Equivalent => SyncAction::Unchanged,
                        Comparison::Diverged(reason) => SyncAction::Update { reason },
                    },
                };
                PlanEntry {
                    index,
                    id: local.id,
                    action,
                }
            })
            .collect();

        let plan = Self { entries };
        tracing::info!(
            create = plan.created(),
            update = plan.updated(),
            unchanged = plan.unchanged(),
            "Sync plan built"
        );
        plan
    }

    pub fn created(&self) -> usize {
        self.count(|action| matches!(action, SyncAction::Create))
    }

    pub fn updated(&self) -> usize {
        self.count(|action| matches!(action, SyncAction::Update { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|action| matches!(action, SyncAction::Unchanged))
    }

    /// Whether any card needs a create or update
    pub fn needs_sync(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| !matches!(entry.action, SyncAction::Unchanged))
    }

    fn count(&self, predicate: impl Fn(&SyncAction) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.action))
            .count()
    }
}
