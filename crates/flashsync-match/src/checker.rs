//! The equivalence check between a local card and its remote record

use std::fmt;

use flashsync_cards::{LocalCard, RemoteCard, SyncSettings};
use serde::Serialize;
use similar::TextDiff;

use crate::error::Result;
use crate::source::SourceNormalizer;

/// Why a local card no longer matches its remote record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Divergence {
    /// Field counts differ, so the card switched to another model.
    /// Fields cannot be aligned across models; the update replaces the card.
    ModelMismatch {
        local_fields: usize,
        remote_fields: usize,
    },
    /// The Source link targets differ after normalization
    SourceChanged {
        local_key: String,
        remote_key: String,
    },
    /// A field the remote record has is missing locally
    FieldMissing { field: String },
    /// A field value differs
    FieldChanged {
        field: String,
        /// Character similarity of the two values, 0.0 to 1.0
        similarity: f32,
    },
    /// Tags differ as ordered sequences
    TagsChanged {
        local: Vec<String>,
        remote: Vec<String>,
    },
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Divergence::ModelMismatch {
                local_fields,
                remote_fields,
            } => write!(
                f,
                "model changed ({} local fields, {} remote)",
                local_fields, remote_fields
            ),
            Divergence::SourceChanged {
                local_key,
                remote_key,
            } => write!(f, "source changed: {} -> {}", remote_key, local_key),
            Divergence::FieldMissing { field } => write!(f, "field {} missing locally", field),
            Divergence::FieldChanged { field, similarity } => {
                write!(f, "field {} changed ({:.0}% similar)", field, similarity * 100.0)
            }
            Divergence::TagsChanged { local, remote } => write!(
                f,
                "tags changed: [{}] -> [{}]",
                remote.join(", "),
                local.join(", ")
            ),
        }
    }
}

/// Outcome of comparing one card pair
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Equivalent,
    Diverged(Divergence),
}

impl Comparison {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Comparison::Equivalent)
    }

    pub fn divergence(&self) -> Option<&Divergence> {
        match self {
            Comparison::Equivalent => None,
            Comparison::Diverged(divergence) => Some(divergence),
        }
    }

    pub fn into_divergence(self) -> Option<Divergence> {
        match self {
            Comparison::Equivalent => None,
            Comparison::Diverged(divergence) => Some(divergence),
        }
    }
}

/// Decides whether a local card is already stored, unchanged, remotely.
///
/// The checker is immutable after construction and can be shared between
/// threads. Comparison does no I/O and never fails.
///
/// # Example
///
/// ```
/// use flashsync_cards::{LocalCard, RemoteCard, SyncSettings};
/// use flashsync_match::EquivalenceChecker;
///
/// let checker = EquivalenceChecker::new(SyncSettings::default()).unwrap();
///
/// let local = LocalCard::new("Default", [
///     ("Front", "2 + 2"),
///     ("Source", "[[Note#^__BLOCK_ID__]]"),
/// ]).unwrap().with_id(42);
/// let remote = RemoteCard::new(42, [
///     ("Front", "2 + 2"),
///     ("Source", "[[Note#^1700000000123]]"),
/// ]);
///
/// assert!(checker.is_equivalent(&local, &remote));
/// ```
#[derive(Debug, Clone)]
pub struct EquivalenceChecker {
    settings: SyncSettings,
    normalizer: SourceNormalizer,
}

impl EquivalenceChecker {
    /// Validate `settings` and compile the Source pattern
    pub fn new(settings: SyncSettings) -> Result<Self> {
        settings.validate()?;
        let normalizer = SourceNormalizer::new(&settings)?;
        Ok(Self {
            settings,
            normalizer,
        })
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn normalizer(&self) -> &SourceNormalizer {
        &self.normalizer
    }

    /// `true` when no sync action is needed for this card
    pub fn is_equivalent(&self, local: &LocalCard, remote: &RemoteCard) -> bool {
        self.compare(local, remote).is_equivalent()
    }

    /// Compare the pair and report the first divergence found
    pub fn compare(&self, local: &LocalCard, remote: &RemoteCard) -> Comparison {
        match self.find_divergence(local, remote) {
            None => Comparison::Equivalent,
            Some(divergence) => {
                tracing::debug!(
                    card_id = ?local.id,
                    note_id = remote.note_id,
                    %divergence,
                    "Card needs update"
                );
                Comparison::Diverged(divergence)
            }
        }
    }

    fn find_divergence(&self, local: &LocalCard, remote: &RemoteCard) -> Option<Divergence> {
        if remote.fields.len() != local.fields.len() {
            return Some(Divergence::ModelMismatch {
                local_fields: local.fields.len(),
                remote_fields: remote.fields.len(),
            });
        }

        // Declared order keeps the reported divergence deterministic
        for name in remote.ordered_field_names() {
            let remote_value = remote.field_value(name).unwrap_or_default();

            if name == self.settings.source_field {
                if let Some(divergence) = self.compare_source(local, remote_value) {
                    return Some(divergence);
                }
                continue;
            }

            match local.field(name) {
                None => {
                    return Some(Divergence::FieldMissing {
                        field: name.to_string(),
                    });
                }
                Some(local_value) if local_value != remote_value => {
                    let similarity = TextDiff::from_chars(remote_value, local_value).ratio();
                    return Some(Divergence::FieldChanged {
                        field: name.to_string(),
                        similarity,
                    });
                }
                Some(_) => {}
            }
        }

        if remote.tags != local.tags {
            return Some(Divergence::TagsChanged {
                local: local.tags.clone(),
                remote: remote.tags.clone(),
            });
        }

        None
    }

    fn compare_source(&self, local: &LocalCard, remote_value: &str) -> Option<Divergence> {
        // An empty side carries no link to compare
        let local_value = local.source(&self.settings)?;
        if remote_value.is_empty() {
            return None;
        }

        let local_key = self.normalizer.comparison_key(local_value, local.id);
        let remote_key = self.normalizer.comparison_key(remote_value, local.id);
        if local_key == remote_key {
            None
        } else {
            Some(Divergence::SourceChanged {
                local_key,
                remote_key,
            })
        }
    }
}
