//! Card equivalence checking for flashsync.
//!
//! Decides whether a locally authored card is already represented, unchanged,
//! in the remote store or must be created or updated:
//!
//! - [`EquivalenceChecker`] compares one local card with its remote record
//! - [`SourceNormalizer`] turns Source back-links into comparison keys that
//!   ignore generated block ids and the placeholder token
//! - [`SyncPlan`] classifies a whole batch of cards
//!
//! Everything here is pure: no I/O, no shared mutable state.

pub mod checker;
pub mod error;
pub mod plan;
pub mod source;

pub use checker::{Comparison, Divergence, EquivalenceChecker};
pub use error::{Error, Result};
pub use plan::{PlanEntry, SyncAction, SyncPlan};
pub use source::SourceNormalizer;
