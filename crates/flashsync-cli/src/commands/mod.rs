//! Command implementations for flashsync-cli

pub mod check;
pub mod payload;
pub mod source;

pub use check::run_check;
pub use payload::run_payload;
pub use source::run_source;

use std::path::Path;

use flashsync_cards::{AnyCard, parse_local_cards};

use crate::error::{CliError, Result};

/// Read and parse a local cards file
pub(crate) fn read_local_cards(path: &Path) -> Result<Vec<AnyCard>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CliError::user(format!("Cannot read local cards {}: {}", path.display(), e))
    })?;
    Ok(parse_local_cards(&content)?)
}
