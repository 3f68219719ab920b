//! Error types for flashsync-match

/// Result type for flashsync-match operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a checker. Comparison itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Source normalization pattern could not be compiled
    #[error("Invalid source pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Settings or card error from flashsync-cards
    #[error(transparent)]
    Cards(#[from] flashsync_cards::Error),
}
