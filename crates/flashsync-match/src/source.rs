//! Normalization of Source back-links.
//!
//! A Source value points back at the note block a card came from, in one of
//! two shapes:
//!
//! ```text
//! [[Arithmetic#^1700000000123]]
//! obsidian://open?vault=Notes&file=Arithmetic.md#^1700000000123
//! ```
//!
//! The block id is regenerated across sync passes, and a card that has no
//! remote id yet carries the placeholder token instead. The comparison key
//! strips both, so only the link target takes part in equality.

use std::borrow::Cow;
use std::sync::LazyLock;

use flashsync_cards::SyncSettings;
use regex::{Captures, Regex};

use crate::error::Result;

static WIKI_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("Invalid wiki link regex"));

static URL_FILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"file=([^#&]+)").expect("Invalid url file regex"));

/// Strips generated block ids and placeholder tokens from Source strings
#[derive(Debug, Clone)]
pub struct SourceNormalizer {
    placeholder: String,
    block_id_digits: usize,
    /// `#^` followed by the placeholder or a digit run
    block_ref: Regex,
}

impl SourceNormalizer {
    pub fn new(settings: &SyncSettings) -> Result<Self> {
        // Placeholder first: it may itself start with digits
        let pattern = format!(r"#\^(?:{}|([0-9]+))", regex::escape(&settings.placeholder));
        Ok(Self {
            placeholder: settings.placeholder.clone(),
            block_id_digits: settings.block_id_digits,
            block_ref: Regex::new(&pattern)?,
        })
    }

    /// Substitute a real card id for the placeholder token.
    ///
    /// Without an id the text is returned unchanged.
    pub fn resolve_placeholder<'a>(&self, source: &'a str, id: Option<u64>) -> Cow<'a, str> {
        match id {
            Some(id) if source.contains(&self.placeholder) => {
                Cow::Owned(source.replace(&self.placeholder, &id.to_string()))
            }
            _ => Cow::Borrowed(source),
        }
    }

    /// Remove every block reference from `source`.
    ///
    /// A reference is `#^` followed by exactly `block_id_digits` digits,
    /// `#^<resolved_id>`, or the placeholder with or without its `#^`.
    /// Anything else is left untouched.
    pub fn strip(&self, source: &str, resolved_id: Option<u64>) -> String {
        let id = resolved_id.map(|id| id.to_string());
        let stripped = self.block_ref.replace_all(source, |caps: &Captures| match caps.get(1) {
            Some(digits)
                if digits.len() == self.block_id_digits
                    || id.as_deref() == Some(digits.as_str()) =>
            {
                String::new()
            }
            Some(_) => caps[0].to_string(),
            None => String::new(),
        });
        stripped.replace(&self.placeholder, "")
    }

    /// Comparison key of a Source value for a card with `card_id`.
    ///
    /// Applied to both the local and the remote value of the same card.
    pub fn comparison_key(&self, source: &str, card_id: Option<u64>) -> String {
        let resolved = self.resolve_placeholder(source, card_id);
        let key = self.strip(&resolved, card_id);
        tracing::trace!(source, key = %key, "Normalized source");
        key
    }

    /// Best-effort link target of a Source value, stable across block ids.
    ///
    /// Wiki links yield their target, URLs their decoded `file=` parameter.
    /// Any other text is returned stripped but otherwise as-is.
    pub fn extract_filename(&self, source: &str) -> String {
        if let Some(caps) = WIKI_LINK_REGEX.captures(source) {
            return self.strip(&caps[1], None);
        }

        if let Some(caps) = URL_FILE_REGEX.captures(source) {
            let raw = &caps[1];
            let decoded = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
            return self.strip(&decoded, None);
        }

        self.strip(source, None)
    }
}
