//! Source command implementation

use std::io::Write;

use colored::Colorize;
use flashsync_match::SourceNormalizer;

use crate::error::Result;

/// Print the extracted filename and comparison key of `text`
pub fn run_source(
    normalizer: &SourceNormalizer,
    text: &str,
    id: Option<u64>,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "{} {}", "filename:".dimmed(), normalizer.extract_filename(text))?;
    writeln!(out, "{} {}", "key:".dimmed(), normalizer.comparison_key(text, id))?;
    Ok(())
}
