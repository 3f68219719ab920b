//! Check command implementation

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use flashsync_cards::{Flashcard, parse_remote_cards};
use flashsync_match::{EquivalenceChecker, PlanEntry, SyncAction, SyncPlan};

use super::read_local_cards;
use crate::error::{CliError, Result};

/// Run the check command, writing the plan to `out`
pub fn run_check(
    checker: &EquivalenceChecker,
    local_path: &Path,
    remote_path: &Path,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let cards = read_local_cards(local_path)?;
    let remote_content = std::fs::read_to_string(remote_path).map_err(|e| {
        CliError::user(format!(
            "Cannot read remote records {}: {}",
            remote_path.display(),
            e
        ))
    })?;
    let remotes = parse_remote_cards(&remote_content)?;

    let plan = SyncPlan::build(checker, cards.iter().map(|card| card.data()), &remotes);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&plan)?)?;
        return Ok(());
    }

    for entry in &plan.entries {
        writeln!(out, "{}", format_entry(entry))?;
    }
    writeln!(
        out,
        "{}: {} to create, {} to update, {} unchanged",
        "Summary".bold(),
        plan.created(),
        plan.updated(),
        plan.unchanged()
    )?;

    Ok(())
}

fn format_entry(entry: &PlanEntry) -> String {
    let label = match entry.id {
        Some(id) => format!("card {}", id),
        None => format!("card #{} (new)", entry.index),
    };
    match &entry.action {
        SyncAction::Create => format!("  {} {:<10} {}", "+".green(), "create", label),
        SyncAction::Update { reason } => {
            format!("  {} {:<10} {}: {}", "~".yellow(), "update", label, reason)
        }
        SyncAction::Unchanged => format!("  {} {:<10} {}", "=".dimmed(), "unchanged", label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashsync_cards::SyncSettings;
    use std::fs;
    use tempfile::TempDir;

    const LOCAL: &str = r#"[
        {"kind": "basic", "deckName": "D", "fields": {"Front": "new", "Back": "a"}},
        {"kind": "basic", "id": 1700000000001, "deckName": "D", "tags": ["t"],
         "fields": {"Front": "q", "Back": "a", "Source": "[[Note#^__BLOCK_ID__]]"}}
    ]"#;

    const REMOTE: &str = r#"[{
        "noteId": 1700000000001,
        "tags": ["t"],
        "fields": {
            "Front": {"value": "q", "order": 0},
            "Back": {"value": "a", "order": 1},
            "Source": {"value": "[[Note#^1700000000555]]", "order": 2}
        }
    }]"#;

    fn setup() -> (TempDir, EquivalenceChecker) {
        colored::control::set_override(false);
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("local.json"), LOCAL).unwrap();
        fs::write(temp.path().join("remote.json"), REMOTE).unwrap();
        let checker = EquivalenceChecker::new(SyncSettings::default()).unwrap();
        (temp, checker)
    }

    #[test]
    fn test_check_text_output() {
        let (temp, checker) = setup();
        let mut out = Vec::new();
        run_check(
            &checker,
            &temp.path().join("local.json"),
            &temp.path().join("remote.json"),
            false,
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("card #0 (new)"), "{}", text);
        assert!(text.contains("unchanged  card 1700000000001"), "{}", text);
        assert!(text.contains("1 to create, 0 to update, 1 unchanged"), "{}", text);
    }

    #[test]
    fn test_check_json_output() {
        let (temp, checker) = setup();
        let mut out = Vec::new();
        run_check(
            &checker,
            &temp.path().join("local.json"),
            &temp.path().join("remote.json"),
            true,
            &mut out,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["entries"][0]["action"], "create");
        assert_eq!(value["entries"][1]["action"], "unchanged");
    }

    #[test]
    fn test_check_missing_remote_file() {
        let (temp, checker) = setup();
        let mut out = Vec::new();
        let err = run_check(
            &checker,
            &temp.path().join("local.json"),
            &temp.path().join("absent.json"),
            false,
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
