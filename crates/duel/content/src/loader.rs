//! Loading conveniences for stored combatant documents.

use std::fs;
use std::path::Path;

use anyhow::Context;
use duel_core::CombatantSnapshot;

use crate::model::RawCombatant;
use crate::normalize::normalize_combatant;

/// Parse and normalize one combatant from a JSON document.
pub fn combatant_from_json(json: &str) -> anyhow::Result<CombatantSnapshot> {
    let raw: RawCombatant =
        serde_json::from_str(json).context("failed to parse combatant document")?;
    normalize_combatant(&raw).context("failed to normalize combatant document")
}

/// Load and normalize one combatant from a JSON file.
pub fn load_combatant(path: &Path) -> anyhow::Result<CombatantSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read combatant file {}", path.display()))?;
    combatant_from_json(&content)
        .with_context(|| format!("invalid combatant file {}", path.display()))
}
