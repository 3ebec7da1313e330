use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Name of the persistence file in the working directory.
pub const STATE_FILE: &str = "cloze.json";

/// Persisted quiz state.
///
/// Only the `code` mapping is recognized today; nothing reads or writes
/// into it yet, it is carried through as a placeholder for per-resource
/// bookkeeping. Top-level keys this version does not know about survive
/// the load/save round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizState {
    #[serde(default)]
    pub code: BTreeMap<String, Value>,

    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

/// Read the state from `dir`, or the empty default when the file is absent.
pub fn load(dir: &Path) -> Result<QuizState> {
    let path = dir.join(STATE_FILE);
    if !path.exists() {
        return Ok(QuizState::default());
    }

    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write the state back to `dir`, pretty-printed with 2-space indent.
pub fn save(dir: &Path, state: &QuizState) -> Result<()> {
    let path = dir.join(STATE_FILE);
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}
