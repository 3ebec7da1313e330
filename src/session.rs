use crate::config::ClozeConfig;
use crate::error::ClozeError;
use crate::extractor;
use crate::prompt::AnswerPrompt;
use crate::quiz::{self, RoundOutcome};
use crate::state;
use anyhow::{Context, Result};
use rand::Rng;
use std::path::{Path, PathBuf};

/// Run one full quiz session in `dir`: configuration, file discovery,
/// extraction, a single round, state save.
///
/// State is saved on every non-error path, including an aborted prompt.
pub fn run(
    dir: &Path,
    rng: &mut impl Rng,
    prompt: &mut dyn AnswerPrompt,
) -> Result<RoundOutcome> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve directory {}", dir.display()))?;

    let config = ClozeConfig::load(&dir)?;
    let pattern = config.pattern();

    let files = discover_files(&dir, pattern)?;
    if files.is_empty() {
        return Err(ClozeError::NoMatchingFiles {
            pattern: pattern.to_string(),
        }
        .into());
    }
    log::info!("scanning {} file(s) matching \"{}\"", files.len(), pattern);

    let quiz_state = state::load(&dir)?;

    let resources = extractor::extract_files(&files)?;
    if resources.is_empty() {
        return Err(ClozeError::NoCodeBlocks {
            pattern: pattern.to_string(),
        }
        .into());
    }
    log::info!("extracted {} code block(s)", resources.len());

    let outcome = quiz::run_round(&resources, rng, prompt, &dir)?;

    state::save(&dir, &quiz_state)?;
    Ok(outcome)
}

/// Resolve the glob pattern against `dir`: regular files only, in glob's
/// sorted order, as absolute paths.
fn discover_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = dir
        .to_str()
        .with_context(|| format!("Non-UTF-8 directory {}", dir.display()))?;
    // Escape the directory prefix; only `pattern` carries wildcards.
    let full_pattern = format!("{}/{}", glob::Pattern::escape(dir), pattern);

    let entries = glob::glob(&full_pattern)
        .with_context(|| format!("Invalid file pattern \"{pattern}\""))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.with_context(|| format!("Failed to walk files for \"{pattern}\""))?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}
