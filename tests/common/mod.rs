//! Shared fixtures for session tests.
//!
//! `Workspace` builds an isolated temporary working directory (config,
//! Markdown files, optional state file) with RAII cleanup; `ScriptedPrompt`
//! replays canned answers so sessions run without a terminal.

use anyhow::Result;
use cloze::prompt::AnswerPrompt;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A throwaway working directory with a `.clozerc` and Markdown files.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// A directory holding the given `.clozerc` content.
    pub fn new(clozerc: &str) -> Result<Self> {
        let workspace = Self::empty()?;
        fs::write(workspace.dir.path().join(".clozerc"), clozerc)?;
        Ok(workspace)
    }

    /// A directory with no `.clozerc` at all.
    pub fn empty() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Write a file under the workspace, creating parent directories.
    pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The raw `cloze.json` content, if the session wrote one.
    pub fn read_state(&self) -> Result<String> {
        Ok(fs::read_to_string(self.dir.path().join("cloze.json"))?)
    }
}

/// Prompt that replays queued answers; a queued `None` (or an exhausted
/// queue) simulates an aborted prompt.
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| Some((*a).to_string())).collect(),
        }
    }

    pub fn aborting() -> Self {
        Self {
            answers: VecDeque::from([None]),
        }
    }
}

impl AnswerPrompt for ScriptedPrompt {
    fn ask(&mut self, _label: &str) -> Result<Option<String>> {
        Ok(self.answers.pop_front().unwrap_or(None))
    }
}
