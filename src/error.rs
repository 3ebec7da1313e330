use std::path::PathBuf;
use thiserror::Error;

/// Fatal, user-facing failures detected before a round can run.
///
/// These only describe what went wrong; printing and the exit code are
/// decided once, at the top of the binary.
#[derive(Debug, Error)]
pub enum ClozeError {
    #[error(".clozerc doesn't exist in {}", dir.display())]
    ConfigMissing { dir: PathBuf },

    #[error("no results for \"{pattern}\"")]
    NoMatchingFiles { pattern: String },

    #[error("no code blocks in files matching \"{pattern}\"")]
    NoCodeBlocks { pattern: String },
}
