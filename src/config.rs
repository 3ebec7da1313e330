use crate::error::ClozeError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".clozerc";

/// File pattern used when the configuration does not name one.
pub const DEFAULT_PATTERN: &str = "**/*.md";

/// Configuration read from `.clozerc`.
///
/// The file is plain JSON. Unknown keys are ignored.
///
/// # Example
///
/// ```json
/// { "files": "notes/**/*.md" }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClozeConfig {
    /// Glob pattern selecting the Markdown files to scan.
    pub files: Option<String>,
}

impl ClozeConfig {
    /// Load the configuration from `dir`.
    ///
    /// A missing file is [`ClozeError::ConfigMissing`]; an unreadable or
    /// malformed file propagates with context.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Err(ClozeError::ConfigMissing {
                dir: dir.to_path_buf(),
            }
            .into());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// The file pattern to scan, falling back to [`DEFAULT_PATTERN`].
    pub fn pattern(&self) -> &str {
        self.files.as_deref().unwrap_or(DEFAULT_PATTERN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_files_pattern() {
        let config: ClozeConfig = serde_json::from_str(r#"{ "files": "docs/*.md" }"#).unwrap();
        assert_eq!(config.pattern(), "docs/*.md");
    }

    #[test]
    fn test_empty_config_uses_default_pattern() {
        let config: ClozeConfig = serde_json::from_str("{}").unwrap();
        assert!(config.files.is_none());
        assert_eq!(config.pattern(), DEFAULT_PATTERN);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config: ClozeConfig =
            serde_json::from_str(r#"{ "files": "*.md", "future": true }"#).unwrap();
        assert_eq!(config.pattern(), "*.md");
    }

    #[test]
    fn test_missing_file_is_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClozeConfig::load(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClozeError>(),
            Some(ClozeError::ConfigMissing { .. })
        ));
        assert!(err.to_string().contains(".clozerc"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{ "files": "src/*.md" }"#).unwrap();
        let config = ClozeConfig::load(dir.path()).unwrap();
        assert_eq!(config.pattern(), "src/*.md");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        let err = ClozeConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
