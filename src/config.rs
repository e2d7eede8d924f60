use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Traversal options for a workspace
///
/// Loaded from a TOML file; every field is optional:
///
/// ```toml
/// include_hidden = false
/// follow_symlinks = true
/// sort_entries = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// List entries whose name starts with a dot
    pub include_hidden: bool,
    /// Descend into symlinked directories and list symlinked files
    pub follow_symlinks: bool,
    /// List children in name order instead of filesystem order
    pub sort_entries: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            include_hidden: false,
            follow_symlinks: true,
            sort_entries: false,
        }
    }
}

impl WorkspaceConfig {
    /// Load a configuration file, falling back to defaults if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::io(path, e))
    }
}
