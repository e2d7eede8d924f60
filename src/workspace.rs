//! The workspace: a root folder holding every category and note
//!
//! Nothing is kept in memory. Every query walks the directory tree again.

use crate::category::Category;
use crate::config::WorkspaceConfig;
use crate::error::{Error, Result, Warning};
use crate::note::Note;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Root directory of a notes collection
#[derive(Debug, Clone)]
pub struct Workspace {
    base_path: PathBuf,
    config: WorkspaceConfig,
}

/// Result of a full traversal: every note, plus non-fatal warnings
#[derive(Debug, Default)]
pub struct Scan {
    pub notes: Vec<Note>,
    pub warnings: Vec<Warning>,
}

impl Workspace {
    /// Bind a workspace to `base_path`. The directory is not checked until
    /// it is traversed.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self::with_config(base_path, WorkspaceConfig::default())
    }

    pub fn with_config(base_path: impl Into<PathBuf>, config: WorkspaceConfig) -> Self {
        Self {
            base_path: base_path.into(),
            config,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn set_base_path(&mut self, base_path: impl Into<PathBuf>) {
        self.base_path = base_path.into();
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Category for the workspace root
    pub fn root_category(&self) -> Category {
        Category::workspace_root(self.base_path.clone(), self.config)
    }

    /// Category at `path`, relative to the workspace root
    pub fn category(&self, path: impl AsRef<Path>) -> Result<Category> {
        Category::with_config(self.base_path.clone(), path, self.config)
    }

    /// Note at `path`, relative to the workspace root
    pub fn note(&self, path: impl AsRef<Path>) -> Result<Note> {
        Note::in_workspace(self.base_path.clone(), path)
    }

    /// Every note in the workspace, flattened depth-first
    ///
    /// Each category's own notes come before the notes of its
    /// sub-categories. Directories reached twice are skipped; see
    /// [`Workspace::scan`] to get the corresponding warnings.
    ///
    /// # Errors
    /// `PathNotFound` if the base path does not exist or is not a directory.
    pub fn notes_list(&self) -> Result<Vec<Note>> {
        Ok(self.scan()?.notes)
    }

    /// Traverse the whole workspace, collecting notes and warnings.
    pub fn scan(&self) -> Result<Scan> {
        match fs::metadata(&self.base_path) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(Error::PathNotFound(self.base_path.clone())),
            Err(e) => return Err(Error::from_io(&self.base_path, e)),
        }

        let mut scan = Scan::default();
        let mut visited = HashSet::new();
        self.visit(&self.root_category(), &mut visited, &mut scan)?;
        debug!(
            "Scanned {}: {} notes, {} warnings",
            self.base_path.display(),
            scan.notes.len(),
            scan.warnings.len()
        );
        Ok(scan)
    }

    fn visit(
        &self,
        category: &Category,
        visited: &mut HashSet<PathBuf>,
        scan: &mut Scan,
    ) -> Result<()> {
        let dir = category.dir_path();
        let canonical = match fs::canonicalize(&dir) {
            Ok(canonical) => canonical,
            // Vanished since it was listed
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Error::io(&dir, e)),
        };

        if visited.contains(&canonical) {
            let warning = Warning::CycleDetected {
                path: category.path().to_path_buf(),
                target: canonical,
            };
            warn!("{}", warning);
            scan.warnings.push(warning);
            return Ok(());
        }
        visited.insert(canonical);

        scan.notes.extend(category.notes()?);
        for sub_category in category.sub_categories()? {
            self.visit(&sub_category, visited, scan)?;
        }
        Ok(())
    }
}
