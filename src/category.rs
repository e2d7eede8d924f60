//! Categories: directories within a workspace
//!
//! A category stores nothing but its location. Children are listed from
//! the filesystem on every call, so the result is always current.

use crate::config::WorkspaceConfig;
use crate::error::{Error, Result};
use crate::note::Note;
use crate::paths::{is_hidden, normalize_relative, rename_within, validate_name};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A folder within a workspace
#[derive(Debug, Clone)]
pub struct Category {
    root: PathBuf,
    /// Relative to `root`; empty for the workspace root itself
    path: PathBuf,
    config: WorkspaceConfig,
}

/// Kind of a listed directory entry, after following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    File,
}

impl Category {
    /// Create a category for `path` relative to the workspace `root`
    ///
    /// The directory does not have to exist yet.
    ///
    /// # Errors
    /// `InvalidPath` if the path is absolute or escapes the workspace.
    pub fn new(root: impl Into<PathBuf>, path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(root, path, WorkspaceConfig::default())
    }

    pub fn with_config(
        root: impl Into<PathBuf>,
        path: impl AsRef<Path>,
        config: WorkspaceConfig,
    ) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            path: normalize_relative(path.as_ref())?,
            config,
        })
    }

    /// The category for the workspace root itself.
    pub(crate) fn workspace_root(root: impl Into<PathBuf>, config: WorkspaceConfig) -> Self {
        Self {
            root: root.into(),
            path: PathBuf::new(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path relative to the workspace root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rebind to another relative path without touching the filesystem.
    pub fn set_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.path = normalize_relative(path.as_ref())?;
        Ok(())
    }

    /// Location of the directory on disk
    pub fn dir_path(&self) -> PathBuf {
        self.root.join(&self.path)
    }

    pub fn exists(&self) -> bool {
        self.dir_path().is_dir()
    }

    pub fn is_root(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    /// Folder name (last path segment)
    ///
    /// For the workspace root this is the root directory's own name, resolved
    /// through the filesystem when the root is spelled `.` or ends in `..`.
    pub fn title(&self) -> String {
        if !self.is_root() {
            return file_name_of(&self.path);
        }
        match self.root.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => fs::canonicalize(&self.root)
                .map(|root| file_name_of(&root))
                .unwrap_or_default(),
        }
    }

    /// Rename the folder on disk
    ///
    /// # Errors
    /// - `InvalidState` for the workspace root
    /// - `InvalidName` if `title` is not a legal directory name
    /// - `Io` if the target already exists or the rename fails
    pub fn rename(&mut self, title: &str) -> Result<()> {
        if self.is_root() {
            return Err(Error::InvalidState("the workspace root cannot be renamed"));
        }
        validate_name(title)?;

        let new_path = self.path.with_file_name(title);
        if new_path == self.path {
            return Ok(());
        }
        rename_within(&self.root, &self.path, &new_path)?;
        self.path = new_path;
        Ok(())
    }

    /// Immediate child directories, in listing order
    ///
    /// Empty if the directory does not exist.
    pub fn sub_categories(&self) -> Result<Vec<Category>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|(_, kind)| *kind == EntryKind::Directory)
            .map(|(name, _)| Category {
                root: self.root.clone(),
                path: self.path.join(name),
                config: self.config,
            })
            .collect())
    }

    /// Immediate files, each as a note; unrecognized extensions are plain notes.
    ///
    /// Empty if the directory does not exist.
    pub fn notes(&self) -> Result<Vec<Note>> {
        self.entries()?
            .into_iter()
            .filter(|(_, kind)| *kind == EntryKind::File)
            .map(|(name, _)| Note::in_workspace(self.root.clone(), self.path.join(name)))
            .collect()
    }

    /// List the directory once, classifying each entry.
    ///
    /// Hidden entries are skipped unless configured otherwise. Symlinks are
    /// classified by their target; dangling links and special files are
    /// neither categories nor notes.
    fn entries(&self) -> Result<Vec<(OsString, EntryKind)>> {
        let dir = self.dir_path();
        let read_dir = match fs::read_dir(&dir) {
            Ok(read_dir) => read_dir,
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                debug!("Category {} has no directory", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::io(&dir, e)),
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| Error::io(&dir, e))?;
            let name = entry.file_name();
            if !self.config.include_hidden && is_hidden(&name) {
                continue;
            }

            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            let kind = if file_type.is_symlink() {
                if !self.config.follow_symlinks {
                    continue;
                }
                match fs::metadata(entry.path()) {
                    Ok(meta) if meta.is_dir() => EntryKind::Directory,
                    Ok(meta) if meta.is_file() => EntryKind::File,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!("Skipping unresolvable link {}: {}", entry.path().display(), e);
                        continue;
                    }
                }
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                continue;
            };
            entries.push((name, kind));
        }

        if self.config.sort_entries {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
        }
        debug!("Listed {} entries in {}", entries.len(), dir.display());
        Ok(entries)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
