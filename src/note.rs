//! A single note backed by a file in the workspace
//!
//! A `Note` is a lightweight view: it remembers where its file lives and
//! loads the file lazily. Attributes and content are read together on the
//! first access to either one and cached for the lifetime of the object.
//! Setters only change the in-memory copy; [`Note::save`] writes it back.

use crate::attributes::{self, Document};
use crate::error::{Error, Result};
use crate::format::NoteFormat;
use crate::paths::{
    date_prefix, normalize_note_path, rename_within, rewrite_within, split_file_name,
    validate_name,
};
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const UNBOUND: &str = "note has no path";

/// A document file within a workspace
#[derive(Debug, Clone, Default)]
pub struct Note {
    /// Directory `path` is relative to. Empty means the process working
    /// directory.
    root: PathBuf,
    path: Option<PathBuf>,
    format: NoteFormat,
    /// `None` until loaded from disk or set explicitly
    attributes: Option<Vec<String>>,
    /// `None` until loaded from disk or set explicitly
    content: Option<String>,
}

/// Serializable overview of a note, for listings and debugging
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteSummary {
    pub path: String,
    pub title: String,
    pub format: NoteFormat,
    pub date: NaiveDate,
    pub modified: DateTime<Local>,
}

impl Note {
    /// Create an unbound note: plain format, no attributes, empty content.
    ///
    /// An unbound note can be edited in memory but cannot be saved, renamed
    /// or titled until [`Note::set_path`] gives it a location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a note bound to `path`, relative to the working directory.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::in_workspace(PathBuf::new(), path)
    }

    /// Create a note bound to `path`, relative to the workspace `root`.
    ///
    /// Nothing is read from disk until attributes or content are requested.
    pub fn in_workspace(root: impl Into<PathBuf>, path: impl AsRef<Path>) -> Result<Self> {
        let mut note = Self {
            root: root.into(),
            ..Self::default()
        };
        note.set_path(path)?;
        Ok(note)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_bound(&self) -> bool {
        self.path.is_some()
    }

    /// Path relative to the workspace root, if bound
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Location of the backing file (root joined with the relative path)
    pub fn file_path(&self) -> Option<PathBuf> {
        self.path.as_ref().map(|path| self.root.join(path))
    }

    /// Rebind the note to another relative path
    ///
    /// This only changes metadata: no file is moved. The format follows the
    /// new extension. Attributes or content that were already loaded or set
    /// are kept; anything still unloaded will be read from the new file.
    ///
    /// # Errors
    /// `InvalidPath` if the path is absolute, escapes the workspace or
    /// names no file. The note is unchanged on error.
    pub fn set_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = normalize_note_path(path.as_ref())?;
        self.format = NoteFormat::from_path(&path);
        self.path = Some(path);
        Ok(())
    }

    /// Final path segment without its note extension
    pub fn title(&self) -> Result<String> {
        let path = self.path.as_ref().ok_or(Error::InvalidState(UNBOUND))?;
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();
        Ok(split_file_name(&file_name).0.to_string())
    }

    pub fn format(&self) -> NoteFormat {
        self.format
    }

    /// Rename the backing file to `title`, keeping its extension
    ///
    /// # Errors
    /// - `InvalidState` if the note is unbound
    /// - `InvalidName` if `title` is not a legal file name
    /// - `Io` if the target already exists or the rename fails
    ///
    /// The note keeps its old path on any error.
    pub fn rename(&mut self, title: &str) -> Result<()> {
        let path = self.path.as_ref().ok_or(Error::InvalidState(UNBOUND))?;
        validate_name(title)?;

        let file_name = path.file_name().unwrap_or_default().to_string_lossy();
        let new_name = match split_file_name(&file_name).1 {
            Some(ext) => format!("{}.{}", title, ext),
            None => {
                if split_file_name(title).1.is_some() {
                    return Err(Error::InvalidName {
                        name: title.to_string(),
                        reason: "would change the note format",
                    });
                }
                title.to_string()
            }
        };

        let new_path = path.with_file_name(new_name);
        self.move_to(new_path)
    }

    /// Change the format, rewriting the file under its new extension
    ///
    /// A recognized extension is replaced; a file without one gets the
    /// canonical extension appended. The file on disk is re-rendered with
    /// the attribute fences of the new format and the old file removed.
    /// Unsaved in-memory edits are kept in memory only.
    ///
    /// # Errors
    /// - `InvalidState` if the note is unbound
    /// - `PathNotFound` if the backing file is missing
    /// - `InvalidAttribute` if an attribute on disk is a fence of the new format
    /// - `Io` if the target already exists or a write fails
    ///
    /// The note and its file are unchanged on any error.
    pub fn change_format(&mut self, format: NoteFormat) -> Result<()> {
        let path = self.path.as_ref().ok_or(Error::InvalidState(UNBOUND))?;
        if format == self.format {
            return Ok(());
        }

        let file_name = path.file_name().unwrap_or_default().to_string_lossy();
        let new_name = match split_file_name(&file_name) {
            (stem, Some(_)) => format!("{}.{}", stem, format.extension()),
            (name, None) => format!("{}.{}", name, format.extension()),
        };
        let new_path = path.with_file_name(new_name);

        let document = self.read_document()?;
        attributes::validate(&document.attributes, format)?;
        let text = attributes::render(&document.attributes, &document.content, format);
        rewrite_within(&self.root, path, &new_path, &text)?;

        self.format = format;
        self.path = Some(new_path);
        Ok(())
    }

    /// Attribute lines from the file's leading block, loaded on first use.
    pub fn attributes(&mut self) -> Result<&[String]> {
        if self.attributes.is_none() {
            self.ensure_loaded()?;
        }
        Ok(self.attributes.get_or_insert_with(Vec::new).as_slice())
    }

    /// Replace the in-memory attributes
    pub fn set_attributes(&mut self, attributes: Vec<String>) {
        self.attributes = Some(attributes);
    }

    /// Document body (without the attribute block), loaded on first use.
    pub fn content(&mut self) -> Result<&str> {
        if self.content.is_none() {
            self.ensure_loaded()?;
        }
        Ok(self.content.get_or_insert_with(String::new).as_str())
    }

    /// Replace the in-memory content
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
    }

    /// Write attributes and content to the backing file
    ///
    /// Fields that were never loaded are read from the existing file first,
    /// so saving after `set_content` keeps the attributes on disk. A missing
    /// file is created; its parent directory must exist.
    ///
    /// Attributes that cannot be read back (blank lines, fence lines) are
    /// rejected with `InvalidAttribute` and nothing is written.
    pub fn save(&mut self) -> Result<()> {
        let file = self.file_path().ok_or(Error::InvalidState(UNBOUND))?;

        match self.ensure_loaded() {
            Ok(()) => {}
            Err(Error::PathNotFound(_)) => self.fill(Document::default()),
            Err(e) => return Err(e),
        }

        let attrs = self.attributes.as_deref().unwrap_or_default();
        attributes::validate(attrs, self.format)?;
        let text = attributes::render(attrs, self.content.as_deref().unwrap_or_default(), self.format);
        fs::write(&file, text).map_err(|e| Error::io(&file, e))?;
        debug!("Saved note {}", file.display());
        Ok(())
    }

    /// Last modification time of the backing file
    pub fn modified(&self) -> Result<DateTime<Local>> {
        let file = self.file_path().ok_or(Error::InvalidState(UNBOUND))?;
        let modified = fs::metadata(&file)
            .and_then(|meta| meta.modified())
            .map_err(|e| Error::from_io(&file, e))?;
        Ok(DateTime::<Local>::from(modified))
    }

    /// Date of the note
    ///
    /// Taken from a `YYYY-MM-DD_` file name prefix when present, otherwise
    /// the local date of the last modification.
    pub fn date(&self) -> Result<NaiveDate> {
        let path = self.path.as_ref().ok_or(Error::InvalidState(UNBOUND))?;
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();
        match date_prefix(&file_name) {
            Some(date) => Ok(date),
            None => Ok(self.modified()?.date_naive()),
        }
    }

    pub fn summary(&self) -> Result<NoteSummary> {
        let path = self.path.as_ref().ok_or(Error::InvalidState(UNBOUND))?;
        Ok(NoteSummary {
            path: path.display().to_string(),
            title: self.title()?,
            format: self.format,
            date: self.date()?,
            modified: self.modified()?,
        })
    }

    /// Load whichever of attributes/content is still unloaded.
    fn ensure_loaded(&mut self) -> Result<()> {
        if self.attributes.is_some() && self.content.is_some() {
            return Ok(());
        }
        let document = self.read_document()?;
        self.fill(document);
        Ok(())
    }

    fn fill(&mut self, document: Document) {
        self.attributes.get_or_insert(document.attributes);
        self.content.get_or_insert(document.content);
    }

    fn read_document(&self) -> Result<Document> {
        let Some(file) = self.file_path() else {
            return Ok(Document::default());
        };
        let text = fs::read_to_string(&file).map_err(|e| Error::from_io(&file, e))?;
        debug!("Loaded note {}", file.display());
        Ok(attributes::parse(&text, self.format))
    }

    /// Move the backing file to `new_path`; the note is only updated once
    /// the rename has succeeded.
    fn move_to(&mut self, new_path: PathBuf) -> Result<()> {
        let Some(old_path) = self.path.as_ref() else {
            return Err(Error::InvalidState(UNBOUND));
        };
        if *old_path == new_path {
            return Ok(());
        }

        rename_within(&self.root, old_path, &new_path)?;

        self.format = NoteFormat::from_path(&new_path);
        self.path = Some(new_path);
        Ok(())
    }
}

/// Title, a blank line, then the content
///
/// Content that is not loaded yet is read from disk without being cached;
/// an unreadable file shows as empty.
impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.title().unwrap_or_default();
        match &self.content {
            Some(content) => write!(f, "{}\n\n{}", title, content),
            None => {
                let content = self
                    .read_document()
                    .map(|document| document.content)
                    .unwrap_or_default();
                write!(f, "{}\n\n{}", title, content)
            }
        }
    }
}
