//! Path and file name validation helpers
//!
//! Notes and categories are addressed by paths relative to the workspace
//! root. These helpers normalize such paths and reject anything that would
//! point outside the workspace.

use crate::error::{Error, Result};
use crate::format::NoteFormat;
use chrono::NaiveDate;
use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Characters that are not allowed in a note or category name on at least
/// one mainstream filesystem.
const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Validate and normalize a workspace-relative path
///
/// `.` components are dropped. The result is empty for the workspace root.
///
/// # Errors
/// `InvalidPath` if the path is absolute, contains `..`, or contains a NUL byte.
pub fn normalize_relative(path: &Path) -> Result<PathBuf> {
    let invalid = |reason| Error::InvalidPath {
        path: path.display().to_string(),
        reason,
    };

    if path.to_string_lossy().contains('\0') {
        return Err(invalid("contains a NUL byte"));
    }

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("must not contain '..'")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("must be relative to the workspace"));
            }
        }
    }
    Ok(normalized)
}

/// Like [`normalize_relative`], but the path must name a file.
pub fn normalize_note_path(path: &Path) -> Result<PathBuf> {
    let normalized = normalize_relative(path)?;
    if normalized.as_os_str().is_empty() {
        return Err(Error::InvalidPath {
            path: path.display().to_string(),
            reason: "must name a file",
        });
    }
    Ok(normalized)
}

/// Check that `name` can be used as a single file or directory name.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason| Error::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("is a reserved name"));
    }
    // Dotfiles are skipped by traversal unless hidden entries are included
    if name.starts_with('.') {
        return Err(invalid("would be hidden"));
    }
    if name.contains(RESERVED_CHARS) {
        return Err(invalid("contains a reserved character"));
    }
    if name.chars().any(char::is_control) {
        return Err(invalid("contains a control character"));
    }
    Ok(())
}

/// Whether a directory entry is hidden (dotfile).
pub fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Split a file name into its title and recognized note extension
///
/// The extension is only split off when it is a recognized note
/// extension, so `server.log` keeps its full name as the title.
pub fn split_file_name(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && NoteFormat::recognize(ext).is_some() => {
            (stem, Some(ext))
        }
        _ => (file_name, None),
    }
}

/// Date of a `YYYY-MM-DD_title` file name, if it carries one.
pub fn date_prefix(file_name: &str) -> Option<NaiveDate> {
    let (date, rest) = file_name.split_once('_')?;
    if date.len() != 10 || rest.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Build the dated file name `YYYY-MM-DD_title.ext`
pub fn dated_file_name(date: NaiveDate, title: &str, format: NoteFormat) -> String {
    format!("{}_{}.{}", date.format("%Y-%m-%d"), title, format.extension())
}

/// Rename `from` to `to` (both relative to `root`), refusing to replace an
/// existing entry.
pub(crate) fn rename_within(root: &Path, from: &Path, to: &Path) -> Result<()> {
    let from = root.join(from);
    let to = root.join(to);
    if fs::symlink_metadata(&to).is_ok() {
        return Err(Error::io(
            &to,
            io::Error::new(io::ErrorKind::AlreadyExists, "target already exists"),
        ));
    }
    fs::rename(&from, &to).map_err(|e| Error::from_io(&from, e))?;
    debug!("Renamed {} to {}", from.display(), to.display());
    Ok(())
}

/// Write `text` as the new file `to`, then remove `from` (both relative to
/// `root`). An existing `to` is never replaced, and `from` is only gone once
/// `to` is complete.
pub(crate) fn rewrite_within(root: &Path, from: &Path, to: &Path, text: &str) -> Result<()> {
    let from = root.join(from);
    let to = root.join(to);
    let discard = |to: &Path| {
        if let Err(e) = fs::remove_file(to) {
            warn!("Could not remove {}: {}", to.display(), e);
        }
    };

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&to)
        .map_err(|e| Error::io(&to, e))?;
    if let Err(e) = file.write_all(text.as_bytes()).and_then(|()| file.sync_all()) {
        drop(file);
        discard(&to);
        return Err(Error::io(&to, e));
    }
    drop(file);

    if let Err(e) = fs::remove_file(&from) {
        discard(&to);
        return Err(Error::from_io(&from, e));
    }
    debug!("Rewrote {} as {}", from.display(), to.display());
    Ok(())
}
