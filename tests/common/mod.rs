//! Common test utilities for integration tests

#![allow(dead_code)]

use notein::Note;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a workspace directory populated with `(relative path, text)` files
pub fn create_workspace(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, text) in files {
        write_file(temp_dir.path(), path, text);
    }
    temp_dir
}

/// Write a file below `root`, creating its parent directories
pub fn write_file(root: &Path, path: &str, text: &str) {
    let file = root.join(path);
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, text).unwrap();
}

/// Relative paths of a list of notes, in order
pub fn note_paths(notes: &[Note]) -> Vec<PathBuf> {
    notes
        .iter()
        .map(|note| note.path().unwrap().to_path_buf())
        .collect()
}
