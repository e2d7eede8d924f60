//! Filtering and formatting helpers for note listings
//!
//! Used by the `notein` binary to print a workspace.

use crate::error::Warning;
use crate::format::NoteFormat;
use crate::note::{Note, NoteSummary};
use anyhow::{Context, Result};
use serde::Serialize;

/// Keep only notes of the given format
pub fn apply_format_filter(notes: &mut Vec<Note>, format: NoteFormat) {
    notes.retain(|note| note.format() == format);
}

/// Keep only notes whose title contains `keyword` (case-insensitive)
pub fn apply_title_filter(notes: &mut Vec<Note>, keyword: &str) {
    let keyword_lower = keyword.to_lowercase();
    notes.retain(|note| {
        note.title()
            .map(|title| title.to_lowercase().contains(&keyword_lower))
            .unwrap_or(false)
    });
}

/// Format notes as a human-readable list
///
/// With `with_content`, each note is followed by its attributes and body,
/// which are loaded from disk as needed.
pub fn format_notes(notes: &mut [Note], with_content: bool) -> Result<String> {
    if notes.is_empty() {
        return Ok("No notes found".to_string());
    }

    let mut result = format!("Found {} note(s):\n\n", notes.len());
    for note in notes.iter_mut() {
        let path = note
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        result.push_str(&format!(
            "- [{}] {} (format: {})\n",
            path,
            note.title()?,
            note.format()
        ));

        if with_content {
            for attribute in note
                .attributes()
                .with_context(|| format!("Failed to read {}", path))?
            {
                result.push_str(&format!("  @ {}\n", attribute));
            }
            for line in note.content()?.lines() {
                result.push_str(&format!("  | {}\n", line));
            }
        }
    }

    Ok(result)
}

#[derive(Serialize)]
struct Listing {
    notes: Vec<NoteSummary>,
}

/// Format note summaries as a TOML document (`[[notes]]` tables)
pub fn format_notes_toml(notes: &[Note]) -> Result<String> {
    let notes = notes
        .iter()
        .map(Note::summary)
        .collect::<crate::Result<Vec<_>>>()?;
    toml::to_string_pretty(&Listing { notes }).context("Failed to serialize note listing")
}

pub fn format_warnings(warnings: &[Warning]) -> String {
    warnings
        .iter()
        .map(|warning| format!("Warning: {}\n", warning))
        .collect()
}
