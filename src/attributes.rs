//! Attribute block parsing and rendering
//!
//! A note file may start with a fenced block of metadata lines:
//!
//! ```text
//! ---
//! tags: work, ideas
//! author: someone
//! ---
//! The body of the note.
//! ```
//!
//! Plain and Markdown notes use `---` fences. HTML notes use a comment
//! (`<!--` / `-->` on their own lines) so the file remains valid HTML.
//! Each non-blank line inside the fences is one attribute, kept verbatim.

use crate::error::{Error, Result};
use crate::format::NoteFormat;

/// A note file split into its attribute lines and content body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub attributes: Vec<String>,
    pub content: String,
}

/// Opening and closing fence lines for a format.
fn fences(format: NoteFormat) -> (&'static str, &'static str) {
    match format {
        NoteFormat::Plain | NoteFormat::Markdown => ("---", "---"),
        NoteFormat::Html => ("<!--", "-->"),
    }
}

/// Split off the first line of `text`, returning it (without line break)
/// and the remainder.
fn first_line(text: &str) -> (&str, Option<&str>) {
    match text.find('\n') {
        Some(i) => (trim_cr(&text[..i]), Some(&text[i + 1..])),
        None => (trim_cr(text), None),
    }
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse a note file
///
/// Files without an opening fence on their first line, or whose block is
/// never closed, have no attributes and their whole text is content.
pub fn parse(text: &str, format: NoteFormat) -> Document {
    let (open, close) = fences(format);
    let whole = || Document {
        attributes: Vec::new(),
        content: text.to_string(),
    };

    let (first, rest) = first_line(text);
    let Some(mut rest) = rest.filter(|_| first == open) else {
        return whole();
    };

    let mut attributes = Vec::new();
    loop {
        let (line, next) = first_line(rest);
        if line == close {
            return Document {
                attributes,
                content: next.unwrap_or("").to_string(),
            };
        }
        if !line.trim().is_empty() {
            attributes.push(line.to_string());
        }
        match next {
            Some(next) => rest = next,
            // Unterminated block
            None => return whole(),
        }
    }
}

/// Check that every attribute survives a render/parse cycle in `format`
///
/// Blank lines are dropped by the parser and a fence line would end (or
/// reopen) the block early, so both are rejected before anything is written.
pub fn validate(attributes: &[String], format: NoteFormat) -> Result<()> {
    let (open, close) = fences(format);
    for attribute in attributes {
        let invalid = |reason| Error::InvalidAttribute {
            attribute: attribute.clone(),
            reason,
        };
        let line = flatten(attribute);
        if line.trim().is_empty() {
            return Err(invalid("must not be blank"));
        }
        if line == open || line == close {
            return Err(invalid("is an attribute block fence"));
        }
    }
    Ok(())
}

fn flatten(attribute: &str) -> String {
    attribute.replace(['\r', '\n'], " ")
}

/// Render attributes and content back into file text
///
/// No block is written when there are no attributes, unless the content
/// itself starts with the opening fence (an empty block then keeps the
/// content from being read back as attributes).
pub fn render(attributes: &[String], content: &str, format: NoteFormat) -> String {
    let (open, close) = fences(format);
    if attributes.is_empty() && first_line(content).0 != open {
        return content.to_string();
    }

    let mut text = String::with_capacity(content.len() + 64);
    text.push_str(open);
    text.push('\n');
    for attribute in attributes {
        text.push_str(&flatten(attribute));
        text.push('\n');
    }
    text.push_str(close);
    text.push('\n');
    text.push_str(content);
    text
}
