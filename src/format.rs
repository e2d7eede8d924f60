use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Content encoding of a note
///
/// The format is never stored anywhere: it is derived from the file
/// extension. Unknown or missing extensions mean `Plain`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteFormat {
    /// Plain text (`.txt`)
    #[default]
    Plain,
    /// HTML document (`.html`, `.htm`)
    Html,
    /// Markdown document (`.md`, `.markdown`)
    Markdown,
}

/// Every extension recognized as a note extension, with its format.
/// The first entry for each format is the canonical one.
const EXTENSIONS: &[(&str, NoteFormat)] = &[
    ("txt", NoteFormat::Plain),
    ("html", NoteFormat::Html),
    ("htm", NoteFormat::Html),
    ("md", NoteFormat::Markdown),
    ("markdown", NoteFormat::Markdown),
];

impl NoteFormat {
    /// All formats, in declaration order
    pub const ALL: [NoteFormat; 3] = [NoteFormat::Plain, NoteFormat::Html, NoteFormat::Markdown];

    /// Canonical file extension for this format, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            NoteFormat::Plain => "txt",
            NoteFormat::Html => "html",
            NoteFormat::Markdown => "md",
        }
    }

    /// Format for a file extension (with or without the leading dot).
    ///
    /// Matching is case-insensitive and never fails: anything unrecognized
    /// is `Plain`.
    pub fn from_extension(ext: &str) -> Self {
        Self::recognize(ext).unwrap_or_default()
    }

    /// Format for a path, judged by its extension.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }

    /// Format for an extension only if it is one of the recognized note
    /// extensions.
    pub(crate) fn recognize(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        EXTENSIONS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map(|(_, format)| *format)
    }
}

impl fmt::Display for NoteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NoteFormat::Plain => "plain",
            NoteFormat::Html => "html",
            NoteFormat::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

impl FromStr for NoteFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(NoteFormat::Plain),
            "html" => Ok(NoteFormat::Html),
            "markdown" => Ok(NoteFormat::Markdown),
            _ => Err(format!(
                "Invalid format '{}'. Valid options are: plain, html, markdown",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_round_trips_through_from_extension() {
        for format in NoteFormat::ALL {
            assert_eq!(NoteFormat::from_extension(format.extension()), format);
        }
    }

    #[test]
    fn test_from_extension_aliases() {
        assert_eq!(NoteFormat::from_extension("htm"), NoteFormat::Html);
        assert_eq!(NoteFormat::from_extension("markdown"), NoteFormat::Markdown);
        assert_eq!(NoteFormat::from_extension(".md"), NoteFormat::Markdown);
        assert_eq!(NoteFormat::from_extension("MD"), NoteFormat::Markdown);
        assert_eq!(NoteFormat::from_extension("Html"), NoteFormat::Html);
    }

    #[test]
    fn test_unknown_extension_is_plain() {
        assert_eq!(NoteFormat::from_extension("log"), NoteFormat::Plain);
        assert_eq!(NoteFormat::from_extension(""), NoteFormat::Plain);
        assert_eq!(NoteFormat::recognize("log"), None);
        assert_eq!(NoteFormat::recognize("txt"), Some(NoteFormat::Plain));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(NoteFormat::from_path(Path::new("a/b.md")), NoteFormat::Markdown);
        assert_eq!(NoteFormat::from_path(Path::new("page.htm")), NoteFormat::Html);
        assert_eq!(NoteFormat::from_path(Path::new("README")), NoteFormat::Plain);
        assert_eq!(NoteFormat::from_path(Path::new("notes.tar.gz")), NoteFormat::Plain);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("markdown".parse::<NoteFormat>().unwrap(), NoteFormat::Markdown);
        assert_eq!("HTML".parse::<NoteFormat>().unwrap(), NoteFormat::Html);
        assert!("rtf".parse::<NoteFormat>().is_err());
        assert_eq!(NoteFormat::Plain.to_string(), "plain");
    }
}
