//! NoteIn Library
//!
//! A filesystem-backed notes store. A workspace is any directory: its
//! sub-directories are categories and every file inside is a note. Nothing
//! is cached between calls; the directory tree is the model.
//!
//! # Architecture
//!
//! - **Workspace**: `workspace` module - root folder, depth-first flattening of all notes
//! - **Category**: `category` module - a folder, listing its sub-folders and files on demand
//! - **Note**: `note` module - a file with lazily loaded attributes and content
//! - **NoteFormat**: `format` module - plain text, HTML or Markdown, derived from the extension
//!
//! # Example
//!
//! ```no_run
//! use notein::{NoteFormat, Workspace};
//!
//! fn main() -> notein::Result<()> {
//!     let workspace = Workspace::new("notes");
//!     for mut note in workspace.notes_list()? {
//!         println!("{} ({})", note.title()?, note.format());
//!         if note.format() == NoteFormat::Plain {
//!             note.change_format(NoteFormat::Markdown)?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod attributes;
pub mod category;
pub mod config;
pub mod error;
pub mod format;
pub mod formatting;
pub mod note;
pub mod paths;
pub mod workspace;

// Re-export commonly used types
pub use category::Category;
pub use config::WorkspaceConfig;
pub use error::{Error, Result, Warning};
pub use format::NoteFormat;
pub use note::{Note, NoteSummary};
pub use workspace::{Scan, Workspace};
