//! NoteIn - Main Entry Point
//!
//! Lists the notes of a workspace. The actual implementation is in the
//! `notein` library.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use notein::formatting::{
    apply_format_filter, apply_title_filter, format_notes, format_notes_toml, format_warnings,
};
use notein::{NoteFormat, Workspace, WorkspaceConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// NoteIn - the hacker's notes manager
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the workspace directory
    workspace: PathBuf,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Include hidden files and directories
    #[arg(long)]
    all: bool,

    /// Only list notes of this format (plain, html, markdown)
    #[arg(long)]
    format: Option<NoteFormat>,

    /// Only list notes whose title contains this text
    #[arg(long)]
    title: Option<String>,

    /// Print attributes and content of each note
    #[arg(long)]
    content: bool,

    /// Print note summaries as TOML
    #[arg(long, conflicts_with = "content")]
    toml: bool,
}

fn init_logger() {
    let filter = EnvFilter::try_from_env("NOTEIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();
    init_logger();

    let mut config = match &args.config {
        Some(path) => WorkspaceConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => WorkspaceConfig::default(),
    };
    if args.all {
        config.include_hidden = true;
    }

    let workspace = Workspace::with_config(&args.workspace, config);
    let scan = workspace
        .scan()
        .with_context(|| format!("Failed to open workspace {}", args.workspace.display()))?;
    eprint!("{}", format_warnings(&scan.warnings));

    let mut notes = scan.notes;
    if let Some(format) = args.format {
        apply_format_filter(&mut notes, format);
    }
    if let Some(keyword) = &args.title {
        apply_title_filter(&mut notes, keyword);
    }

    if args.toml {
        print!("{}", format_notes_toml(&notes)?);
    } else {
        println!("{}", format_notes(&mut notes, args.content)?);
    }
    Ok(())
}
