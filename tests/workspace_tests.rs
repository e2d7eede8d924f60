//! Workspace traversal tests
mod common;

use common::*;
use notein::*;
use std::collections::HashSet;
use std::path::PathBuf;

// 空のワークスペースは空のリストを返す
#[test]
fn test_empty_workspace() {
    let ws = create_workspace(&[]);
    let workspace = Workspace::new(ws.path());
    assert!(workspace.notes_list().unwrap().is_empty());
}

// ルートのノートはサブカテゴリより先に並ぶ
#[test]
fn test_depth_first_order() {
    let ws = create_workspace(&[("a.md", "alpha"), ("sub/b.txt", "beta")]);
    let notes = Workspace::new(ws.path()).notes_list().unwrap();

    assert_eq!(
        note_paths(&notes),
        [PathBuf::from("a.md"), PathBuf::from("sub/b.txt")]
    );
    assert_eq!(notes[0].format(), NoteFormat::Markdown);
    assert_eq!(notes[1].format(), NoteFormat::Plain);
}

#[test]
fn test_nested_workspace_counts_every_note_once() {
    let files = [
        ("inbox.md", ""),
        ("work/plan.md", ""),
        ("work/raw.log", ""),
        ("work/2024/q1/report.html", ""),
        ("work/2024/q2/report.htm", ""),
        ("home/recipes/soup.markdown", ""),
        ("home/README", ""),
    ];
    let ws = create_workspace(&files);
    let notes = Workspace::new(ws.path()).notes_list().unwrap();

    assert_eq!(notes.len(), files.len());
    let unique: HashSet<PathBuf> = note_paths(&notes).into_iter().collect();
    assert_eq!(unique.len(), files.len());
}

// 各カテゴリのノートは、そのサブカテゴリのノートより先に来る
#[test]
fn test_category_notes_precede_descendants() {
    let ws = create_workspace(&[
        ("x/one.md", ""),
        ("x/deep/two.md", ""),
        ("y/three.md", ""),
        ("y/deep/four.md", ""),
    ]);
    let paths = note_paths(&Workspace::new(ws.path()).notes_list().unwrap());
    let position = |p: &str| paths.iter().position(|q| q == &PathBuf::from(p)).unwrap();

    assert!(position("x/one.md") < position("x/deep/two.md"));
    assert!(position("y/three.md") < position("y/deep/four.md"));
}

#[test]
fn test_missing_workspace() {
    let ws = create_workspace(&[]);
    let workspace = Workspace::new(ws.path().join("gone"));
    assert!(matches!(workspace.notes_list(), Err(Error::PathNotFound(_))));
    assert!(matches!(workspace.scan(), Err(Error::PathNotFound(_))));
}

#[test]
fn test_title_matches_last_segment() {
    let ws = create_workspace(&[
        ("Shopping.md", ""),
        ("dir/Meeting notes.txt", ""),
        ("dir/page.htm", ""),
        ("dir/server.log", ""),
    ]);
    for note in Workspace::new(ws.path()).notes_list().unwrap() {
        let file_name = note
            .path()
            .unwrap()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        let title = note.title().unwrap();
        assert!(file_name.starts_with(&title));
        match note.format() {
            NoteFormat::Plain if file_name.ends_with(".log") => assert_eq!(title, file_name),
            _ => assert_eq!(file_name[title.len()..].chars().next(), Some('.')),
        }
    }
}

#[test]
fn test_workspace_category_and_note_helpers() {
    let ws = create_workspace(&[("journal/today.md", "dear diary")]);
    let workspace = Workspace::new(ws.path());

    let journal = workspace.category("journal").unwrap();
    assert_eq!(journal.title(), "journal");
    assert_eq!(journal.notes().unwrap().len(), 1);

    let mut note = workspace.note("journal/today.md").unwrap();
    assert_eq!(note.content().unwrap(), "dear diary");

    assert!(matches!(workspace.note("/abs.md"), Err(Error::InvalidPath { .. })));
    assert!(workspace.root_category().is_root());
}

#[test]
fn test_root_title_of_parent_relative_base() {
    let ws = create_workspace(&[("inner/n.md", "")]);
    let expected = ws.path().file_name().unwrap().to_string_lossy().into_owned();
    let workspace = Workspace::new(ws.path().join("inner").join(".."));
    assert_eq!(workspace.root_category().title(), expected);
    assert_eq!(workspace.notes_list().unwrap().len(), 1);
}

#[test]
fn test_config_sorting_and_hidden() {
    let ws = create_workspace(&[
        ("b.md", ""),
        ("a.md", ""),
        (".hidden.md", ""),
        ("c/d.md", ""),
    ]);
    let config = WorkspaceConfig {
        include_hidden: true,
        sort_entries: true,
        ..WorkspaceConfig::default()
    };
    let notes = Workspace::with_config(ws.path(), config).notes_list().unwrap();
    assert_eq!(
        note_paths(&notes),
        [
            PathBuf::from(".hidden.md"),
            PathBuf::from("a.md"),
            PathBuf::from("b.md"),
            PathBuf::from("c/d.md"),
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_does_not_loop() {
    use std::os::unix::fs::symlink;

    let ws = create_workspace(&[("top.md", ""), ("loop/inner.md", "")]);
    symlink(ws.path(), ws.path().join("loop/root")).unwrap();

    let workspace = Workspace::new(ws.path());
    let scan = workspace.scan().unwrap();
    assert_eq!(scan.notes.len(), 2);
    assert_eq!(
        scan.warnings,
        [Warning::CycleDetected {
            path: PathBuf::from("loop/root"),
            target: ws.path().canonicalize().unwrap(),
        }]
    );
    assert_eq!(workspace.notes_list().unwrap().len(), 2);
}
