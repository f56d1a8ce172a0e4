mod common;

use rivet::{create_commit, diff_working_vs_index, head_snapshot, status};

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

#[test]
fn fresh_repository_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    let report = status(&repo).unwrap();
    assert!(report.is_clean());
}

#[test]
fn newly_staged_file_is_reported_staged() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    common::stage_file(&repo, "new.txt", b"fresh");
    let report = status(&repo).unwrap();

    assert_eq!(report.staged, vec!["new.txt"]);
    assert!(report.modified.is_empty());
}

#[test]
fn staged_file_matching_head_is_not_reported() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    common::stage_file(&repo, "same.txt", b"unchanged");
    create_commit(&repo, "snapshot").unwrap();

    // Re-stage the identical content: nothing effectively staged.
    common::stage_file(&repo, "same.txt", b"unchanged");
    let report = status(&repo).unwrap();
    assert!(report.staged.is_empty());
}

#[test]
fn modified_working_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    common::stage_file(&repo, "file.txt", b"hello");
    create_commit(&repo, "initial").unwrap();

    common::stage_file(&repo, "file.txt", b"hello");
    common::write_file(repo.root(), "file.txt", b"hello world");

    let report = status(&repo).unwrap();
    assert_eq!(report.modified, vec!["file.txt"]);
}

#[test]
fn untracked_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    common::stage_file(&repo, "tracked.txt", b"t");
    common::write_file(repo.root(), "loose.txt", b"l");
    common::write_file(repo.root(), "dir/inner.txt", b"i");

    let report = status(&repo).unwrap();
    assert_eq!(report.untracked, vec!["dir/inner.txt", "loose.txt"]);
}

#[test]
fn metadata_directory_is_never_untracked() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    let report = status(&repo).unwrap();
    assert!(report.untracked.is_empty());
}

// ---------------------------------------------------------------------------
// head_snapshot
// ---------------------------------------------------------------------------

#[test]
fn head_snapshot_flattens_nested_trees() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    let a = common::stage_file(&repo, "a.txt", b"a");
    let b = common::stage_file(&repo, "dir/b.txt", b"b");
    create_commit(&repo, "snapshot").unwrap();

    let snapshot = head_snapshot(&repo).unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.get("a.txt"), Some(&a));
    assert_eq!(snapshot.get("dir/b.txt"), Some(&b));
}

#[test]
fn head_snapshot_empty_before_first_commit() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    assert!(head_snapshot(&repo).unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// diff
// ---------------------------------------------------------------------------

#[test]
fn unchanged_staged_file_produces_no_diff() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    common::stage_file(&repo, "file.txt", b"stable\n");
    assert!(diff_working_vs_index(&repo).unwrap().is_empty());
}

#[test]
fn changed_working_file_produces_a_patch() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    common::stage_file(&repo, "file.txt", b"old line\n");
    common::write_file(repo.root(), "file.txt", b"new line\n");

    let diffs = diff_working_vs_index(&repo).unwrap();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, "file.txt");
    assert!(diffs[0].patch.contains("-old line"));
    assert!(diffs[0].patch.contains("+new line"));
}

#[test]
fn deleted_working_file_diffs_against_empty() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    common::stage_file(&repo, "gone.txt", b"was here\n");
    std::fs::remove_file(repo.root().join("gone.txt")).unwrap();

    let diffs = diff_working_vs_index(&repo).unwrap();
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].patch.contains("-was here"));
}
