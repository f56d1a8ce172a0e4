mod common;

use rivet::{Error, Repository};

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_metadata_layout() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    assert!(repo.meta_dir().is_dir());
    assert!(repo.objects_dir().is_dir());
    assert!(repo.heads_dir().is_dir());
    assert!(repo.head_file().is_file());
    assert!(repo.index_file().is_file());

    assert_eq!(
        std::fs::read_to_string(repo.head_file()).unwrap(),
        "refs/heads/main"
    );
    // The default branch exists but has no commits.
    assert_eq!(
        std::fs::read_to_string(repo.heads_dir().join("main")).unwrap(),
        ""
    );
}

#[test]
fn init_twice_is_repository_error() {
    let dir = tempfile::tempdir().unwrap();
    common::init_repo(dir.path());

    assert!(matches!(
        Repository::init(dir.path()),
        Err(Error::Repository(_))
    ));
}

#[test]
fn fresh_repository_has_no_head_commit() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    assert_eq!(repo.current_branch().unwrap(), "main");
    assert!(repo.head_commit().unwrap().is_none());
}

// ---------------------------------------------------------------------------
// find
// ---------------------------------------------------------------------------

#[test]
fn find_locates_repository_from_subdirectory() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    let nested = repo.root().join("a/b/c");
    std::fs::create_dir_all(&nested).unwrap();

    let found = Repository::find(&nested).unwrap();
    assert_eq!(
        found.root().canonicalize().unwrap(),
        repo.root().canonicalize().unwrap()
    );
}

#[test]
fn find_outside_any_repository_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Repository::find(dir.path()),
        Err(Error::Repository(_))
    ));
}

// ---------------------------------------------------------------------------
// HEAD resolution
// ---------------------------------------------------------------------------

#[test]
fn detached_head_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    common::stage_file(&repo, "f.txt", b"x");
    let hash = rivet::create_commit(&repo, "c").unwrap();

    // A bare commit hash in HEAD is explicitly unsupported.
    std::fs::write(repo.head_file(), hash.to_hex()).unwrap();
    assert!(matches!(
        repo.current_branch(),
        Err(Error::Repository(_))
    ));
    assert!(repo.head_commit().is_err());
}

#[test]
fn missing_head_file_is_repository_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    std::fs::remove_file(repo.head_file()).unwrap();
    assert!(matches!(
        repo.current_branch(),
        Err(Error::Repository(_))
    ));
}

#[test]
fn head_commit_none_when_ref_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    std::fs::remove_file(repo.heads_dir().join("main")).unwrap();
    assert!(repo.head_commit().unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Locking
// ---------------------------------------------------------------------------

#[test]
fn lock_can_be_acquired_and_released() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    let guard = repo.lock().unwrap();
    drop(guard);
    // Released on drop, so it can be taken again.
    let _again = repo.lock().unwrap();
}
