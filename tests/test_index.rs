mod common;

use rivet::Error;

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

#[test]
fn add_stages_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());
    let store = repo.objects();

    common::write_file(repo.root(), "file.txt", b"hello");
    let mut index = repo.index().unwrap();
    index.add(repo.root().join("file.txt"), &store).unwrap();

    let hash = *index.entries().get("file.txt").unwrap();
    assert_eq!(store.load(hash).unwrap(), b"hello");
}

#[test]
fn add_uses_slash_delimited_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());
    let store = repo.objects();

    common::write_file(repo.root(), "src/deep/mod.rs", b"pub fn f() {}");
    let mut index = repo.index().unwrap();
    index.add(repo.root().join("src/deep/mod.rs"), &store).unwrap();

    assert!(index.entries().contains_key("src/deep/mod.rs"));
}

#[test]
fn add_missing_file_is_staging_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());
    let store = repo.objects();

    let mut index = repo.index().unwrap();
    assert!(matches!(
        index.add(repo.root().join("nope.txt"), &store),
        Err(Error::Staging(_))
    ));
}

#[test]
fn add_directory_is_staging_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());
    let store = repo.objects();

    std::fs::create_dir(repo.root().join("subdir")).unwrap();
    let mut index = repo.index().unwrap();
    assert!(matches!(
        index.add(repo.root().join("subdir"), &store),
        Err(Error::Staging(_))
    ));
}

#[test]
fn add_outside_repository_is_staging_error() {
    let dir = tempfile::tempdir().unwrap();
    let outside = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());
    let store = repo.objects();

    let stray = outside.path().join("stray.txt");
    std::fs::write(&stray, b"outside").unwrap();

    let mut index = repo.index().unwrap();
    assert!(matches!(
        index.add(&stray, &store),
        Err(Error::Staging(_))
    ));
}

#[test]
fn restaging_a_path_replaces_its_hash() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    let first = common::stage_file(&repo, "f.txt", b"one");
    let second = common::stage_file(&repo, "f.txt", b"two");
    assert_ne!(first, second);

    let index = repo.index().unwrap();
    assert_eq!(index.entries().len(), 1);
    assert_eq!(*index.entries().get("f.txt").unwrap(), second);
}

// ---------------------------------------------------------------------------
// remove / clear
// ---------------------------------------------------------------------------

#[test]
fn remove_unstages_a_path() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    common::stage_file(&repo, "f.txt", b"data");
    let mut index = repo.index().unwrap();
    index.remove("f.txt").unwrap();
    assert!(index.is_empty());

    // Persisted: a fresh load agrees.
    assert!(repo.index().unwrap().is_empty());
}

#[test]
fn remove_of_unstaged_path_is_staging_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    let mut index = repo.index().unwrap();
    assert!(matches!(
        index.remove("never-staged.txt"),
        Err(Error::Staging(_))
    ));
}

#[test]
fn clear_empties_the_index() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    common::stage_file(&repo, "a.txt", b"a");
    common::stage_file(&repo, "b.txt", b"b");

    let mut index = repo.index().unwrap();
    index.clear().unwrap();
    assert!(repo.index().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn entries_survive_a_reload() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    let hash = common::stage_file(&repo, "persisted.txt", b"here");

    let reloaded = repo.index().unwrap();
    assert_eq!(*reloaded.entries().get("persisted.txt").unwrap(), hash);
}

#[test]
fn missing_or_empty_index_file_means_nothing_staged() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    // init seeds an empty file.
    assert!(repo.index().unwrap().is_empty());

    // A deleted index file behaves the same.
    std::fs::remove_file(repo.index_file()).unwrap();
    assert!(repo.index().unwrap().is_empty());
}

#[test]
fn staging_identical_content_under_two_paths_dedupes_the_blob() {
    let dir = tempfile::tempdir().unwrap();
    let repo = common::init_repo(dir.path());

    let a = common::stage_file(&repo, "a.txt", b"same");
    let b = common::stage_file(&repo, "b.txt", b"same");
    assert_eq!(a, b);
}
