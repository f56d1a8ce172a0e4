use std::path::Path;

use rivet::{ObjectHash, Repository};

/// Initialize a fresh repository in `dir`.
pub fn init_repo(dir: &Path) -> Repository {
    Repository::init(dir).unwrap()
}

/// Write a file under the repository root, creating parent directories.
#[allow(dead_code)]
pub fn write_file(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// Write a file and stage it, returning the staged blob hash.
#[allow(dead_code)]
pub fn stage_file(repo: &Repository, rel: &str, contents: &[u8]) -> ObjectHash {
    write_file(repo.root(), rel, contents);
    let store = repo.objects();
    let mut index = repo.index().unwrap();
    index.add(repo.root().join(rel), &store).unwrap();
    *index.entries().get(rel).unwrap()
}
