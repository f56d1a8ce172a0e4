use crate::error::{Error, Result};

/// Normalize a repository-relative path: strip leading/trailing slashes,
/// collapse repeated slashes and `.` segments, reject `..`.
///
/// Staged paths and tree entry names are always stored in this form, so a
/// path compares equal regardless of how the caller spelled it.
///
/// # Errors
/// Returns [`Error::InvalidPath`] for `..` segments or a path that
/// collapses to nothing.
pub fn normalize_path(path: &str) -> Result<String> {
    let mut segments: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        if seg.is_empty() || seg == "." {
            continue;
        }
        if seg == ".." {
            return Err(Error::invalid_path(format!(
                "path segment '..' is not allowed: {}",
                path,
            )));
        }
        segments.push(seg);
    }

    if segments.is_empty() {
        return Err(Error::invalid_path("path must not be empty"));
    }

    Ok(segments.join("/"))
}

/// Validate a branch name.
///
/// Branch refs are stored as flat files under `refs/heads/`, so names must
/// be single non-empty path segments without separator or control
/// characters, must not be `.`/`..`, and must not end in `.lock`.
///
/// # Errors
/// Returns [`Error::Ref`] if the name violates any rule.
pub fn validate_branch_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::ref_error("branch name must not be empty"));
    }

    if name == "." || name == ".." {
        return Err(Error::ref_error(format!(
            "branch name '{}' is not allowed",
            name,
        )));
    }

    for ch in name.chars() {
        if ch.is_control() {
            return Err(Error::ref_error("branch name contains a control character"));
        }
        match ch {
            '/' | '\\' | ':' | ' ' | '\t' | '~' | '^' | '?' | '*' | '[' => {
                return Err(Error::ref_error(format!(
                    "branch name contains invalid character: {:?}",
                    ch,
                )));
            }
            _ => {}
        }
    }

    if name.ends_with(".lock") {
        return Err(Error::ref_error("branch name must not end with '.lock'"));
    }

    Ok(())
}
