//! Repository discovery

use crate::diagnostics::{HookError, HookResult};
use std::path::{Path, PathBuf};

/// Walk up from `start` to the first directory containing a `.git` directory.
///
/// Worktrees and submodules, where `.git` is a file, are not recognized.
pub fn find_repo_root(start: &Path) -> HookResult<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").is_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| HookError::NotARepository {
            path: start.to_path_buf(),
        })
}

/// `<root>/.git/hooks`
pub fn hooks_dir(repo_root: &Path) -> PathBuf {
    repo_root.join(".git").join("hooks")
}
