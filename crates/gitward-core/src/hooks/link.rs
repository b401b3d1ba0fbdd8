//! Resolve-and-verify step for hook symlinks.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What currently sits at a hook path, compared against the expected source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing at the path
    Missing,
    /// A symlink whose target is exactly the expected source
    Linked,
    /// Something else occupies the path.
    ///
    /// `target` is the link target for a symlink pointing elsewhere, or `None`
    /// when the entry is not a symlink at all (e.g. a hand-written hook file).
    Stale { target: Option<PathBuf> },
}

impl LinkState {
    /// True when any filesystem entry (even a dangling link) is at the path
    pub fn is_present(&self) -> bool {
        !matches!(self, LinkState::Missing)
    }
}

/// Inspect `link` without following it and compare it with `expected`.
///
/// The comparison is on the raw link target, so a relative link to the same
/// script counts as stale and gets rewritten with the absolute path.
pub fn inspect_link(link: &Path, expected: &Path) -> io::Result<LinkState> {
    let meta = match fs::symlink_metadata(link) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LinkState::Missing),
        Err(e) => return Err(e),
    };

    if !meta.file_type().is_symlink() {
        return Ok(LinkState::Stale { target: None });
    }

    let target = fs::read_link(link)?;
    if target == expected {
        Ok(LinkState::Linked)
    } else {
        Ok(LinkState::Stale {
            target: Some(target),
        })
    }
}

/// Read the raw target of `link` if it is a symlink.
pub fn link_target(link: &Path) -> io::Result<Option<PathBuf>> {
    match fs::symlink_metadata(link) {
        Ok(meta) if meta.file_type().is_symlink() => fs::read_link(link).map(Some),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
pub(crate) fn create_link(source: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, link)
}

#[cfg(windows)]
pub(crate) fn create_link(source: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(source, link)
}

/// Remove whatever non-directory entry sits at `link`.
pub(crate) fn remove_entry(link: &Path) -> io::Result<()> {
    fs::remove_file(link)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry() {
        let temp = tempfile::TempDir::new().unwrap();
        let state = inspect_link(&temp.path().join("pre-commit"), Path::new("/x")).unwrap();
        assert_eq!(state, LinkState::Missing);
        assert!(!state.is_present());
    }

    #[test]
    fn test_linked_and_stale() {
        let temp = tempfile::TempDir::new().unwrap();
        let source = temp.path().join("source");
        let other = temp.path().join("other");
        fs::write(&source, "#!/bin/sh\n").unwrap();
        fs::write(&other, "#!/bin/sh\n").unwrap();

        let link = temp.path().join("commit-msg");
        create_link(&source, &link).unwrap();
        assert_eq!(inspect_link(&link, &source).unwrap(), LinkState::Linked);
        assert_eq!(
            inspect_link(&link, &other).unwrap(),
            LinkState::Stale {
                target: Some(source.clone())
            }
        );
        assert_eq!(link_target(&link).unwrap(), Some(source));
    }

    #[test]
    fn test_regular_file_is_stale_without_target() {
        let temp = tempfile::TempDir::new().unwrap();
        let hook = temp.path().join("pre-commit");
        fs::write(&hook, "#!/bin/sh\nexit 0\n").unwrap();

        let state = inspect_link(&hook, Path::new("/does/not/matter")).unwrap();
        assert_eq!(state, LinkState::Stale { target: None });
        assert_eq!(link_target(&hook).unwrap(), None);
    }

    #[test]
    fn test_dangling_link_is_present() {
        let temp = tempfile::TempDir::new().unwrap();
        let link = temp.path().join("pre-commit");
        create_link(&temp.path().join("gone"), &link).unwrap();

        let state = inspect_link(&link, &temp.path().join("source")).unwrap();
        assert!(state.is_present());
        remove_entry(&link).unwrap();
        assert_eq!(
            inspect_link(&link, &temp.path().join("source")).unwrap(),
            LinkState::Missing
        );
    }
}
