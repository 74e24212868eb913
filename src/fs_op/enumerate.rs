//! One-level directory listing split into files and subdirectories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::fs_op::error::{FsOpError, Result};

/// How a directory child was classified at listing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A child of a listed directory.
///
/// Links are never followed: a symlink is always a `File` entry with
/// `is_symlink` set, whatever it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub is_symlink: bool,
}

/// Immediate children of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub files: Vec<DirEntry>,
    pub dirs: Vec<DirEntry>,
}

/// Read the immediate entries of `dir` once.
///
/// Entries come back sorted by file name. Fails with `NotFound` when `dir`
/// is missing and `Unreadable` when it cannot be listed (including when it
/// is not a directory).
pub fn list_dir(dir: &Path) -> Result<Listing> {
    match fs::metadata(dir) {
        Ok(md) if md.is_dir() => {}
        Ok(_) => {
            return Err(FsOpError::unreadable(
                dir,
                io::Error::from(nix::errno::Errno::ENOTDIR),
            ))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FsOpError::NotFound {
                path: dir.to_path_buf(),
            })
        }
        Err(e) => return Err(FsOpError::unreadable(dir, e)),
    }

    let mut listing = Listing::default();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("directory listing failed"));
            FsOpError::Unreadable { path, source }
        })?;

        let ft = entry.file_type();
        let kind = if ft.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        tracing::trace!(path = %entry.path().display(), ?kind, "listed");

        let child = DirEntry {
            path: entry.into_path(),
            kind,
            is_symlink: ft.is_symlink(),
        };
        match kind {
            EntryKind::Directory => listing.dirs.push(child),
            EntryKind::File => listing.files.push(child),
        }
    }

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(entries: &[DirEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn splits_files_and_dirs_one_level_only() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("b.txt"), b"b").unwrap();
        fs::write(td.path().join("a.txt"), b"a").unwrap();
        fs::create_dir_all(td.path().join("sub/deeper")).unwrap();
        fs::write(td.path().join("sub/inner.txt"), b"x").unwrap();

        let l = list_dir(td.path()).unwrap();
        assert_eq!(names(&l.files), vec!["a.txt", "b.txt"]);
        assert_eq!(names(&l.dirs), vec!["sub"]);
        assert!(l.files.iter().all(|e| e.kind == EntryKind::File));
        assert_eq!(l.dirs[0].path, td.path().join("sub"));
    }

    #[test]
    fn empty_directory_gives_empty_listing() {
        let td = tempdir().unwrap();
        assert_eq!(list_dir(td.path()).unwrap(), Listing::default());
    }

    #[test]
    fn missing_directory_is_not_found() {
        let td = tempdir().unwrap();
        let err = list_dir(&td.path().join("nope")).unwrap_err();
        assert!(matches!(err, FsOpError::NotFound { .. }));
    }

    #[test]
    fn file_is_unreadable_as_directory() {
        let td = tempdir().unwrap();
        let f = td.path().join("f");
        fs::write(&f, b"").unwrap();
        let err = list_dir(&f).unwrap_err();
        assert!(matches!(err, FsOpError::Unreadable { .. }));
    }

    #[test]
    fn symlink_to_dir_is_a_file_entry() {
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join("real")).unwrap();
        std::os::unix::fs::symlink(td.path().join("real"), td.path().join("link")).unwrap();

        let l = list_dir(td.path()).unwrap();
        assert_eq!(names(&l.dirs), vec!["real"]);
        assert_eq!(names(&l.files), vec!["link"]);
        assert!(l.files[0].is_symlink);
    }
}
