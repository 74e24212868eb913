use std::path::Path;

use nix::unistd::{access, AccessFlags};

use crate::fs_op::path_set::{normalize, PathSet};

/// Lightweight classification of a filesystem path's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    /// The path does not exist (or is a dangling symlink).
    NotFound,
    /// The path exists and is a directory.
    Directory,
    /// The path exists and is a regular file.
    File,
    /// The path exists but is neither a regular file nor a directory
    /// (for example: socket, FIFO, block device).
    Other,
}

impl PathType {
    /// Classify `path`, following symlinks.
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        let p = path.as_ref();
        if !p.exists() {
            PathType::NotFound
        } else if p.is_dir() {
            PathType::Directory
        } else if p.is_file() {
            PathType::File
        } else {
            PathType::Other
        }
    }
}

/// `true` when every path in `paths` exists. An empty set is vacuously
/// `true`; the empty string never exists.
pub fn exists(paths: impl Into<PathSet>) -> bool {
    match normalize(paths) {
        Ok(set) => set.iter().all(|p| PathType::of(p) != PathType::NotFound),
        Err(_) => false,
    }
}

/// Return `true` if the provided `path` is a directory.
pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    PathType::of(path) == PathType::Directory
}

/// Return `true` if the provided `path` is a regular file.
pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    PathType::of(path) == PathType::File
}

/// The path exists and the calling process may read it.
pub fn is_readable<P: AsRef<Path>>(path: P) -> bool {
    access(path.as_ref(), AccessFlags::R_OK).is_ok()
}

/// The path exists and the calling process may write it.
pub fn is_writable<P: AsRef<Path>>(path: P) -> bool {
    access(path.as_ref(), AccessFlags::W_OK).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn path_type_nonexistent() {
        let tmp = tempdir().unwrap();
        let p = tmp.path().join("no_such_file_hopefully");
        assert_eq!(PathType::of(&p), PathType::NotFound);
        assert!(!exists(&p));
        assert!(!is_file(&p));
        assert!(!is_dir(&p));
        assert!(!is_readable(&p));
    }

    #[test]
    fn path_type_file_and_dir() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("a.txt");
        fs::write(&file, b"hello").unwrap();
        assert_eq!(PathType::of(&file), PathType::File);
        assert!(is_file(&file));
        assert!(!is_dir(&file));

        let dir = tmp.path().join("subdir");
        fs::create_dir(&dir).unwrap();
        assert_eq!(PathType::of(&dir), PathType::Directory);
        assert!(is_dir(&dir));
        assert!(!is_file(&dir));
    }

    #[test]
    fn exists_requires_every_member() {
        let tmp = tempdir().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::write(&a, b"").unwrap();
        assert!(exists(vec![&a]));
        assert!(!exists(vec![&a, &b]));
        fs::write(&b, b"").unwrap();
        assert!(exists(vec![&a, &b]));

        let none: Vec<&str> = Vec::new();
        assert!(exists(none));
        assert!(!exists(""));
    }

    #[test]
    fn readable_and_writable_follow_permission_bits() {
        let tmp = tempdir().unwrap();
        let f = tmp.path().join("f");
        fs::write(&f, b"").unwrap();
        assert!(is_readable(&f));
        assert!(is_writable(&f));

        if nix::unistd::geteuid().is_root() {
            return;
        }
        fs::set_permissions(&f, fs::Permissions::from_mode(0o400)).unwrap();
        assert!(is_readable(&f));
        assert!(!is_writable(&f));
    }
}
