//! Single-or-many path arguments.
//!
//! Every bulk operation takes `impl Into<PathSet>`, so callers can hand over
//! one path or a collection without the operation caring which. The shape is
//! resolved by the type system at compile time; [`normalize`] is the one
//! runtime admission check every operation goes through.

use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use crate::fs_op::error::{FsOpError, Result};

/// Ordered sequence of paths. Order is kept as given; entries are processed
/// independently of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: Vec<PathBuf>,
}

impl PathSet {
    pub fn single(path: impl Into<PathBuf>) -> Self {
        PathSet {
            paths: vec![path.into()],
        }
    }

    pub fn many<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        PathSet {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

impl IntoIterator for PathSet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl From<&str> for PathSet {
    fn from(p: &str) -> Self {
        PathSet::single(p)
    }
}

impl From<String> for PathSet {
    fn from(p: String) -> Self {
        PathSet::single(p)
    }
}

impl From<&String> for PathSet {
    fn from(p: &String) -> Self {
        PathSet::single(p.as_str())
    }
}

impl From<&Path> for PathSet {
    fn from(p: &Path) -> Self {
        PathSet::single(p)
    }
}

impl From<PathBuf> for PathSet {
    fn from(p: PathBuf) -> Self {
        PathSet::single(p)
    }
}

impl From<&PathBuf> for PathSet {
    fn from(p: &PathBuf) -> Self {
        PathSet::single(p.as_path())
    }
}

impl<T: Into<PathBuf>> From<Vec<T>> for PathSet {
    fn from(v: Vec<T>) -> Self {
        PathSet::many(v)
    }
}

impl<T: AsRef<Path>> From<&[T]> for PathSet {
    fn from(v: &[T]) -> Self {
        PathSet::many(v.iter().map(|p| p.as_ref().to_path_buf()))
    }
}

impl<T: AsRef<Path>> From<&Vec<T>> for PathSet {
    fn from(v: &Vec<T>) -> Self {
        PathSet::from(v.as_slice())
    }
}

impl<T: Into<PathBuf>, const N: usize> From<[T; N]> for PathSet {
    fn from(v: [T; N]) -> Self {
        PathSet::many(v)
    }
}

/// Admit a caller-supplied path argument.
///
/// Empty entries are kept (operations treat them as no-ops). A path with an
/// interior NUL byte can never reach the OS and is rejected as
/// `InvalidArgument`.
pub fn normalize(input: impl Into<PathSet>) -> Result<PathSet> {
    let set = input.into();
    for p in set.iter() {
        if p.as_os_str().as_bytes().contains(&0) {
            return Err(FsOpError::invalid(format!(
                "path contains a NUL byte: {:?}",
                p
            )));
        }
    }
    Ok(set)
}

/// Admit exactly one non-empty path (sources and destinations of two-path
/// operations).
pub(crate) fn single_path<'a>(what: &str, p: &'a Path) -> Result<&'a Path> {
    if p.as_os_str().is_empty() {
        return Err(FsOpError::invalid(format!("{} path is empty", what)));
    }
    if p.as_os_str().as_bytes().contains(&0) {
        return Err(FsOpError::invalid(format!(
            "{} path contains a NUL byte: {:?}",
            what, p
        )));
    }
    Ok(p)
}
