//! Whole-subtree enumeration.
//!
//! The walk keeps its pending directories on an explicit stack rather than
//! the call stack, so a very deep tree costs heap, not stack frames.

use std::path::Path;

use serde::Serialize;

use crate::fs_op::enumerate::{list_dir, DirEntry, Listing};
use crate::fs_op::error::Result;

/// Every descendant of a root directory, split like a [`Listing`].
///
/// `dirs` is in pre-order: a directory always appears after its parent.
///
/// [`Listing`]: crate::fs_op::enumerate::Listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    pub files: Vec<DirEntry>,
    pub dirs: Vec<DirEntry>,
}

impl TreeSnapshot {
    pub fn len(&self) -> usize {
        self.files.len() + self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }

    /// Order in which a mutation has to visit the snapshot: all files in walk
    /// order, then directories deepest first, so every child is handled
    /// before its parent.
    pub fn mutation_order(&self) -> impl Iterator<Item = &DirEntry> {
        self.files.iter().chain(self.dirs.iter().rev())
    }
}

/// Depth-first, pre-order walk of everything below `root`.
///
/// Siblings are visited in listing order. Symlinks are never descended into.
/// The first listing error at any depth aborts the walk; nothing gathered so
/// far is returned.
pub fn walk(root: &Path) -> Result<TreeSnapshot> {
    walk_with(root, list_dir)
}

/// [`walk`] with a caller-supplied lister for each directory.
pub fn walk_with<F>(root: &Path, mut list: F) -> Result<TreeSnapshot>
where
    F: FnMut(&Path) -> Result<Listing>,
{
    let mut snapshot = TreeSnapshot::default();

    let top = list(root)?;
    snapshot.files.extend(top.files);
    let mut pending: Vec<DirEntry> = top.dirs.into_iter().rev().collect();

    while let Some(dir) = pending.pop() {
        let listing = list(&dir.path)?;
        snapshot.dirs.push(dir);
        snapshot.files.extend(listing.files);
        pending.extend(listing.dirs.into_iter().rev());
    }

    tracing::debug!(
        root = %root.display(),
        files = snapshot.files.len(),
        dirs = snapshot.dirs.len(),
        "walked tree"
    );
    Ok(snapshot)
}
