//! Apply one mutation (mode, owner, delete) to a whole `PathSet`.
//!
//! Processing is fail-fast: the first native failure stops the call and is
//! returned with the failing path. Work already done stays done; there is no
//! rollback.

use std::fs;
use std::io;
use std::path::Path;

use crate::fs_op::enumerate::{DirEntry, EntryKind};
use crate::fs_op::error::{FsOpError, Result};
use crate::fs_op::native::{NativeOps, OsOps};
use crate::fs_op::path_set::{normalize, PathSet};
use crate::fs_op::tree::walk_with;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    SetMode(u32),
    /// `None` leaves the id unchanged.
    SetOwner {
        uid: Option<u32>,
        gid: Option<u32>,
    },
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationIntent {
    pub mutation: Mutation,
    pub recursive: bool,
}

impl MutationIntent {
    pub fn new(mutation: Mutation) -> Self {
        MutationIntent {
            mutation,
            recursive: false,
        }
    }

    pub fn recursive(mutation: Mutation) -> Self {
        MutationIntent {
            mutation,
            recursive: true,
        }
    }
}

/// Applies [`MutationIntent`]s through a [`NativeOps`] backend.
#[derive(Debug, Default)]
pub struct BulkMutator<O = OsOps> {
    ops: O,
}

impl BulkMutator<OsOps> {
    pub fn new() -> Self {
        BulkMutator { ops: OsOps }
    }
}

/// `ENOTDIR` from lstat means a leading component is not a directory, so the
/// path cannot exist.
fn is_missing(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::NotFound
        || e.raw_os_error() == Some(nix::errno::Errno::ENOTDIR as i32)
}

impl<O: NativeOps> BulkMutator<O> {
    pub fn with_ops(ops: O) -> Self {
        BulkMutator { ops }
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Apply `intent` to every path, in order.
    ///
    /// Missing paths (including ones below a non-directory) and empty strings
    /// are skipped. For a recursive intent on
    /// a directory, every descendant is mutated first (files, then
    /// directories deepest first) and the directory itself last.
    pub fn apply(&self, paths: impl Into<PathSet>, intent: MutationIntent) -> Result<()> {
        let paths = normalize(paths)?;
        for path in paths.iter() {
            self.apply_one(path, intent)?;
        }
        Ok(())
    }

    fn apply_one(&self, path: &Path, intent: MutationIntent) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }

        let lmd = match fs::symlink_metadata(path) {
            Ok(md) => md,
            Err(e) if is_missing(&e) => {
                tracing::debug!(path = %path.display(), "skipping missing path");
                return Ok(());
            }
            Err(e) => return Err(FsOpError::unreadable(path, e)),
        };

        if lmd.file_type().is_symlink() {
            // A named link is mutated through (mode, owner) or removed
            // itself (delete), but never descended into.
            if intent.mutation != Mutation::Delete && !path.exists() {
                tracing::debug!(path = %path.display(), "skipping dangling symlink");
                return Ok(());
            }
            return self.mutate(path, EntryKind::File, false, intent.mutation);
        }

        if lmd.is_dir() {
            if intent.recursive {
                let snapshot = walk_with(path, |dir| self.ops.list_dir(dir))?;
                for entry in snapshot.mutation_order() {
                    self.mutate_entry(entry, intent.mutation)?;
                }
            }
            return self.mutate(path, EntryKind::Directory, false, intent.mutation);
        }

        self.mutate(path, EntryKind::File, false, intent.mutation)
    }

    fn mutate_entry(&self, entry: &DirEntry, mutation: Mutation) -> Result<()> {
        if entry.is_symlink {
            if let Mutation::SetMode(_) = mutation {
                tracing::warn!(path = %entry.path.display(), "not changing mode through symlink");
                return Ok(());
            }
        }
        self.mutate(&entry.path, entry.kind, entry.is_symlink, mutation)
    }

    fn mutate(&self, path: &Path, kind: EntryKind, is_link: bool, mutation: Mutation) -> Result<()> {
        let (op, res) = match mutation {
            Mutation::SetMode(mode) => {
                tracing::debug!(path = %path.display(), mode = %format!("{:o}", mode), "chmod");
                ("chmod", self.ops.set_mode(path, mode))
            }
            Mutation::SetOwner { uid, gid } => {
                tracing::debug!(path = %path.display(), ?uid, ?gid, "chown");
                ("chown", self.ops.set_owner(path, uid, gid, !is_link))
            }
            Mutation::Delete => match kind {
                EntryKind::Directory => {
                    tracing::debug!(path = %path.display(), "rmdir");
                    ("rmdir", self.ops.remove_dir(path))
                }
                EntryKind::File => {
                    tracing::debug!(path = %path.display(), "unlink");
                    ("unlink", self.ops.remove_file(path))
                }
            },
        };
        res.map_err(|e| FsOpError::native(op, path, e))
    }
}
