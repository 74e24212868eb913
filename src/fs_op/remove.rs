use crate::fs_op::error::Result;
use crate::fs_op::mutate::{BulkMutator, Mutation, MutationIntent};
use crate::fs_op::path_set::PathSet;

/// Remove each file or empty directory in `paths`.
///
/// Missing paths and empty strings are treated as already removed. A
/// non-empty directory is an error; use [`remove_recursive`] for trees.
///
/// # Examples
///
/// ```no_run
/// use bulkfs::fs_op::remove::remove;
/// remove(["/tmp/a.txt", "/tmp/empty_dir"]).expect("remove failed");
/// ```
pub fn remove(paths: impl Into<PathSet>) -> Result<()> {
    BulkMutator::new().apply(paths, MutationIntent::new(Mutation::Delete))
}

/// Remove each path, directories with everything below them.
///
/// Symlinks inside a tree are unlinked, never followed.
pub fn remove_recursive(paths: impl Into<PathSet>) -> Result<()> {
    BulkMutator::new().apply(paths, MutationIntent::recursive(Mutation::Delete))
}
