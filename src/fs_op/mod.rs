//! Filesystem operations over single paths or sets of paths.
//!
//! Every bulk operation accepts anything convertible into a [`PathSet`]
//! (`&str`, `PathBuf`, `Vec<_>`, arrays, slices) and runs synchronously
//! against the live filesystem; nothing is cached between calls. Bulk and
//! recursive operations stop at the first error and leave finished work in
//! place.

pub mod copy;
pub mod create;
pub mod enumerate;
pub mod error;
pub mod mutate;
pub mod mv;
pub mod native;
pub mod path;
pub mod path_set;
pub mod permissions;
pub mod remove;
pub mod stat;
pub mod symlink;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use copy::copy;
pub use create::{append_to_file, mkdir, touch, touch_with_times, Creator};
pub use enumerate::{list_dir, DirEntry, EntryKind, Listing};
pub use error::{FsOpError, Result};
pub use mutate::{BulkMutator, Mutation, MutationIntent};
pub use mv::rename;
pub use native::{NativeOps, OsOps};
pub use path::{dirname, is_absolute_path};
pub use path_set::{normalize, PathSet};
pub use permissions::{chmod, chmod_recursive, chown, chown_recursive, parse_mode, parse_owner};
pub use remove::{remove, remove_recursive};
pub use stat::{exists, is_dir, is_file, is_readable, is_writable, PathType};
pub use symlink::{hardlink, read_link, symlink};
pub use tree::{walk, walk_with, TreeSnapshot};
