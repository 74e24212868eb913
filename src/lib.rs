//! Bulk filesystem operations: create, remove, copy, rename, link, touch,
//! chmod and chown over one path or many, with recursive variants that walk
//! whole directory trees.
//!
//! ```no_run
//! use bulkfs::fs_op;
//!
//! fs_op::mkdir(["out/a", "out/b"], 0o755)?;
//! fs_op::append_to_file("out/a/log.txt", b"hello")?;
//! fs_op::chmod_recursive("out", 0o750)?;
//! fs_op::remove_recursive("out")?;
//! # Ok::<(), bulkfs::fs_op::FsOpError>(())
//! ```

pub mod cli;
pub mod fs_op;
pub mod logging;
pub mod settings;

pub use crate::fs_op::{FsOpError, PathSet};
