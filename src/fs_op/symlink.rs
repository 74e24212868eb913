//! Symbolic and hard links.

use std::fs;
use std::path::{Path, PathBuf};

use crate::fs_op::error::{FsOpError, Result};
use crate::fs_op::path_set::single_path;

/// Create a symbolic link at `dst` that points to `src`. `src` is stored
/// as given and need not exist.
pub fn symlink<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<()> {
    let src = single_path("link target", src.as_ref())?;
    let dst = single_path("link", dst.as_ref())?;
    std::os::unix::fs::symlink(src, dst).map_err(|e| FsOpError::native("symlink", dst, e))
}

/// Create a hard link `dst` to the existing file `src`.
pub fn hardlink<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<()> {
    let src = single_path("link target", src.as_ref())?;
    let dst = single_path("link", dst.as_ref())?;
    fs::hard_link(src, dst).map_err(|e| FsOpError::native("link", dst, e))
}

/// Read the target of a symbolic link.
pub fn read_link<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let p = single_path("link", path.as_ref())?;
    fs::read_link(p).map_err(|e| FsOpError::native("readlink", p, e))
}
