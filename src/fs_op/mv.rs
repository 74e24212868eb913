use std::fs;
use std::path::Path;

use crate::fs_op::error::{FsOpError, Result};
use crate::fs_op::path_set::single_path;

/// Rename `src` to `dst` with a single rename(2). No copy fallback: moving
/// across filesystems fails with the OS error.
pub fn rename<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<()> {
    let src = single_path("source", src.as_ref())?;
    let dst = single_path("destination", dst.as_ref())?;
    fs::rename(src, dst).map_err(|e| FsOpError::native("rename", src, e))?;
    tracing::debug!(src = %src.display(), dst = %dst.display(), "renamed");
    Ok(())
}
