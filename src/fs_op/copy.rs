use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use fs_extra::file::{copy as fs_extra_copy, CopyOptions};

use crate::fs_op::error::{FsOpError, Result};
use crate::fs_op::path_set::single_path;

/// Copy the regular file `src` to `dst`, replacing `dst` if it exists.
///
/// The content lands in a temporary file next to `dst` and is renamed into
/// place, so readers never see a half-written destination. Permission bits
/// follow the source. Directories are not copied.
pub fn copy<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<()> {
    let src = single_path("source", src.as_ref())?;
    let dst = single_path("destination", dst.as_ref())?;

    match fs::metadata(src) {
        Ok(md) if md.is_dir() => {
            return Err(FsOpError::invalid(format!(
                "cannot copy directory {}",
                src.display()
            )))
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FsOpError::NotFound {
                path: src.to_path_buf(),
            })
        }
        Err(e) => return Err(FsOpError::unreadable(src, e)),
    }

    let tmp = temp_sibling(dst);
    let mut options = CopyOptions::new();
    options.overwrite = false;
    // Use a 64 KiB buffer for file copies to balance throughput and memory.
    options.buffer_size = 64 * 1024;

    if let Err(e) = fs_extra_copy(src, &tmp, &options) {
        let _ = fs::remove_file(&tmp);
        return Err(FsOpError::unwritable(dst, io::Error::other(e)));
    }
    if let Err(e) = fs::rename(&tmp, dst) {
        let _ = fs::remove_file(&tmp);
        return Err(FsOpError::native("rename", dst, e));
    }
    tracing::debug!(src = %src.display(), dst = %dst.display(), "copied");
    Ok(())
}

// `.tmp_copy.<suffix>` in the destination directory. pid + time + a process
// wide sequence number keep concurrent copies from colliding.
fn temp_sibling(dst: &Path) -> PathBuf {
    static NEXT_COPY_ID: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = NEXT_COPY_ID.fetch_add(1, Ordering::Relaxed);
    let name = format!(".tmp_copy.{:x}{:x}{:x}", std::process::id(), nanos, seq);
    match dst.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(name),
        _ => PathBuf::from(name),
    }
}
