//! Idempotent creation: directories, empty files, appends.
//!
//! All of these make sure the parent directory exists first, so callers can
//! touch or append to `a/b/c.txt` in an empty tree.

use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};
use std::path::Path;
use std::time::SystemTime;

use filetime::{set_file_times, FileTime};

use crate::fs_op::error::{FsOpError, Result};
use crate::fs_op::path_set::{normalize, single_path, PathSet};
use crate::fs_op::stat::is_writable;

pub const DEFAULT_DIR_MODE: u32 = 0o755;
pub const DEFAULT_FILE_MODE: u32 = 0o666;

/// Modes used for anything the creation helpers bring into existence.
/// Both are filtered through the process umask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Creator {
    /// Mode for missing parent directories.
    pub dir_mode: u32,
    /// Mode for newly created files.
    pub file_mode: u32,
}

impl Default for Creator {
    fn default() -> Self {
        Creator {
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}

impl Creator {
    pub fn new(dir_mode: u32, file_mode: u32) -> Self {
        Creator {
            dir_mode,
            file_mode,
        }
    }

    /// Create every directory in `paths` with `mode`, ancestors included.
    /// Members that already exist, whatever their type, are left alone.
    pub fn mkdir(&self, paths: impl Into<PathSet>, mode: u32) -> Result<()> {
        for p in normalize(paths)?.iter() {
            if p.as_os_str().is_empty() || fs::symlink_metadata(p).is_ok() {
                continue;
            }
            tracing::debug!(path = %p.display(), mode = %format!("{:o}", mode), "mkdir");
            DirBuilder::new()
                .recursive(true)
                .mode(mode)
                .create(p)
                .map_err(|e| FsOpError::native("mkdir", p, e))?;
        }
        Ok(())
    }

    /// Create the parent directory of `path` if it is missing.
    pub fn ensure_parent(&self, path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.mkdir(parent, self.dir_mode),
            _ => Ok(()),
        }
    }

    /// Create each missing file empty. Existing files keep their content and
    /// their timestamps.
    pub fn touch(&self, paths: impl Into<PathSet>) -> Result<()> {
        for p in normalize(paths)?.iter() {
            if p.as_os_str().is_empty() {
                continue;
            }
            self.create_if_missing(p)?;
        }
        Ok(())
    }

    /// Create each missing file, then set access and modification times on
    /// every path, new or old.
    pub fn touch_with_times(
        &self,
        paths: impl Into<PathSet>,
        atime: SystemTime,
        mtime: SystemTime,
    ) -> Result<()> {
        let atime = FileTime::from_system_time(atime);
        let mtime = FileTime::from_system_time(mtime);
        for p in normalize(paths)?.iter() {
            if p.as_os_str().is_empty() {
                continue;
            }
            self.create_if_missing(p)?;
            set_file_times(p, atime, mtime).map_err(|e| FsOpError::native("utimes", p, e))?;
        }
        Ok(())
    }

    /// Append `content` to `path`, creating the parent directory and the file
    /// as needed.
    pub fn append_to_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        let path = single_path("append target", path)?;
        self.ensure_parent(path)?;

        let dir = match path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };
        if !is_writable(dir) {
            return Err(FsOpError::unwritable(
                dir,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .mode(self.file_mode)
            .open(path)
            .map_err(|e| FsOpError::unwritable(path, e))?;
        file.write_all(content)
            .map_err(|e| FsOpError::unwritable(path, e))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "appended");
        Ok(())
    }

    fn create_if_missing(&self, p: &Path) -> Result<()> {
        if fs::symlink_metadata(p).is_ok() {
            return Ok(());
        }
        self.ensure_parent(p)?;
        // create_new: never truncate a file that appeared in the meantime
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(self.file_mode)
            .open(p)
        {
            Ok(_) => {
                tracing::debug!(path = %p.display(), "created file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(FsOpError::unwritable(p, e)),
        }
    }
}

/// Create directories (and ancestors) with `mode`; existing paths are skipped.
pub fn mkdir(paths: impl Into<PathSet>, mode: u32) -> Result<()> {
    Creator::default().mkdir(paths, mode)
}

/// Create missing files empty, leaving existing ones untouched.
pub fn touch(paths: impl Into<PathSet>) -> Result<()> {
    Creator::default().touch(paths)
}

/// Like [`touch`], then set atime/mtime on every path.
pub fn touch_with_times(
    paths: impl Into<PathSet>,
    atime: SystemTime,
    mtime: SystemTime,
) -> Result<()> {
    Creator::default().touch_with_times(paths, atime, mtime)
}

/// Append bytes to a file, creating it and its parent directory if absent.
pub fn append_to_file<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    Creator::default().append_to_file(path.as_ref(), content)
}
