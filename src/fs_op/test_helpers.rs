use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

use crate::fs_op::enumerate::{list_dir, Listing};
use crate::fs_op::error::{FsOpError, Result};
use crate::fs_op::native::{NativeOps, OsOps};

/// `NativeOps` that records every call and forwards it to the real
/// filesystem, except for one path which fails with `PermissionDenied`.
/// `fail_listing` makes listing that one directory fail the same way.
#[derive(Debug, Default)]
pub(crate) struct RecordingOps {
    pub calls: RefCell<Vec<(&'static str, PathBuf)>>,
    pub fail_on: Option<PathBuf>,
    pub fail_listing: Option<PathBuf>,
}

impl RecordingOps {
    pub fn failing_on(path: impl Into<PathBuf>) -> Self {
        RecordingOps {
            fail_on: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn failing_to_list(dir: impl Into<PathBuf>) -> Self {
        RecordingOps {
            fail_listing: Some(dir.into()),
            ..Default::default()
        }
    }

    pub fn touched(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|(_, p)| p.clone()).collect()
    }

    fn record(&self, op: &'static str, path: &Path) -> io::Result<()> {
        self.calls.borrow_mut().push((op, path.to_path_buf()));
        if self.fail_on.as_deref() == Some(path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        Ok(())
    }
}

impl NativeOps for RecordingOps {
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        self.record("chmod", path)?;
        OsOps.set_mode(path, mode)
    }

    fn set_owner(
        &self,
        path: &Path,
        uid: Option<u32>,
        gid: Option<u32>,
        follow: bool,
    ) -> io::Result<()> {
        self.record("chown", path)?;
        OsOps.set_owner(path, uid, gid, follow)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.record("unlink", path)?;
        OsOps.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        self.record("rmdir", path)?;
        OsOps.remove_dir(path)
    }

    fn list_dir(&self, dir: &Path) -> Result<Listing> {
        if self.fail_listing.as_deref() == Some(dir) {
            return Err(FsOpError::unreadable(
                dir,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }
        list_dir(dir)
    }
}
