//! The single-path primitives the bulk mutator is built on.
//!
//! They sit behind [`NativeOps`] so the mutator's ordering and fail-fast
//! behaviour can be exercised against a fake that fails on demand. Directory
//! listing for recursive intents goes through the same seam.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use nix::unistd::{chown, fchownat, FchownatFlags, Gid, Uid};

use crate::fs_op::enumerate::{self, Listing};
use crate::fs_op::error::Result;

pub trait NativeOps {
    /// chmod. Follows symlinks.
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// chown; `None` leaves that id unchanged. With `follow == false` the
    /// link itself is changed, not its target.
    fn set_owner(
        &self,
        path: &Path,
        uid: Option<u32>,
        gid: Option<u32>,
        follow: bool,
    ) -> io::Result<()>;

    /// unlink. Also removes symlinks (never their target).
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// rmdir. Only succeeds on an empty directory.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// One-level listing used while walking a tree for a recursive intent.
    fn list_dir(&self, dir: &Path) -> Result<Listing> {
        enumerate::list_dir(dir)
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsOps;

impl NativeOps for OsOps {
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
    }

    fn set_owner(
        &self,
        path: &Path,
        uid: Option<u32>,
        gid: Option<u32>,
        follow: bool,
    ) -> io::Result<()> {
        let uid = uid.map(Uid::from_raw);
        let gid = gid.map(Gid::from_raw);
        if follow {
            chown(path, uid, gid).map_err(io::Error::from)
        } else {
            fchownat(None, path, uid, gid, FchownatFlags::NoFollowSymlink).map_err(io::Error::from)
        }
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }
}
