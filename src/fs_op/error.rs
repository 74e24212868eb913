use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced by the filesystem operation layer.
///
/// Every variant that concerns a path carries it, so a bulk call that stops
/// on its first failure tells the caller exactly where it stopped.
#[derive(Error, Debug)]
pub enum FsOpError {
    /// The call itself is malformed (bad path string, bad mode, wrong kind
    /// of source for the operation).
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The path is missing and the operation requires it.
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Permission or I/O failure while reading (listing a directory, opening
    /// a source file).
    #[error("cannot read `{}`: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission or I/O failure while writing.
    #[error("cannot write `{}`: {source}", path.display())]
    Unwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A native primitive (chmod, chown, remove, rename, link...) failed.
    /// The OS error is kept verbatim.
    #[error("{op} failed on `{}`: {source}", path.display())]
    NativeOperationFailed {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsOpError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        FsOpError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn native(op: &'static str, path: &Path, source: io::Error) -> Self {
        FsOpError::NativeOperationFailed {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn unreadable(path: &Path, source: io::Error) -> Self {
        FsOpError::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn unwritable(path: &Path, source: io::Error) -> Self {
        FsOpError::Unwritable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FsOpError::InvalidArgument { .. } => None,
            FsOpError::NotFound { path }
            | FsOpError::Unreadable { path, .. }
            | FsOpError::Unwritable { path, .. }
            | FsOpError::NativeOperationFailed { path, .. } => Some(path),
        }
    }

    /// `io::ErrorKind` of the wrapped OS error, if there is one.
    pub fn kind(&self) -> Option<io::ErrorKind> {
        match self {
            FsOpError::Unreadable { source, .. }
            | FsOpError::Unwritable { source, .. }
            | FsOpError::NativeOperationFailed { source, .. } => Some(source.kind()),
            FsOpError::NotFound { .. } => Some(io::ErrorKind::NotFound),
            FsOpError::InvalidArgument { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FsOpError>;
