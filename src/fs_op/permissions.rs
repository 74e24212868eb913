//! Mode and ownership changes over a `PathSet`.

use crate::fs_op::error::{FsOpError, Result};
use crate::fs_op::mutate::{BulkMutator, Mutation, MutationIntent};
use crate::fs_op::path_set::PathSet;

/// chmod every path in `paths`. Missing paths are skipped.
pub fn chmod(paths: impl Into<PathSet>, mode: u32) -> Result<()> {
    BulkMutator::new().apply(paths, MutationIntent::new(Mutation::SetMode(mode)))
}

/// chmod every path and, for directories, everything below them. The
/// directory itself is changed after its contents.
pub fn chmod_recursive(paths: impl Into<PathSet>, mode: u32) -> Result<()> {
    BulkMutator::new().apply(paths, MutationIntent::recursive(Mutation::SetMode(mode)))
}

/// chown every path in `paths`. `None` keeps the current id.
pub fn chown(paths: impl Into<PathSet>, uid: Option<u32>, gid: Option<u32>) -> Result<()> {
    BulkMutator::new().apply(paths, MutationIntent::new(Mutation::SetOwner { uid, gid }))
}

/// Recursive [`chown`]. Symlinks inside a tree get their own ownership
/// changed; their targets are left alone.
pub fn chown_recursive(
    paths: impl Into<PathSet>,
    uid: Option<u32>,
    gid: Option<u32>,
) -> Result<()> {
    BulkMutator::new().apply(
        paths,
        MutationIntent::recursive(Mutation::SetOwner { uid, gid }),
    )
}

/// Parse an octal mode as typed by a user: `755`, `0755` or `0o755`.
pub fn parse_mode(s: &str) -> Result<u32> {
    let t = s.trim();
    let digits = t
        .strip_prefix("0o")
        .or_else(|| t.strip_prefix("0O"))
        .unwrap_or(t);
    match u32::from_str_radix(digits, 8) {
        Ok(m) if !digits.is_empty() && m <= 0o7777 => Ok(m),
        _ => Err(FsOpError::invalid(format!("not an octal mode: {:?}", s))),
    }
}

/// Parse `UID[:GID]`, `UID:` or `:GID` into ids; an omitted side is `None`.
pub fn parse_owner(s: &str) -> Result<(Option<u32>, Option<u32>)> {
    let bad = || FsOpError::invalid(format!("not an owner spec: {:?}", s));
    let id = |part: &str| -> Result<Option<u32>> {
        if part.is_empty() {
            Ok(None)
        } else {
            part.parse::<u32>().map(Some).map_err(|_| bad())
        }
    };
    let (uid, gid) = match s.split_once(':') {
        Some((u, g)) => (id(u)?, id(g)?),
        None => (id(s)?, None),
    };
    if uid.is_none() && gid.is_none() {
        return Err(bad());
    }
    Ok((uid, gid))
}
