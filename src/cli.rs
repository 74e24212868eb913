//! Command-line surface of the `bulkfs` binary.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::fs_op::{self, permissions, EntryKind, TreeSnapshot};
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "bulkfs", version, about = "Bulk filesystem operations over one or many paths")]
pub struct Cli {
    /// Settings file (TOML). Defaults to the per-user config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create directories and any missing ancestors.
    Mkdir {
        /// Octal mode; defaults to the configured dir_mode.
        #[arg(short, long, value_parser = mode_arg)]
        mode: Option<u32>,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Remove files and empty directories.
    Rm {
        /// Remove directories together with their contents.
        #[arg(short, long)]
        recursive: bool,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Copy a regular file.
    Cp { src: PathBuf, dst: PathBuf },
    /// Exit 0 when every path exists.
    Exists {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Create missing files; with --atime/--mtime also set timestamps.
    Touch {
        /// RFC 3339 access time.
        #[arg(long, value_parser = time_arg)]
        atime: Option<SystemTime>,
        /// RFC 3339 modification time.
        #[arg(long, value_parser = time_arg)]
        mtime: Option<SystemTime>,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Change permission bits.
    Chmod {
        #[arg(short = 'R', long)]
        recursive: bool,
        #[arg(value_parser = mode_arg)]
        mode: u32,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Change numeric owner and/or group (UID[:GID], :GID).
    Chown {
        #[arg(short = 'R', long)]
        recursive: bool,
        owner: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Rename a path.
    Mv { src: PathBuf, dst: PathBuf },
    /// Exit 0 when the path is a directory.
    IsDir { path: PathBuf },
    /// Exit 0 when the path is a regular file.
    IsFile { path: PathBuf },
    /// Exit 0 when the path is readable by this process.
    Readable { path: PathBuf },
    /// Exit 0 when the path is writable by this process.
    Writable { path: PathBuf },
    /// Create a hard link (or a symbolic one with -s).
    Ln {
        #[arg(short, long)]
        symbolic: bool,
        src: PathBuf,
        dst: PathBuf,
    },
    /// Print a symlink's target.
    Readlink { path: PathBuf },
    /// Append text to a file, creating it and its parent if needed.
    Append { path: PathBuf, text: String },
    /// List every file and directory below a directory.
    Tree {
        #[arg(long)]
        json: bool,
        path: PathBuf,
    },
}

fn mode_arg(s: &str) -> std::result::Result<u32, String> {
    permissions::parse_mode(s).map_err(|e| e.to_string())
}

fn time_arg(s: &str) -> std::result::Result<SystemTime, String> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(SystemTime::from)
        .map_err(|e| format!("not an RFC 3339 timestamp: {}", e))
}

/// Run one parsed command. `Ok(false)` means a predicate command answered
/// "no"; every other command returns `Ok(true)` on success.
pub fn run(command: &Command, settings: &Settings, out: &mut dyn Write) -> Result<bool> {
    let creator = settings.creator();
    match command {
        Command::Mkdir { mode, paths } => {
            let mode = mode.unwrap_or(settings.dir_mode);
            creator.mkdir(paths, mode).context("mkdir")?;
        }
        Command::Rm { recursive, paths } => {
            if *recursive {
                fs_op::remove_recursive(paths).context("rm -r")?;
            } else {
                fs_op::remove(paths).context("rm")?;
            }
        }
        Command::Cp { src, dst } => fs_op::copy(src, dst).context("cp")?,
        Command::Exists { paths } => return predicate(out, fs_op::exists(paths)),
        Command::Touch {
            atime,
            mtime,
            paths,
        } => match (atime, mtime) {
            (None, None) => creator.touch(paths).context("touch")?,
            _ => {
                let now = SystemTime::now();
                creator
                    .touch_with_times(paths, atime.unwrap_or(now), mtime.unwrap_or(now))
                    .context("touch")?;
            }
        },
        Command::Chmod {
            recursive,
            mode,
            paths,
        } => {
            if *recursive {
                fs_op::chmod_recursive(paths, *mode).context("chmod -R")?;
            } else {
                fs_op::chmod(paths, *mode).context("chmod")?;
            }
        }
        Command::Chown {
            recursive,
            owner,
            paths,
        } => {
            let (uid, gid) = permissions::parse_owner(owner)?;
            if *recursive {
                fs_op::chown_recursive(paths, uid, gid).context("chown -R")?;
            } else {
                fs_op::chown(paths, uid, gid).context("chown")?;
            }
        }
        Command::Mv { src, dst } => fs_op::rename(src, dst).context("mv")?,
        Command::IsDir { path } => return predicate(out, fs_op::is_dir(path)),
        Command::IsFile { path } => return predicate(out, fs_op::is_file(path)),
        Command::Readable { path } => return predicate(out, fs_op::is_readable(path)),
        Command::Writable { path } => return predicate(out, fs_op::is_writable(path)),
        Command::Ln { symbolic, src, dst } => {
            if *symbolic {
                fs_op::symlink(src, dst).context("ln -s")?;
            } else {
                fs_op::hardlink(src, dst).context("ln")?;
            }
        }
        Command::Readlink { path } => {
            let target = fs_op::read_link(path).context("readlink")?;
            writeln!(out, "{}", target.display())?;
        }
        Command::Append { path, text } => {
            creator
                .append_to_file(path, text.as_bytes())
                .context("append")?;
        }
        Command::Tree { json, path } => {
            let snapshot = fs_op::walk(path).context("tree")?;
            if *json {
                serde_json::to_writer_pretty(&mut *out, &snapshot)?;
                writeln!(out)?;
            } else {
                print_tree(out, path, &snapshot)?;
            }
        }
    }
    Ok(true)
}

fn predicate(out: &mut dyn Write, answer: bool) -> Result<bool> {
    writeln!(out, "{}", answer)?;
    Ok(answer)
}

fn print_tree(out: &mut dyn Write, root: &Path, snapshot: &TreeSnapshot) -> Result<()> {
    for entry in snapshot.dirs.iter().chain(snapshot.files.iter()) {
        let tag = match (entry.kind, entry.is_symlink) {
            (_, true) => 'l',
            (EntryKind::Directory, false) => 'd',
            (EntryKind::File, false) => 'f',
        };
        let shown = entry.path.strip_prefix(root).unwrap_or(&entry.path);
        writeln!(out, "{} {}", tag, shown.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn exec(args: &[&str]) -> (bool, String) {
        let cli = Cli::try_parse_from(std::iter::once("bulkfs").chain(args.iter().copied()))
            .expect("parse");
        let mut out = Vec::new();
        let ok = run(&cli.command, &Settings::default(), &mut out).expect("run");
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_modes_and_flags() {
        let cli = Cli::try_parse_from(["bulkfs", "chmod", "-R", "0750", "a", "b"]).unwrap();
        match cli.command {
            Command::Chmod {
                recursive,
                mode,
                paths,
            } => {
                assert!(recursive);
                assert_eq!(mode, 0o750);
                assert_eq!(paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(Cli::try_parse_from(["bulkfs", "chmod", "9", "a"]).is_err());
        assert!(Cli::try_parse_from(["bulkfs", "rm"]).is_err());
    }

    #[test]
    fn touch_parses_rfc3339() {
        let cli = Cli::try_parse_from([
            "bulkfs",
            "touch",
            "--mtime",
            "2001-09-09T01:46:40Z",
            "f",
        ])
        .unwrap();
        match cli.command {
            Command::Touch { mtime, atime, .. } => {
                assert!(atime.is_none());
                let secs = mtime
                    .unwrap()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap()
                    .as_secs();
                assert_eq!(secs, 1_000_000_000);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn predicates_report_answer() {
        let td = tempdir().unwrap();
        let d = td.path().to_str().unwrap();
        assert_eq!(exec(&["is-dir", d]), (true, "true\n".to_string()));
        assert_eq!(exec(&["is-file", d]), (false, "false\n".to_string()));
    }

    #[test]
    fn tree_lists_relative_entries() {
        let td = tempdir().unwrap();
        std::fs::create_dir(td.path().join("sub")).unwrap();
        std::fs::write(td.path().join("sub/f"), b"").unwrap();
        let (_, text) = exec(&["tree", td.path().to_str().unwrap()]);
        assert_eq!(text, "d sub\nf sub/f\n");
    }
}
