use std::path::{Path, PathBuf};

/// Directory part of `path`: `a/b/c` gives `a/b`, a bare name gives `.`,
/// `/` stays `/`.
pub fn dirname<P: AsRef<Path>>(path: P) -> PathBuf {
    let p = path.as_ref();
    match p.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None if p.has_root() => PathBuf::from("/"),
        None => PathBuf::from("."),
    }
}

pub fn is_absolute_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_absolute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirname_cases() {
        assert_eq!(dirname("a/b/c.txt"), PathBuf::from("a/b"));
        assert_eq!(dirname("c.txt"), PathBuf::from("."));
        assert_eq!(dirname(""), PathBuf::from("."));
        assert_eq!(dirname("/"), PathBuf::from("/"));
        assert_eq!(dirname("/etc"), PathBuf::from("/"));
    }

    #[test]
    fn absolute_paths() {
        assert!(is_absolute_path("/tmp/x"));
        assert!(!is_absolute_path("tmp/x"));
        assert!(!is_absolute_path(""));
    }
}
