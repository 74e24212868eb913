use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::settings::config_dirs::default_settings_path;
use crate::settings::write_settings::Settings;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed settings file `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Load settings.
///
/// An explicit `path` must exist. Without one the per-user settings file is
/// used if present, otherwise defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    match path {
        Some(p) => read_from(p),
        None => match default_settings_path() {
            Some(p) if p.is_file() => read_from(&p),
            _ => Ok(Settings::default()),
        },
    }
}

fn read_from(path: &Path) -> Result<Settings, SettingsError> {
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded settings");
    toml::from_str(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::write_settings::save_settings;
    use tempfile::tempdir;

    #[test]
    fn partial_file_fills_in_defaults() {
        let td = tempdir().unwrap();
        let p = td.path().join("settings.toml");
        std::fs::write(&p, "dir_mode = \"0700\"\n").unwrap();
        let s = load_settings(Some(&p)).unwrap();
        assert_eq!(s.dir_mode, 0o700);
        assert_eq!(s.file_mode, 0o644);
        assert_eq!(s.log.level, "warn");
    }

    #[test]
    fn integer_modes_and_log_section() {
        let td = tempdir().unwrap();
        let p = td.path().join("settings.toml");
        std::fs::write(
            &p,
            "file_mode = 0o600\n[log]\nlevel = \"debug\"\nfile = \"/tmp/bulkfs.log\"\n",
        )
        .unwrap();
        let s = load_settings(Some(&p)).unwrap();
        assert_eq!(s.file_mode, 0o600);
        assert_eq!(s.log.level, "debug");
        assert_eq!(s.log.file, Some(PathBuf::from("/tmp/bulkfs.log")));
    }

    #[test]
    fn bad_mode_is_parse_error() {
        let td = tempdir().unwrap();
        let p = td.path().join("settings.toml");
        std::fs::write(&p, "dir_mode = \"rwx\"\n").unwrap();
        assert!(matches!(
            load_settings(Some(&p)),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let td = tempdir().unwrap();
        assert!(matches!(
            load_settings(Some(&td.path().join("none.toml"))),
            Err(SettingsError::Io { .. })
        ));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let td = tempdir().unwrap();
        let p = td.path().join("nested/settings.toml");
        let mut s = Settings::default();
        s.dir_mode = 0o750;
        s.log.level = "info".into();
        save_settings(&s, &p).unwrap();
        assert!(std::fs::read_to_string(&p).unwrap().contains("\"0750\""));
        assert_eq!(load_settings(Some(&p)).unwrap(), s);
    }
}
