use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::fs_op::create::{Creator, DEFAULT_DIR_MODE};
use crate::settings::read_settings::SettingsError;

/// User-tunable defaults for the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode for `mkdir` without `-m` and for parents created on the fly.
    #[serde(with = "octal_mode")]
    pub dir_mode: u32,
    /// Mode for files created by `touch` and `append`.
    #[serde(with = "octal_mode")]
    pub file_mode: u32,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Log to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: 0o644,
            log: LogSettings::default(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl Settings {
    pub fn creator(&self) -> Creator {
        Creator::new(self.dir_mode, self.file_mode)
    }
}

/// Write `settings` as TOML, creating the parent directory if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    let text = toml::to_string_pretty(settings)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, text).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Modes are written as octal strings (`"0755"`); TOML integers such as
/// `0o755` are accepted too.
mod octal_mode {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::fs_op::permissions::parse_mode;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(u32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(mode: &u32, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("{:04o}", mode))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        match Repr::deserialize(d)? {
            Repr::Int(n) if n <= 0o7777 => Ok(n),
            Repr::Int(n) => Err(D::Error::custom(format!("mode out of range: {:o}", n))),
            Repr::Text(s) => parse_mode(&s).map_err(D::Error::custom),
        }
    }
}
