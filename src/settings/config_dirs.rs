use std::path::PathBuf;

use directories_next::ProjectDirs;

/// Per-user configuration directory, e.g. `~/.config/bulkfs` on Linux.
pub fn project_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bulkfs").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Where settings are read from when no `--config` is given.
pub fn default_settings_path() -> Option<PathBuf> {
    project_config_dir().map(|d| d.join("settings.toml"))
}
