//! tracing subscriber setup for the binary.

use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::settings::LogSettings;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `verbosity`, which wins over `settings.level`. When
/// `settings.file` is set, events go to that file through a non-blocking
/// writer; keep the returned guard alive until exit so it gets flushed.
pub fn init_logging(settings: &LogSettings, verbosity: u8) -> io::Result<Option<WorkerGuard>> {
    let fallback = match verbosity {
        0 => settings.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(f) => (f, None),
        Err(_) => fallback_filter(fallback),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match &settings.file {
        Some(path) => {
            let dir = match path.parent() {
                Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
                _ => std::path::PathBuf::from("."),
            };
            let name = path
                .file_name()
                .ok_or_else(|| io::Error::other("log file path has no file name"))?;
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            // a subscriber may already be set (tests); keep the first
            let _ = builder.with_ansi(false).with_writer(writer).try_init();
            warn_rejected(rejected);
            Ok(Some(guard))
        }
        None => {
            let _ = builder.with_writer(io::stderr).try_init();
            warn_rejected(rejected);
            Ok(None)
        }
    }
}

/// Parse `directive`, falling back to `warn`. The rejected directive is
/// handed back so it can be reported once a subscriber exists.
fn fallback_filter(directive: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(directive) {
        Ok(f) => (f, None),
        Err(_) => (EnvFilter::new("warn"), Some(directive.to_string())),
    }
}

fn warn_rejected(rejected: Option<String>) {
    if let Some(level) = rejected {
        tracing::warn!(%level, "invalid log level in settings, using warn");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn valid_level_is_kept() {
        let (filter, rejected) = fallback_filter("debug");
        assert!(rejected.is_none());
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn invalid_level_falls_back_to_warn_and_is_reported() {
        let (filter, rejected) = fallback_filter("bulkfs=loud");
        assert_eq!(rejected.as_deref(), Some("bulkfs=loud"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
