//! Logging setup.
//!
//! Human-readable logs always go to stderr so stdout stays clean for
//! `--json` output. A plain-text log file is added when a log location is
//! configured.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Explicit log file path; wins over every directory setting.
pub const ENV_LOG_PATH: &str = "SHORTHAND_LOG_PATH";
/// Directory for `shorthand.log`; wins over the config file's `log_dir`.
pub const ENV_LOG_DIR: &str = "SHORTHAND_LOG_DIR";

const LOG_FILE_NAME: &str = "shorthand.log";

/// Where, if anywhere, logs are written besides stderr.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Log file path. `None` disables file logging.
    pub log_path: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, falling back to the
    /// configured log directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(ENV_LOG_PATH).map(PathBuf::from),
            std::env::var_os(ENV_LOG_DIR).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let log_path =
            log_path.or_else(|| env_dir.or(config_dir).map(|dir| dir.join(LOG_FILE_NAME)));
        Self { log_path }
    }
}

/// Build the log filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, `-v`
/// debug, `-vv` trace, and no flag the configured level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_for(quiet, verbose, default_level))
}

fn level_for(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit; dropping it flushes the log file.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match config.log_path {
        Some(ref path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_name = path
                .file_name()
                .with_context(|| format!("log path {} has no file name", path.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/custom.log")),
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/custom.log")));
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let cfg = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/env/shorthand.log")));
    }

    #[test]
    fn no_location_disables_file_logging() {
        assert_eq!(ObservabilityConfig::resolve(None, None, None).log_path, None);
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(true, 2, "info"), "error");
        assert_eq!(level_for(false, 0, "warn"), "warn");
        assert_eq!(level_for(false, 1, "info"), "debug");
        assert_eq!(level_for(false, 3, "info"), "trace");
    }
}
