//! Tracing initialisation for the `ideaforge` binary.
//!
//! Logs go to stderr so command output on stdout stays clean. Filtering
//! follows `IDEAFORGE_LOG` (an `EnvFilter` directive string) and falls back
//! to a level chosen by the command. When `IDEAFORGE_LOG_DIR` is set, a
//! daily-rolling JSON log file is written there as well.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_FILTER_ENV: &str = "IDEAFORGE_LOG";
pub const LOG_DIR_ENV: &str = "IDEAFORGE_LOG_DIR";
const LOG_FILE_PREFIX: &str = "ideaforge.log";

/// Stderr log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Default filter when `IDEAFORGE_LOG` is unset. The server logs run
/// lifecycle at info; interactive commands stay quiet unless verbose.
pub fn default_level(verbose: bool, server: bool) -> &'static str {
    match (verbose, server) {
        (true, _) => "debug",
        (false, true) => "info",
        (false, false) => "warn",
    }
}

/// Install the global subscriber. Only the first call takes effect.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// stops the file writer.
pub fn init(format: LogFormat, default_level: &str) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let text_layer = (format == LogFormat::Text)
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));
    let json_layer = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    let (file_layer, guard) = match std::env::var_os(LOG_DIR_ENV).map(PathBuf::from) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().json().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .ok();

    guard
}
