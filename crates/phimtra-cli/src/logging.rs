use std::path::Path;

use phimtra_core::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber: stderr always, plus a log file when one is
/// configured. `RUST_LOG` overrides the configured filter.
///
/// Keep the returned guard alive until exit so buffered file output is
/// flushed. Fails if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match config.file.as_deref().and_then(split_path) {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = fmt::layer().with_writer(writer).with_ansi(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(file)
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .try_init()?;
            Ok(None)
        }
    }
}

/// Directory and file name of a log path; a bare name lives in the current
/// directory.
fn split_path(path: &Path) -> Option<(&Path, &Path)> {
    let name = Path::new(path.file_name()?);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Some((dir, name))
}
