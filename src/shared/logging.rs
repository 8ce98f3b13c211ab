use std::path::{Path, PathBuf};
use tracing::{info, warn, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Diagnostics go to stderr; stdout is reserved for the probe's status lines.
///
/// With `log_dir` set, logs are also written to `<log_dir>/<service_name>.log`,
/// and a log left by the previous run is renamed aside first.
/// The returned guard must be held until exit so buffered lines get flushed.
pub fn init_logging(log_dir: Option<&Path>, service_name: &str) -> Result<Option<WorkerGuard>, anyhow::Error> {
    // RUST_LOG overrides; default stays quiet so only the status lines show
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_filter(console_filter);

    let (file, guard, rotated) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let rotated = rotate_logs_on_startup(dir, service_name);
            let (layer, guard) = file_layer(dir, service_name);
            (Some(layer), Some(guard), Some(rotated))
        }
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file)
        .try_init()?;

    if let Some(dir) = log_dir {
        info!("Logging initialized - logs will be written to {}/{service_name}.log", dir.display());
    }
    match rotated {
        Some(Ok(Some(backup))) => info!("Previous log file backed up to: {}", backup.display()),
        Some(Err(e)) => warn!("Could not rotate previous log file: {}", e),
        _ => {}
    }

    Ok(guard)
}

/// File layer at debug level for this crate, independent of the console filter.
pub fn file_layer<S>(log_dir: &Path, service_name: &str) -> (Box<dyn Layer<S> + Send + Sync>, WorkerGuard)
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let file_appender = rolling::never(log_dir, format!("{service_name}.log"));
    let (non_blocking_file, guard) = non_blocking(file_appender);

    let layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(EnvFilter::new("warn,figma_probe=debug"))
        .boxed();

    (layer, guard)
}

/// Move `<log_dir>/<service_name>.log` aside with a timestamp suffix.
/// Returns the backup path when there was a log to move.
pub fn rotate_logs_on_startup(log_dir: &Path, service_name: &str) -> Result<Option<PathBuf>, anyhow::Error> {
    let log_path = log_dir.join(format!("{service_name}.log"));

    if !log_path.exists() {
        return Ok(None);
    }

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let backup_path = log_dir.join(format!("{service_name}.{timestamp}.log"));
    std::fs::rename(&log_path, &backup_path)?;

    Ok(Some(backup_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rotation_moves_the_appender_log_aside() {
        let dir = tempfile::tempdir().unwrap();
        let mut appender = rolling::never(dir.path(), "figma-probe.log");
        appender.write_all(b"previous run\n").unwrap();
        appender.flush().unwrap();
        drop(appender);

        let backup = rotate_logs_on_startup(dir.path(), "figma-probe")
            .unwrap()
            .expect("log written by the appender should be rotated");

        assert!(!dir.path().join("figma-probe.log").exists());
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "previous run\n");
    }

    #[test]
    fn rotation_without_log_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert!(rotate_logs_on_startup(dir.path(), "figma-probe").unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn file_layer_keeps_debug_lines() {
        let dir = tempfile::tempdir().unwrap();
        let (layer, guard) = file_layer(dir.path(), "figma-probe");
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("GET http://example.invalid/v1/files/abc/versions");
        });
        drop(guard);

        let written = std::fs::read_to_string(dir.path().join("figma-probe.log")).unwrap();
        assert!(written.contains("GET http://example.invalid/v1/files/abc/versions"));
    }
}
