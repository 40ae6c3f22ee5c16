//! Logging system initialization
//!
//! Sets up the global tracing subscriber from the `[logging]` section.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;

/// Initialize logging system based on configuration
///
/// Call once at startup, after the configuration has been loaded.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let log_file = config.file.as_deref().filter(|f| !f.is_empty());
    let writer = open_log_writer(log_file, config)?;

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level filter '{}'", config.level))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_file.is_none());

    let installed = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(guard)
}

/// Writer for the configured destination. Missing log directories are created.
fn open_log_writer(
    log_file: Option<&str>,
    config: &LoggingConfig,
) -> Result<Box<dyn std::io::Write + Send + Sync>> {
    let Some(log_file) = log_file else {
        return Ok(Box::new(std::io::stdout()));
    };

    let path = Path::new(log_file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    if config.enable_rotation {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("linklister");
        let suffix = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("log");

        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(stem)
            .filename_suffix(suffix)
            .max_log_files(config.max_backups.max(1) as usize)
            .build(dir)
            .context("Failed to create rolling log appender")?;
        Ok(Box::new(appender))
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", log_file))?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_config(file: &Path, enable_rotation: bool) -> LoggingConfig {
        LoggingConfig {
            file: Some(file.to_string_lossy().into_owned()),
            enable_rotation,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_log_directory_is_created() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("nested").join("linklister.log");
        let config = file_config(&path, false);

        let mut writer = open_log_writer(config.file.as_deref(), &config).unwrap();
        writeln!(writer, "started").unwrap();
        writer.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "started\n");
    }

    #[test]
    fn test_missing_rotation_directory_is_created() {
        let dir = tempfile::TempDir::new().unwrap();
        let logs = dir.path().join("rotated");
        let config = file_config(&logs.join("linklister.log"), true);

        open_log_writer(config.file.as_deref(), &config).unwrap();
        assert!(logs.is_dir());
    }
}
