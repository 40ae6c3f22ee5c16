//! Tail of the application log file

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::LoggingConfig;
use crate::errors::{LinklisterError, Result};

const CHUNK_SIZE: u64 = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LogTailResult {
    Lines { path: String, lines: Vec<String> },
    Unavailable { message: String },
}

#[derive(Debug, Clone)]
pub struct LogTail {
    file: Option<PathBuf>,
    rotated: bool,
    default_lines: usize,
}

impl LogTail {
    pub fn new(file: Option<PathBuf>, rotated: bool, default_lines: usize) -> Self {
        Self {
            file: file.filter(|p| !p.as_os_str().is_empty()),
            rotated,
            default_lines,
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::new(
            config.file.as_ref().map(PathBuf::from),
            config.enable_rotation,
            config.tail_lines,
        )
    }

    pub fn default_lines(&self) -> usize {
        self.default_lines
    }

    /// Last `line_count` lines (default when `None`) of the current log file
    pub async fn tail(&self, line_count: Option<usize>) -> Result<LogTailResult> {
        let Some(configured) = self.file.clone() else {
            return Ok(LogTailResult::Unavailable {
                message: "Logging to a file is not configured".to_string(),
            });
        };

        let count = line_count.unwrap_or(self.default_lines);
        let rotated = self.rotated;

        tokio::task::spawn_blocking(move || {
            let Some(path) = resolve_log_file(&configured, rotated) else {
                return Ok(LogTailResult::Unavailable {
                    message: format!("Log file {} not found", configured.display()),
                });
            };
            let lines = read_last_lines(&path, count)?;
            Ok(LogTailResult::Lines {
                path: path.display().to_string(),
                lines,
            })
        })
        .await
        .map_err(|e| LinklisterError::file_operation(format!("Log tail task failed: {}", e)))?
    }
}

/// The configured file, or with daily rotation the newest
/// `<stem>.<date>.<ext>` sibling.
fn resolve_log_file(configured: &Path, rotated: bool) -> Option<PathBuf> {
    if configured.is_file() {
        return Some(configured.to_path_buf());
    }
    if !rotated {
        return None;
    }

    let dir = match configured.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let stem = configured.file_stem()?.to_str()?;
    let ext = configured
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("log");
    let prefix = format!("{}.", stem);
    let suffix = format!(".{}", ext);

    std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&prefix) && name.ends_with(&suffix))
        })
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .max()
}

/// Read backwards in chunks until `count` newlines are seen
fn read_last_lines(path: &Path, count: usize) -> Result<Vec<String>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut file = File::open(path)?;
    let len = file.metadata()?.len();

    let mut pos = len;
    let mut buf: Vec<u8> = Vec::new();
    loop {
        let newlines = buf.iter().filter(|b| **b == b'\n').count();
        // one extra newline is the terminator of the last line
        if pos == 0 || newlines > count {
            break;
        }
        let read = CHUNK_SIZE.min(pos);
        pos -= read;
        file.seek(SeekFrom::Start(pos))?;
        let mut chunk = vec![0u8; read as usize];
        file.read_exact(&mut chunk)?;
        chunk.extend_from_slice(&buf);
        buf = chunk;
    }

    let text = String::from_utf8_lossy(&buf);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(count);
    Ok(lines[start..].iter().map(|l| l.to_string()).collect())
}
