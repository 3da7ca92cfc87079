use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::MonthlyLog;

use super::MonthlyLogStore;

const TMP_SUFFIX: &str = "tmp";

/// Stores the log as a pretty-printed JSON file.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// crash mid-write never leaves a truncated log behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MonthlyLogStore for JsonFileStore {
    fn load(&self) -> EngineResult<MonthlyLog> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved log, starting empty");
                return Ok(MonthlyLog::default());
            }
            Err(e) => return Err(storage_error(&self.path, e)),
        };

        match serde_json::from_str(&content) {
            Ok(log) => Ok(log),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Saved log is unreadable, starting empty"
                );
                Ok(MonthlyLog::default())
            }
        }
    }

    fn save(&self, log: &MonthlyLog) -> EngineResult<()> {
        let json = serde_json::to_string_pretty(log).map_err(|e| EngineError::Storage {
            message: format!("failed to serialize log: {}", e),
        })?;

        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json).map_err(|e| storage_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| storage_error(&self.path, e))?;

        debug!(path = %self.path.display(), "Saved monthly log");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()
}

fn storage_error(path: &Path, error: std::io::Error) -> EngineError {
    EngineError::Storage {
        message: format!("{}: {}", path.display(), error),
    }
}
