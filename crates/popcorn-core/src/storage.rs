use popcorn_models::WatchedRecord;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::error::StoreError;

/// The watched list on disk: one JSON array in one file.
///
/// Every save rewrites the whole file; there is no versioning or merging.
pub struct WatchedStore {
    path: PathBuf,
}

impl WatchedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved list. A missing, unreadable or malformed file all give
    /// an empty list; a malformed one is backed up first.
    pub fn load(&self) -> Vec<WatchedRecord> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No watched list at {:?}, starting empty", self.path);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read watched list at {:?}: {}. Starting empty.", self.path, e);
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<WatchedRecord>>(&content) {
            Ok(records) => {
                info!("Loaded {} watched movies from {:?}", records.len(), self.path);
                records
            }
            Err(e) => {
                let backup_path = self.backup_path();
                if let Err(backup_err) = std::fs::copy(&self.path, &backup_path) {
                    warn!(
                        "Watched list at {:?} is malformed ({}) and could not be backed up: {}. Starting empty.",
                        self.path, e, backup_err
                    );
                } else {
                    warn!(
                        "Watched list at {:?} is malformed ({}). Backed up to {:?} and starting empty.",
                        self.path, e, backup_path
                    );
                }
                Vec::new()
            }
        }
    }

    /// Overwrite the saved list with `records`.
    pub fn save(&self, records: &[WatchedRecord]) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec_pretty(records)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        // Write to a sibling then rename so readers never see half a file
        let temp_path = self.sibling_path("tmp");
        std::fs::write(&temp_path, encoded).map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        debug!("Saved {} watched movies to {:?}", records.len(), self.path);
        Ok(())
    }

    /// Delete the saved list. Missing files are fine.
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn backup_path(&self) -> PathBuf {
        self.sibling_path("bak")
    }

    /// `<file>.<suffix>` next to the list, keeping its full file name.
    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
